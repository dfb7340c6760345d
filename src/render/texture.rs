use anyhow::Result;

use crate::args::PreviewSelection;
use crate::error::Error;
use crate::render::format::{translate_format, GpuFormat};
use crate::render::target::TextureTarget;
use crate::resource::texture::layout::{self, CopyRegion};
use crate::resource::texture::{TextureDescription, TextureSource};

pub struct UploadedTexture {
    pub gpu_texture: wgpu::Texture,
    pub description: TextureDescription,
    pub target: TextureTarget,
    pub format: GpuFormat,
}

impl PreviewSelection {
    pub fn validate(&self, description: &TextureDescription) -> Result<()> {
        if self.mip_level >= description.mip_level_count {
            return Err(Error::new(format!(
                "The preview mip level is out of range (mip_level={}, levels={})",
                self.mip_level, description.mip_level_count
            ))
            .into());
        }

        if self.layer >= description.array_layer_count {
            return Err(Error::new(format!(
                "The preview layer is out of range (layer={}, layers={})",
                self.layer, description.array_layer_count
            ))
            .into());
        }

        Ok(())
    }
}

impl UploadedTexture {
    pub fn from_source(
        source: &impl TextureSource,
        name: &str,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Self> {
        let description = *source.description();
        let format = translate_format(description.format)?;
        let target = TextureTarget::select(&description)?;

        let size = target.storage_extent(&description);
        UploadedTexture::validate(
            &description,
            &format,
            target,
            size,
            device.features(),
            &device.limits(),
        )?;

        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("{name}_TEXTURE")),
            size,
            mip_level_count: description.mip_level_count,
            sample_count: 1,
            dimension: target.gpu_dimension(),
            format: format.texture_format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for layer in 0..description.array_layer_count {
            for mip_level in 0..description.mip_level_count {
                UploadedTexture::write_subresource(
                    &gpu_texture,
                    layout::copy_region(&description, layer, mip_level)?,
                    mip_level,
                    source.subresource(layer, mip_level)?,
                    queue,
                );
            }
        }

        queue.submit([]);

        log::info!(
            "Uploaded {name}: {target:?} ({:?} view, array={}) {:?} {}x{}x{} with {} mip level(s) and {} image(s) of {} face(s)",
            target.view_dimension(),
            target.is_array(),
            format.texture_format,
            description.width,
            description.height,
            description.depth,
            description.mip_level_count,
            description.image_count(),
            description.face_count(),
        );

        Ok(Self {
            gpu_texture,
            description,
            target,
            format,
        })
    }

    fn validate(
        description: &TextureDescription,
        format: &GpuFormat,
        target: TextureTarget,
        size: wgpu::Extent3d,
        features: wgpu::Features,
        limits: &wgpu::Limits,
    ) -> Result<()> {
        if format.is_compressed() {
            if !features.contains(wgpu::Features::TEXTURE_COMPRESSION_BC) {
                return Err(Error::new(format!(
                    "The device does not support BC texture compression required by {:?}",
                    format.texture_format
                ))
                .into());
            }

            let (block_width, block_height) = format.texture_format.block_dimensions();
            if description.width % block_width != 0 || description.height % block_height != 0 {
                return Err(Error::new(format!(
                    "Block compressed textures must have dimensions that are multiples of {block_width}x{block_height}: {}x{}",
                    description.width, description.height
                ))
                .into());
            }
        }

        let (max_dimension, max_depth_or_array_layers) = match target {
            TextureTarget::D3 => (
                limits.max_texture_dimension_3d,
                limits.max_texture_dimension_3d,
            ),
            _ => (
                limits.max_texture_dimension_2d,
                limits.max_texture_array_layers,
            ),
        };

        if size.width > max_dimension
            || size.height > max_dimension
            || size.depth_or_array_layers > max_depth_or_array_layers
        {
            return Err(Error::new(format!(
                "The {target:?} texture of {}x{}x{} exceeds the device limits ({max_dimension} texels per side, {max_depth_or_array_layers} layers or slices)",
                size.width, size.height, size.depth_or_array_layers
            ))
            .into());
        }

        Ok(())
    }

    fn write_subresource(
        gpu_texture: &wgpu::Texture,
        region: CopyRegion,
        mip_level: u32,
        data: &[u8],
        queue: &wgpu::Queue,
    ) {
        log::debug!(
            "Writing layer {} mip level {mip_level}: {}x{}x{} ({} bytes)",
            region.origin_z,
            region.width,
            region.height,
            region.depth,
            data.len()
        );

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: gpu_texture,
                mip_level,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: region.origin_z,
                },
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(region.bytes_per_row),
                rows_per_image: Some(region.rows_per_image),
            },
            wgpu::Extent3d {
                width: region.width,
                height: region.height,
                depth_or_array_layers: region.depth,
            },
        );
    }

    /// View of a single mip level and layer, flattened to 2D except for volumes.
    pub fn preview_view(&self, selection: PreviewSelection) -> Result<wgpu::TextureView> {
        selection.validate(&self.description)?;

        let (dimension, base_array_layer) = match self.target {
            TextureTarget::D3 => (wgpu::TextureViewDimension::D3, 0),
            _ => (wgpu::TextureViewDimension::D2, selection.layer),
        };

        Ok(self.gpu_texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("PREVIEW_TEXTURE_VIEW"),
            format: Some(self.format.texture_format),
            dimension: Some(dimension),
            aspect: wgpu::TextureAspect::All,
            base_mip_level: selection.mip_level,
            mip_level_count: Some(1),
            base_array_layer,
            array_layer_count: Some(1),
        }))
    }
}
