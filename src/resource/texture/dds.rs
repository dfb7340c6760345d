use std::io::Read;

use anyhow::Result;
use ddsfile::{
    Caps2, D3D10ResourceDimension, D3DFormat, Dds, DxgiFormat, MiscFlag, PixelFormatFlags,
};

use crate::error::Error;
use crate::resource::texture::layout;
use crate::resource::texture::{PixelFormat, TextureDescription, TextureShape, TextureSource};

pub struct DdsTextureSource {
    dds: Dds,
    description: TextureDescription,
}

impl DdsTextureSource {
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let dds = Dds::read(&mut reader)?;
        let description = DdsTextureSource::describe(&dds)?;

        let required_size = layout::total_size(&description)?;
        if dds.data.len() < required_size {
            return Err(Error::new(format!(
                "The DDS payload is truncated (required={required_size} bytes, actual={} bytes)",
                dds.data.len()
            ))
            .into());
        }

        Ok(Self { dds, description })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        DdsTextureSource::from_reader(std::io::Cursor::new(bytes))
    }

    fn describe(dds: &Dds) -> Result<TextureDescription> {
        let header = &dds.header;

        let width = header.width;
        let height = header.height;
        let depth = header.depth.unwrap_or(1);

        if width == 0 || height == 0 || depth == 0 {
            return Err(Error::new(format!(
                "The DDS file has an empty extent: {width}x{height}x{depth}"
            ))
            .into());
        }

        let mip_level_count = header.mip_map_count.unwrap_or(1).max(1);

        let (shape, array_layer_count, is_cubemap, format) = match &dds.header10 {
            Some(header10) => {
                let shape = match header10.resource_dimension {
                    D3D10ResourceDimension::Texture1D => TextureShape::OneDimensional,
                    D3D10ResourceDimension::Texture2D => TextureShape::TwoDimensional,
                    D3D10ResourceDimension::Texture3D => TextureShape::ThreeDimensional,
                    other => {
                        return Err(Error::new(format!(
                            "Unsupported DDS resource dimension: {other:?}"
                        ))
                        .into())
                    }
                };

                let is_cubemap = header10.misc_flag.contains(MiscFlag::TEXTURECUBE);
                let array_size = header10.array_size.max(1);
                let array_layer_count = if is_cubemap {
                    match array_size.checked_mul(6) {
                        Some(array_layer_count) => array_layer_count,
                        None => {
                            return Err(Error::new(format!(
                                "The DDS file declares too many cubemaps: {array_size}"
                            ))
                            .into())
                        }
                    }
                } else {
                    array_size
                };

                (
                    shape,
                    array_layer_count,
                    is_cubemap,
                    pixel_format_from_dxgi(header10.dxgi_format)?,
                )
            }
            None => {
                let shape = if header.caps2.contains(Caps2::VOLUME) || depth > 1 {
                    TextureShape::ThreeDimensional
                } else {
                    TextureShape::TwoDimensional
                };

                let is_cubemap = header.caps2.contains(Caps2::CUBEMAP);
                if is_cubemap && !header.caps2.contains(Caps2::CUBEMAP_ALLFACES) {
                    return Err(
                        Error::new("Cubemaps without all six faces are not supported").into(),
                    );
                }

                let format = match legacy_d3d_format(dds) {
                    Some(d3d_format) => pixel_format_from_d3d(d3d_format)?,
                    None => {
                        return Err(Error::new(
                            "Unable to determine the pixel format of the DDS file",
                        )
                        .into())
                    }
                };

                (shape, if is_cubemap { 6 } else { 1 }, is_cubemap, format)
            }
        };

        if shape == TextureShape::OneDimensional && height != 1 {
            return Err(Error::new(format!(
                "One dimensional textures must have a height of 1: {height}"
            ))
            .into());
        }

        let depth = if shape == TextureShape::ThreeDimensional {
            depth
        } else {
            1
        };

        let max_mip_level_count = layout::max_mip_level_count(width, height, depth);
        if mip_level_count > max_mip_level_count {
            return Err(Error::new(format!(
                "The DDS file declares more mip levels than its extent allows (levels={mip_level_count}, max={max_mip_level_count})"
            ))
            .into());
        }

        Ok(TextureDescription {
            shape,
            width,
            height,
            depth,
            mip_level_count,
            array_layer_count,
            is_cubemap,
            format,
        })
    }
}

impl TextureSource for DdsTextureSource {
    fn description(&self) -> &TextureDescription {
        &self.description
    }

    fn subresource(&self, layer: u32, mip_level: u32) -> Result<&[u8]> {
        let offset = layout::subresource_offset(&self.description, layer, mip_level)?;
        let size = layout::level_size(&self.description, mip_level)?;

        match self.dds.data.get(offset..offset.saturating_add(size)) {
            Some(data) => Ok(data),
            None => Err(Error::new(format!(
                "Subresource (layer={layer}, mip_level={mip_level}) lies outside the DDS payload"
            ))
            .into()),
        }
    }
}

/// ddsfile only reads channel masks of RGB pixel formats, so 8-bit luminance is matched here.
fn legacy_d3d_format(dds: &Dds) -> Option<D3DFormat> {
    let pixel_format = &dds.header.spf;

    match dds.get_d3d_format() {
        Some(d3d_format) => Some(d3d_format),
        None if pixel_format.flags.contains(PixelFormatFlags::LUMINANCE)
            && !pixel_format.flags.contains(PixelFormatFlags::ALPHA_PIXELS)
            && pixel_format.rgb_bit_count == Some(8) =>
        {
            Some(D3DFormat::L8)
        }
        None => None,
    }
}

fn pixel_format_from_dxgi(format: DxgiFormat) -> Result<PixelFormat> {
    let pixel_format = match format {
        DxgiFormat::R8G8B8A8_UNorm => PixelFormat::Rgba8Unorm,
        DxgiFormat::R8G8B8A8_UNorm_sRGB => PixelFormat::Rgba8UnormSrgb,
        DxgiFormat::B8G8R8A8_UNorm => PixelFormat::Bgra8Unorm,
        DxgiFormat::B8G8R8A8_UNorm_sRGB => PixelFormat::Bgra8UnormSrgb,
        DxgiFormat::B8G8R8X8_UNorm => PixelFormat::Bgrx8Unorm,
        DxgiFormat::B8G8R8X8_UNorm_sRGB => PixelFormat::Bgrx8UnormSrgb,
        DxgiFormat::BC1_UNorm => PixelFormat::Bc1Unorm,
        DxgiFormat::BC1_UNorm_sRGB => PixelFormat::Bc1UnormSrgb,
        DxgiFormat::BC2_UNorm => PixelFormat::Bc2Unorm,
        DxgiFormat::BC2_UNorm_sRGB => PixelFormat::Bc2UnormSrgb,
        DxgiFormat::BC3_UNorm => PixelFormat::Bc3Unorm,
        DxgiFormat::BC3_UNorm_sRGB => PixelFormat::Bc3UnormSrgb,
        DxgiFormat::BC4_UNorm => PixelFormat::Bc4Unorm,
        DxgiFormat::BC5_UNorm => PixelFormat::Bc5Unorm,
        DxgiFormat::BC6H_UF16 => PixelFormat::Bc6hUfloat,
        DxgiFormat::BC7_UNorm => PixelFormat::Bc7Unorm,
        DxgiFormat::BC7_UNorm_sRGB => PixelFormat::Bc7UnormSrgb,
        DxgiFormat::R8_UNorm => PixelFormat::R8Unorm,
        DxgiFormat::R8G8_UNorm => PixelFormat::Rg8Unorm,
        DxgiFormat::R16G16B16A16_Float => PixelFormat::Rgba16Float,
        DxgiFormat::R32G32B32A32_Float => PixelFormat::Rgba32Float,
        other => {
            return Err(Error::new(format!("Unsupported DXGI pixel format: {other:?}")).into())
        }
    };

    Ok(pixel_format)
}

fn pixel_format_from_d3d(format: D3DFormat) -> Result<PixelFormat> {
    let pixel_format = match format {
        D3DFormat::A8B8G8R8 => PixelFormat::Rgba8Unorm,
        D3DFormat::X8B8G8R8 => PixelFormat::Rgbx8Unorm,
        D3DFormat::A8R8G8B8 => PixelFormat::Bgra8Unorm,
        D3DFormat::X8R8G8B8 => PixelFormat::Bgrx8Unorm,
        D3DFormat::DXT1 => PixelFormat::Bc1Unorm,
        D3DFormat::DXT2 | D3DFormat::DXT3 => PixelFormat::Bc2Unorm,
        D3DFormat::DXT4 | D3DFormat::DXT5 => PixelFormat::Bc3Unorm,
        D3DFormat::L8 => PixelFormat::L8Unorm,
        D3DFormat::A16B16G16R16F => PixelFormat::Rgba16Float,
        D3DFormat::A32B32G32R32F => PixelFormat::Rgba32Float,
        other => {
            return Err(Error::new(format!("Unsupported D3D pixel format: {other:?}")).into())
        }
    };

    Ok(pixel_format)
}
