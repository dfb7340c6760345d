use anyhow::Result;

use crate::args::PreviewSelection;
use crate::render::shader::{
    PreviewTemplateConfiguration, ShaderModulePackage, PREVIEW_FRAGMENT_TEMPLATE,
    PREVIEW_VERTEX_TEMPLATE,
};
use crate::render::target::TextureTarget;
use crate::render::texture::UploadedTexture;
use crate::resource::texture::layout;

/// Aspect ratio used for 1D textures, which are drawn as a horizontal band.
const ONE_DIMENSIONAL_ASPECT_RATIO: f32 = 4.0;

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct PreviewUniform {
    scale: [f32; 2],
    slice: f32,
    _padding: f32,
}

/// Clip-space scale that fits a quad of the given aspect ratio inside the view.
pub fn fit_scale(texture_aspect_ratio: f32, view_aspect_ratio: f32) -> [f32; 2] {
    if texture_aspect_ratio > view_aspect_ratio {
        [1.0, view_aspect_ratio / texture_aspect_ratio]
    } else {
        [texture_aspect_ratio / view_aspect_ratio, 1.0]
    }
}

pub struct PreviewRenderer {
    gpu_pipeline: wgpu::RenderPipeline,
    gpu_bind_group: wgpu::BindGroup,
    gpu_uniform_buffer: wgpu::Buffer,
    texture_aspect_ratio: f32,
}

impl PreviewRenderer {
    pub fn from_texture(
        texture: &UploadedTexture,
        selection: PreviewSelection,
        surface_format: wgpu::TextureFormat,
        device: &wgpu::Device,
        tera: &tera::Tera,
    ) -> Result<Self> {
        let gpu_texture_view = texture.preview_view(selection)?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("PREVIEW_BIND_GROUP_LAYOUT"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: match texture.target {
                            TextureTarget::D3 => wgpu::TextureViewDimension::D3,
                            _ => wgpu::TextureViewDimension::D2,
                        },
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("PREVIEW_RENDER_PIPELINE_LAYOUT"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let shader_module_package = ShaderModulePackage::from_templates(
            PREVIEW_VERTEX_TEMPLATE,
            PREVIEW_FRAGMENT_TEMPLATE,
            "PREVIEW",
            device,
            tera,
            &PreviewTemplateConfiguration::new(texture.target, texture.format.swizzle),
        )?;

        let gpu_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("PREVIEW_RENDER_PIPELINE"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module_package.vertex_shader_module,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module_package.fragment_shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let gpu_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("PREVIEW_SAMPLER"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let gpu_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("PREVIEW_UNIFORM_BUFFER"),
            size: std::mem::size_of::<PreviewUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let gpu_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("PREVIEW_BIND_GROUP"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: gpu_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&gpu_texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&gpu_sampler),
                },
            ],
        });

        let texture_aspect_ratio = match texture.target {
            TextureTarget::D1 | TextureTarget::D1Array => ONE_DIMENSIONAL_ASPECT_RATIO,
            _ => {
                let (width, height, _) =
                    layout::level_extent(&texture.description, selection.mip_level);
                width as f32 / height as f32
            }
        };

        Ok(Self {
            gpu_pipeline,
            gpu_bind_group,
            gpu_uniform_buffer,
            texture_aspect_ratio,
        })
    }

    pub fn update_view_dimensions(
        &self,
        view_dimensions: winit::dpi::PhysicalSize<u32>,
        queue: &wgpu::Queue,
    ) {
        let view_aspect_ratio =
            view_dimensions.width.max(1) as f32 / view_dimensions.height.max(1) as f32;

        let uniform = PreviewUniform {
            scale: fit_scale(self.texture_aspect_ratio, view_aspect_ratio),
            slice: 0.5,
            _padding: 0.0,
        };

        queue.write_buffer(&self.gpu_uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    pub fn render_preview(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.set_pipeline(&self.gpu_pipeline);
        render_pass.set_bind_group(0, &self.gpu_bind_group, &[]);
        render_pass.draw(0..4, 0..1);
    }
}
