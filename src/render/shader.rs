use anyhow::Result;

use crate::render::format::ChannelSwizzle;
use crate::render::target::TextureTarget;

pub const PREVIEW_VERTEX_TEMPLATE: &str = "preview/preview.vert";
pub const PREVIEW_FRAGMENT_TEMPLATE: &str = "preview/preview.frag";

pub fn create_template_registry() -> Result<tera::Tera> {
    let mut tera = tera::Tera::default();

    tera.add_raw_templates(vec![
        (
            PREVIEW_VERTEX_TEMPLATE,
            include_str!("../../shaders/preview/preview.vert"),
        ),
        (
            PREVIEW_FRAGMENT_TEMPLATE,
            include_str!("../../shaders/preview/preview.frag"),
        ),
    ])?;

    Ok(tera)
}

pub struct ShaderModulePackage {
    pub vertex_shader_module: wgpu::ShaderModule,
    pub fragment_shader_module: wgpu::ShaderModule,
}

impl ShaderModulePackage {
    pub fn from_templates(
        vertex_template_name: &str,
        fragment_template_name: &str,
        name: &str,
        device: &wgpu::Device,
        tera: &tera::Tera,
        shader_template_config: &PreviewTemplateConfiguration,
    ) -> Result<Self> {
        let shader_template_context = tera::Context::from_serialize(shader_template_config)?;

        let vertex_shader_source = ShaderModulePackage::render_shader(
            vertex_template_name,
            tera,
            &shader_template_context,
        )?;

        let fragment_shader_source = ShaderModulePackage::render_shader(
            fragment_template_name,
            tera,
            &shader_template_context,
        )?;

        log::debug!(
            "Creating shader module package {name} from config: {:?}",
            shader_template_config
        );

        Ok(ShaderModulePackage {
            vertex_shader_module: device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{}_VERTEX_SHADER_MODULE", name)),
                source: wgpu::ShaderSource::Wgsl(vertex_shader_source.into()),
            }),
            fragment_shader_module: device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{}_FRAGMENT_SHADER_MODULE", name)),
                source: wgpu::ShaderSource::Wgsl(fragment_shader_source.into()),
            }),
        })
    }

    fn render_shader(
        template_name: &str,
        tera: &tera::Tera,
        template_context: &tera::Context,
    ) -> Result<String> {
        match tera.render(template_name, template_context) {
            Ok(shader_source) => Ok(shader_source),
            Err(error) => Err(error.into()),
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct PreviewTemplateConfiguration {
    pub view_dimension: &'static str,
    pub swizzle_r: &'static str,
    pub swizzle_g: &'static str,
    pub swizzle_b: &'static str,
    pub swizzle_a: &'static str,
}

impl PreviewTemplateConfiguration {
    pub fn new(target: TextureTarget, swizzle: ChannelSwizzle) -> Self {
        Self {
            view_dimension: match target {
                TextureTarget::D3 => "3d",
                _ => "2d",
            },
            swizzle_r: swizzle.r.wgsl_expression(),
            swizzle_g: swizzle.g.wgsl_expression(),
            swizzle_b: swizzle.b.wgsl_expression(),
            swizzle_a: swizzle.a.wgsl_expression(),
        }
    }

    #[cfg(test)]
    pub fn render_fragment_source(&self, tera: &tera::Tera) -> Result<String> {
        ShaderModulePackage::render_shader(
            PREVIEW_FRAGMENT_TEMPLATE,
            tera,
            &tera::Context::from_serialize(self)?,
        )
    }
}
