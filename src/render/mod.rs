use anyhow::Result;

use crate::args::PreviewSelection;
use crate::render::preview::PreviewRenderer;
use crate::render::state::RenderSystemState;
use crate::render::texture::UploadedTexture;
use crate::resource::texture::TextureSource;

mod format;
mod preview;
mod shader;
mod state;
mod target;
mod texture;

const BACKGROUND_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.2,
    b: 0.3,
    a: 1.0,
};

struct DisplayedTexture {
    #[allow(dead_code)]
    texture: UploadedTexture,
    preview_renderer: PreviewRenderer,
}

pub struct RenderSystem {
    state: RenderSystemState,
    displayed_texture: Option<DisplayedTexture>,
}

impl RenderSystem {
    pub async fn from_window(window: std::sync::Arc<winit::window::Window>) -> Result<Self> {
        let state = RenderSystemState::from_window(window).await?;

        Ok(Self {
            state,
            displayed_texture: None,
        })
    }

    pub fn sync_view_dimensions(&mut self) {
        self.set_view_dimensions(self.state.view_dimensions);
    }

    pub fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>) {
        if view_dimensions.width == 0 || view_dimensions.height == 0 {
            return;
        }

        self.state.set_view_dimensions(view_dimensions);

        if let Some(displayed_texture) = &self.displayed_texture {
            displayed_texture
                .preview_renderer
                .update_view_dimensions(view_dimensions, &self.state.queue);
        }
    }

    pub fn load_texture(
        &mut self,
        source: &impl TextureSource,
        name: &str,
        selection: PreviewSelection,
    ) -> Result<()> {
        self.displayed_texture = None;

        let texture =
            UploadedTexture::from_source(source, name, &self.state.device, &self.state.queue)?;

        let preview_renderer = PreviewRenderer::from_texture(
            &texture,
            selection,
            self.state.surface_config.format,
            &self.state.device,
            &self.state.tera,
        )?;

        preview_renderer.update_view_dimensions(self.state.view_dimensions, &self.state.queue);

        self.displayed_texture = Some(DisplayedTexture {
            texture,
            preview_renderer,
        });

        Ok(())
    }

    pub fn render(&mut self) -> Result<()> {
        let output = self.state.surface.get_current_texture()?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.state
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("RENDER_SYSTEM_COMMAND_ENCODER"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("RENDER_SYSTEM_RENDER_PASS"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(displayed_texture) = &self.displayed_texture {
                displayed_texture
                    .preview_renderer
                    .render_preview(&mut render_pass);
            }
        }

        self.state.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
