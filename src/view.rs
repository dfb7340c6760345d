use anyhow::Result;

use crate::args::PreviewSelection;
use crate::render::RenderSystem;
use crate::resource::texture::TextureSource;

pub struct ViewSystem {
    pub window: std::sync::Arc<winit::window::Window>,
    pub render_system: RenderSystem,
}

impl ViewSystem {
    pub async fn from_window(window: winit::window::Window) -> Result<Self> {
        let window = std::sync::Arc::new(window);

        let render_system = RenderSystem::from_window(window.clone()).await?;

        Ok(Self {
            window,
            render_system,
        })
    }

    pub fn show_texture(
        &mut self,
        source: &impl TextureSource,
        name: &str,
        selection: PreviewSelection,
    ) -> Result<()> {
        self.render_system.load_texture(source, name, selection)?;
        self.window.request_redraw();

        Ok(())
    }

    pub fn update_view(&mut self) -> Result<()> {
        self.render_system.render()
    }
}
