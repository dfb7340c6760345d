use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::args::{PreviewSelection, WindowSize};
use crate::resource::texture::dds::DdsTextureSource;
use crate::view::ViewSystem;

pub struct App {
    event_loop_proxy: EventLoopProxy<UserEvent>,
    texture_source: DdsTextureSource,
    texture_name: String,
    window_size: WindowSize,
    preview: PreviewSelection,
    view_system: Option<ViewSystem>,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(
        event_loop: &EventLoop<UserEvent>,
        texture_source: DdsTextureSource,
        texture_name: String,
        window_size: WindowSize,
        preview: PreviewSelection,
    ) -> Self {
        App {
            event_loop_proxy: event_loop.create_proxy(),
            texture_source,
            texture_name,
            window_size,
            preview,
            view_system: None,
            error: None,
        }
    }

    pub fn create_event_loop() -> Result<EventLoop<UserEvent>, EventLoopError> {
        EventLoop::<UserEvent>::with_user_event().build()
    }

    /// Error that ended the event loop, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    /// Stores the error for `run` to return and stops the event loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Window> {
        let attributes = Window::default_attributes()
            .with_title(format!("ddsloader - {}", self.texture_name))
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.window_size.width,
                self.window_size.height,
            ));

        Ok(event_loop.create_window(attributes)?)
    }

    async fn initialize_view_system(
        event_loop_proxy: EventLoopProxy<UserEvent>,
        window: Window,
    ) -> Result<()> {
        let view_system = ViewSystem::from_window(window).await?;

        if event_loop_proxy
            .send_event(UserEvent::ViewSystemReady(view_system))
            .is_err()
        {
            log::warn!("The event loop closed before the view system was ready");
        }

        Ok(())
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Application resumed");

        if self.view_system.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(error) => return self.fail(event_loop, error),
        };

        let event_loop_proxy = self.event_loop_proxy.clone();
        if let Err(error) = pollster::block_on(App::initialize_view_system(event_loop_proxy, window))
        {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let view_system = match &mut self.view_system {
            Some(view_system) => view_system,
            None => return,
        };

        if view_system.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                view_system.render_system.set_view_dimensions(new_size);
                view_system.window.request_redraw();
            }
            WindowEvent::RedrawRequested => match view_system.update_view() {
                Ok(_) => {}
                Err(error) => {
                    if let Some(error) = error.downcast_ref::<wgpu::SurfaceError>() {
                        match error {
                            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                                view_system.render_system.sync_view_dimensions();
                                view_system.window.request_redraw();
                            }
                            wgpu::SurfaceError::OutOfMemory => {
                                log::error!("OutOfMemory");
                                event_loop.exit();
                            }
                            wgpu::SurfaceError::Timeout => {
                                log::warn!("Surface timeout");
                                view_system.window.request_redraw();
                            }
                        }
                    } else {
                        self.fail(event_loop, error);
                    }
                }
            },
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        let UserEvent::ViewSystemReady(mut view_system) = event;

        log::info!("View system created");

        if let Err(error) =
            view_system.show_texture(&self.texture_source, &self.texture_name, self.preview)
        {
            return self.fail(event_loop, error);
        }

        self.view_system = Some(view_system);
    }
}

pub enum UserEvent {
    ViewSystemReady(ViewSystem),
}
