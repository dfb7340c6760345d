use anyhow::Result;

use crate::app::App;
use crate::args::Args;
use crate::resource::texture::file::FileSystemTextureLoader;

mod app;
pub mod args;
mod error;
mod render;
mod resource;
mod view;

pub fn run(args: Args) -> Result<()> {
    env_logger::init();

    let texture_source = FileSystemTextureLoader::new(&args.dds).load()?;
    let texture_name = match args.dds.file_name() {
        Some(file_name) => file_name.to_string_lossy().into_owned(),
        None => args.dds.display().to_string(),
    };

    log::info!("Loaded {texture_name}");

    let event_loop = App::create_event_loop()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Wait);

    let mut app = App::new(
        &event_loop,
        texture_source,
        texture_name,
        args.window_size,
        args.preview,
    );

    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
