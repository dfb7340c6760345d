use std::path::PathBuf;

use clap::Parser;

use dds_viewer::args::{Args, PreviewSelection, WindowSize};

/// Loads a DDS texture onto the GPU and displays it in a window
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the .dds file that will be displayed by the viewer
    pub dds: PathBuf,

    /// Width of the window in physical pixels
    #[arg(long, default_value_t = WindowSize::default().width)]
    pub width: u32,

    /// Height of the window in physical pixels
    #[arg(long, default_value_t = WindowSize::default().height)]
    pub height: u32,

    /// Array layer to display; each cubemap face counts as one layer
    #[arg(short, long, default_value_t = 0)]
    pub layer: u32,

    /// Mip level to display
    #[arg(short, long, default_value_t = 0)]
    pub mip_level: u32,
}

impl From<Cli> for Args {
    fn from(value: Cli) -> Self {
        Args {
            dds: value.dds,
            window_size: WindowSize {
                width: value.width.max(1),
                height: value.height.max(1),
            },
            preview: PreviewSelection {
                layer: value.layer,
                mip_level: value.mip_level,
            },
        }
    }
}
