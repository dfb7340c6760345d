use std::path::PathBuf;

pub struct Args {
    pub dds: PathBuf,
    pub window_size: WindowSize,
    pub preview: PreviewSelection,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Which subresource of the uploaded texture is drawn; cubemap faces count as layers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PreviewSelection {
    pub layer: u32,
    pub mip_level: u32,
}
