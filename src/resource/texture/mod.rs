use anyhow::Result;

pub mod dds;
pub mod file;
#[cfg(test)]
mod fixture;
pub mod layout;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextureShape {
    OneDimensional,
    TwoDimensional,
    ThreeDimensional,
}

/// Pixel formats a decoded texture can carry, independent of the container's own enums.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Rgbx8Unorm,
    Bgra8Unorm,
    Bgra8UnormSrgb,
    Bgrx8Unorm,
    Bgrx8UnormSrgb,
    Bc1Unorm,
    Bc1UnormSrgb,
    Bc2Unorm,
    Bc2UnormSrgb,
    Bc3Unorm,
    Bc3UnormSrgb,
    Bc4Unorm,
    Bc5Unorm,
    Bc6hUfloat,
    Bc7Unorm,
    Bc7UnormSrgb,
    R8Unorm,
    L8Unorm,
    Rg8Unorm,
    Rgba16Float,
    Rgba32Float,
}

impl PixelFormat {
    pub fn block_dimensions(&self) -> (u32, u32) {
        match self {
            PixelFormat::Bc1Unorm
            | PixelFormat::Bc1UnormSrgb
            | PixelFormat::Bc2Unorm
            | PixelFormat::Bc2UnormSrgb
            | PixelFormat::Bc3Unorm
            | PixelFormat::Bc3UnormSrgb
            | PixelFormat::Bc4Unorm
            | PixelFormat::Bc5Unorm
            | PixelFormat::Bc6hUfloat
            | PixelFormat::Bc7Unorm
            | PixelFormat::Bc7UnormSrgb => (4, 4),
            _ => (1, 1),
        }
    }

    /// Size in bytes of one block, or of one pixel for uncompressed formats.
    pub fn block_size(&self) -> u32 {
        match self {
            PixelFormat::Bc1Unorm | PixelFormat::Bc1UnormSrgb | PixelFormat::Bc4Unorm => 8,
            PixelFormat::Bc2Unorm
            | PixelFormat::Bc2UnormSrgb
            | PixelFormat::Bc3Unorm
            | PixelFormat::Bc3UnormSrgb
            | PixelFormat::Bc5Unorm
            | PixelFormat::Bc6hUfloat
            | PixelFormat::Bc7Unorm
            | PixelFormat::Bc7UnormSrgb => 16,
            PixelFormat::R8Unorm | PixelFormat::L8Unorm => 1,
            PixelFormat::Rg8Unorm => 2,
            PixelFormat::Rgba8Unorm
            | PixelFormat::Rgba8UnormSrgb
            | PixelFormat::Rgbx8Unorm
            | PixelFormat::Bgra8Unorm
            | PixelFormat::Bgra8UnormSrgb
            | PixelFormat::Bgrx8Unorm
            | PixelFormat::Bgrx8UnormSrgb => 4,
            PixelFormat::Rgba16Float => 8,
            PixelFormat::Rgba32Float => 16,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextureDescription {
    pub shape: TextureShape,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mip_level_count: u32,
    /// Number of 2D layers; every cubemap face counts as one layer.
    pub array_layer_count: u32,
    pub is_cubemap: bool,
    pub format: PixelFormat,
}

impl TextureDescription {
    pub fn face_count(&self) -> u32 {
        if self.is_cubemap {
            6
        } else {
            1
        }
    }

    pub fn image_count(&self) -> u32 {
        self.array_layer_count / self.face_count()
    }
}

pub trait TextureSource {
    fn description(&self) -> &TextureDescription;

    /// Pixel data of a single mip level of a single layer, where cubemap faces count as layers.
    fn subresource(&self, layer: u32, mip_level: u32) -> Result<&[u8]>;
}
