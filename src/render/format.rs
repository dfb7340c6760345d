use anyhow::Result;

use crate::error::Error;
use crate::resource::texture::PixelFormat;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
    Zero,
    One,
}

impl Channel {
    /// WGSL expression reading this channel from a `vec4<f32>` named `texel`.
    pub fn wgsl_expression(&self) -> &'static str {
        match self {
            Channel::Red => "texel.r",
            Channel::Green => "texel.g",
            Channel::Blue => "texel.b",
            Channel::Alpha => "texel.a",
            Channel::Zero => "0.0",
            Channel::One => "1.0",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ChannelSwizzle {
    pub r: Channel,
    pub g: Channel,
    pub b: Channel,
    pub a: Channel,
}

impl ChannelSwizzle {
    pub const IDENTITY: ChannelSwizzle = ChannelSwizzle::new(
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::Alpha,
    );

    pub const OPAQUE: ChannelSwizzle =
        ChannelSwizzle::new(Channel::Red, Channel::Green, Channel::Blue, Channel::One);

    pub const LUMINANCE: ChannelSwizzle =
        ChannelSwizzle::new(Channel::Red, Channel::Red, Channel::Red, Channel::One);

    pub const RED: ChannelSwizzle =
        ChannelSwizzle::new(Channel::Red, Channel::Zero, Channel::Zero, Channel::One);

    pub const RED_GREEN: ChannelSwizzle =
        ChannelSwizzle::new(Channel::Red, Channel::Green, Channel::Zero, Channel::One);

    pub const fn new(r: Channel, g: Channel, b: Channel, a: Channel) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GpuFormat {
    pub texture_format: wgpu::TextureFormat,
    pub swizzle: ChannelSwizzle,
}

impl GpuFormat {
    pub fn is_compressed(&self) -> bool {
        self.texture_format.is_compressed()
    }
}

const FORMAT_TABLE: &[(PixelFormat, wgpu::TextureFormat, ChannelSwizzle)] = &[
    (
        PixelFormat::Rgba8Unorm,
        wgpu::TextureFormat::Rgba8Unorm,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Rgba8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Rgbx8Unorm,
        wgpu::TextureFormat::Rgba8Unorm,
        ChannelSwizzle::OPAQUE,
    ),
    (
        PixelFormat::Bgra8Unorm,
        wgpu::TextureFormat::Bgra8Unorm,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Bgra8UnormSrgb,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Bgrx8Unorm,
        wgpu::TextureFormat::Bgra8Unorm,
        ChannelSwizzle::OPAQUE,
    ),
    (
        PixelFormat::Bgrx8UnormSrgb,
        wgpu::TextureFormat::Bgra8UnormSrgb,
        ChannelSwizzle::OPAQUE,
    ),
    (
        PixelFormat::Bc1Unorm,
        wgpu::TextureFormat::Bc1RgbaUnorm,
        ChannelSwizzle::OPAQUE,
    ),
    (
        PixelFormat::Bc1UnormSrgb,
        wgpu::TextureFormat::Bc1RgbaUnormSrgb,
        ChannelSwizzle::OPAQUE,
    ),
    (
        PixelFormat::Bc2Unorm,
        wgpu::TextureFormat::Bc2RgbaUnorm,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Bc2UnormSrgb,
        wgpu::TextureFormat::Bc2RgbaUnormSrgb,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Bc3Unorm,
        wgpu::TextureFormat::Bc3RgbaUnorm,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Bc3UnormSrgb,
        wgpu::TextureFormat::Bc3RgbaUnormSrgb,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Bc4Unorm,
        wgpu::TextureFormat::Bc4RUnorm,
        ChannelSwizzle::LUMINANCE,
    ),
    (
        PixelFormat::Bc5Unorm,
        wgpu::TextureFormat::Bc5RgUnorm,
        ChannelSwizzle::RED_GREEN,
    ),
    (
        PixelFormat::Bc6hUfloat,
        wgpu::TextureFormat::Bc6hRgbUfloat,
        ChannelSwizzle::OPAQUE,
    ),
    (
        PixelFormat::Bc7Unorm,
        wgpu::TextureFormat::Bc7RgbaUnorm,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Bc7UnormSrgb,
        wgpu::TextureFormat::Bc7RgbaUnormSrgb,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::R8Unorm,
        wgpu::TextureFormat::R8Unorm,
        ChannelSwizzle::RED,
    ),
    (
        PixelFormat::L8Unorm,
        wgpu::TextureFormat::R8Unorm,
        ChannelSwizzle::LUMINANCE,
    ),
    (
        PixelFormat::Rg8Unorm,
        wgpu::TextureFormat::Rg8Unorm,
        ChannelSwizzle::RED_GREEN,
    ),
    (
        PixelFormat::Rgba16Float,
        wgpu::TextureFormat::Rgba16Float,
        ChannelSwizzle::IDENTITY,
    ),
    (
        PixelFormat::Rgba32Float,
        wgpu::TextureFormat::Rgba32Float,
        ChannelSwizzle::IDENTITY,
    ),
];

pub fn translate_format(pixel_format: PixelFormat) -> Result<GpuFormat> {
    match FORMAT_TABLE
        .iter()
        .find(|(source_format, _, _)| *source_format == pixel_format)
    {
        Some((_, texture_format, swizzle)) => Ok(GpuFormat {
            texture_format: *texture_format,
            swizzle: *swizzle,
        }),
        None => Err(Error::new(format!(
            "No GPU format is known for the pixel format: {pixel_format:?}"
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PIXEL_FORMATS: &[PixelFormat] = &[
        PixelFormat::Rgba8Unorm,
        PixelFormat::Rgba8UnormSrgb,
        PixelFormat::Rgbx8Unorm,
        PixelFormat::Bgra8Unorm,
        PixelFormat::Bgra8UnormSrgb,
        PixelFormat::Bgrx8Unorm,
        PixelFormat::Bgrx8UnormSrgb,
        PixelFormat::Bc1Unorm,
        PixelFormat::Bc1UnormSrgb,
        PixelFormat::Bc2Unorm,
        PixelFormat::Bc2UnormSrgb,
        PixelFormat::Bc3Unorm,
        PixelFormat::Bc3UnormSrgb,
        PixelFormat::Bc4Unorm,
        PixelFormat::Bc5Unorm,
        PixelFormat::Bc6hUfloat,
        PixelFormat::Bc7Unorm,
        PixelFormat::Bc7UnormSrgb,
        PixelFormat::R8Unorm,
        PixelFormat::L8Unorm,
        PixelFormat::Rg8Unorm,
        PixelFormat::Rgba16Float,
        PixelFormat::Rgba32Float,
    ];

    #[test]
    fn test_every_pixel_format_translates() {
        for pixel_format in ALL_PIXEL_FORMATS {
            assert!(translate_format(*pixel_format).is_ok(), "{pixel_format:?}");
        }
    }

    #[test]
    fn test_gpu_block_layout_matches_source_layout() {
        for pixel_format in ALL_PIXEL_FORMATS {
            let gpu_format = translate_format(*pixel_format).unwrap();

            assert_eq!(
                gpu_format.texture_format.block_dimensions(),
                pixel_format.block_dimensions(),
                "{pixel_format:?}"
            );
            assert_eq!(
                gpu_format.texture_format.block_copy_size(None),
                Some(pixel_format.block_size()),
                "{pixel_format:?}"
            );
            assert_eq!(
                gpu_format.is_compressed(),
                pixel_format.block_dimensions() != (1, 1)
            );
        }
    }

    #[test]
    fn test_formats_without_alpha_are_forced_opaque() {
        for pixel_format in [
            PixelFormat::Bgrx8Unorm,
            PixelFormat::Rgbx8Unorm,
            PixelFormat::Bc1Unorm,
        ] {
            assert_eq!(
                translate_format(pixel_format).unwrap().swizzle.a,
                Channel::One
            );
        }
    }

    #[test]
    fn test_bgra_uses_native_channel_order() {
        let gpu_format = translate_format(PixelFormat::Bgra8Unorm).unwrap();

        assert_eq!(gpu_format.texture_format, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(gpu_format.swizzle, ChannelSwizzle::IDENTITY);
    }

    #[test]
    fn test_luminance_spreads_red() {
        let swizzle = translate_format(PixelFormat::L8Unorm).unwrap().swizzle;

        assert_eq!(swizzle.r.wgsl_expression(), "texel.r");
        assert_eq!(swizzle.g.wgsl_expression(), "texel.r");
        assert_eq!(swizzle.b.wgsl_expression(), "texel.r");
        assert_eq!(swizzle.a.wgsl_expression(), "1.0");
    }
}
