//! In-memory DDS files for tests. Every payload byte holds its offset modulo 251.

use ddsfile::{
    AlphaMode, Caps2, D3D10ResourceDimension, D3DFormat, Dds, DxgiFormat, FourCC, NewD3dParams,
    NewDxgiParams, PixelFormatFlags,
};

use crate::resource::texture::layout;
use crate::resource::texture::{PixelFormat, TextureDescription, TextureShape};

#[derive(Clone, Copy)]
enum Encoding {
    Dxgi(DxgiFormat),
    D3d(D3DFormat),
}

#[derive(Clone, Copy)]
pub struct FixtureFormat {
    encoding: Encoding,
    /// Format used to size the payload.
    layout_format: PixelFormat,
}

impl FixtureFormat {
    const fn dxgi(format: DxgiFormat, layout_format: PixelFormat) -> Self {
        Self {
            encoding: Encoding::Dxgi(format),
            layout_format,
        }
    }

    const fn d3d(format: D3DFormat, layout_format: PixelFormat) -> Self {
        Self {
            encoding: Encoding::D3d(format),
            layout_format,
        }
    }

    pub const DXGI_R8G8B8A8_UNORM: FixtureFormat =
        FixtureFormat::dxgi(DxgiFormat::R8G8B8A8_UNorm, PixelFormat::Rgba8Unorm);
    pub const DXGI_R10G10B10A2_UNORM: FixtureFormat =
        FixtureFormat::dxgi(DxgiFormat::R10G10B10A2_UNorm, PixelFormat::Rgba8Unorm);
    pub const DXGI_B8G8R8X8_UNORM: FixtureFormat =
        FixtureFormat::dxgi(DxgiFormat::B8G8R8X8_UNorm, PixelFormat::Bgrx8Unorm);
    pub const DXGI_BC1_UNORM: FixtureFormat =
        FixtureFormat::dxgi(DxgiFormat::BC1_UNorm, PixelFormat::Bc1Unorm);
    pub const DXGI_BC3_UNORM: FixtureFormat =
        FixtureFormat::dxgi(DxgiFormat::BC3_UNorm, PixelFormat::Bc3Unorm);
    pub const DXGI_R32G32B32A32_FLOAT: FixtureFormat =
        FixtureFormat::dxgi(DxgiFormat::R32G32B32A32_Float, PixelFormat::Rgba32Float);

    pub const D3D_DXT1: FixtureFormat = FixtureFormat::d3d(D3DFormat::DXT1, PixelFormat::Bc1Unorm);
    pub const D3D_DXT3: FixtureFormat = FixtureFormat::d3d(D3DFormat::DXT3, PixelFormat::Bc2Unorm);
    pub const D3D_DXT5: FixtureFormat = FixtureFormat::d3d(D3DFormat::DXT5, PixelFormat::Bc3Unorm);
    pub const D3D_A8R8G8B8: FixtureFormat =
        FixtureFormat::d3d(D3DFormat::A8R8G8B8, PixelFormat::Bgra8Unorm);
    pub const D3D_X8R8G8B8: FixtureFormat =
        FixtureFormat::d3d(D3DFormat::X8R8G8B8, PixelFormat::Bgrx8Unorm);
    pub const D3D_A8B8G8R8: FixtureFormat =
        FixtureFormat::d3d(D3DFormat::A8B8G8R8, PixelFormat::Rgba8Unorm);
    pub const D3D_X8B8G8R8: FixtureFormat =
        FixtureFormat::d3d(D3DFormat::X8B8G8R8, PixelFormat::Rgbx8Unorm);
    pub const D3D_L8: FixtureFormat = FixtureFormat::d3d(D3DFormat::L8, PixelFormat::L8Unorm);
    pub const D3D_A16B16G16R16F: FixtureFormat =
        FixtureFormat::d3d(D3DFormat::A16B16G16R16F, PixelFormat::Rgba16Float);
    pub const D3D_A32B32G32R32F: FixtureFormat =
        FixtureFormat::d3d(D3DFormat::A32B32G32R32F, PixelFormat::Rgba32Float);
}

pub struct DdsFixture {
    shape: TextureShape,
    width: u32,
    height: u32,
    depth: u32,
    mip_levels: u32,
    array_size: u32,
    format: FixtureFormat,
    dx10_cubemap: bool,
    caps2: Caps2,
}

impl DdsFixture {
    fn new(shape: TextureShape, (width, height, depth): (u32, u32, u32), format: FixtureFormat) -> Self {
        Self {
            shape,
            width,
            height,
            depth,
            mip_levels: 1,
            array_size: 1,
            format,
            dx10_cubemap: false,
            caps2: if shape == TextureShape::ThreeDimensional {
                Caps2::VOLUME
            } else {
                Caps2::empty()
            },
        }
    }

    pub fn dx10_1d(width: u32, format: FixtureFormat) -> Self {
        DdsFixture::new(TextureShape::OneDimensional, (width, 1, 1), format)
    }

    pub fn dx10_2d(width: u32, height: u32, format: FixtureFormat) -> Self {
        DdsFixture::new(TextureShape::TwoDimensional, (width, height, 1), format)
    }

    pub fn dx10_3d(width: u32, height: u32, depth: u32, format: FixtureFormat) -> Self {
        DdsFixture::new(TextureShape::ThreeDimensional, (width, height, depth), format)
    }

    pub fn legacy_2d(width: u32, height: u32, format: FixtureFormat) -> Self {
        DdsFixture::new(TextureShape::TwoDimensional, (width, height, 1), format)
    }

    pub fn legacy_3d(width: u32, height: u32, depth: u32, format: FixtureFormat) -> Self {
        DdsFixture::new(TextureShape::ThreeDimensional, (width, height, depth), format)
    }

    pub fn with_mip_levels(mut self, mip_levels: u32) -> Self {
        self.mip_levels = mip_levels;
        self
    }

    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size;
        self
    }

    pub fn with_caps2(mut self, caps2: Caps2) -> Self {
        self.caps2 = caps2;
        self
    }

    pub fn as_dx10_cubemap(mut self) -> Self {
        self.dx10_cubemap = true;
        self
    }

    pub fn as_legacy_cubemap(self) -> Self {
        self.with_caps2(Caps2::CUBEMAP | Caps2::CUBEMAP_ALLFACES)
    }

    fn array_layer_count(&self) -> u32 {
        if self.dx10_cubemap {
            self.array_size * 6
        } else if self.caps2.contains(Caps2::CUBEMAP | Caps2::CUBEMAP_ALLFACES) {
            6
        } else {
            self.array_size
        }
    }

    fn payload(&self) -> Vec<u8> {
        let payload_size = layout::total_size(&TextureDescription {
            shape: self.shape,
            width: self.width,
            height: self.height,
            depth: self.depth,
            mip_level_count: self.mip_levels,
            array_layer_count: self.array_layer_count(),
            is_cubemap: self.dx10_cubemap || self.caps2.contains(Caps2::CUBEMAP),
            format: self.format.layout_format,
        })
        .unwrap();

        (0..payload_size).map(|offset| (offset % 251) as u8).collect()
    }

    /// The container before serialization, for tests that corrupt header fields.
    pub fn into_dds(self) -> Dds {
        let depth = match self.shape {
            TextureShape::ThreeDimensional => Some(self.depth),
            _ => None,
        };

        let mut dds = match self.format.encoding {
            Encoding::Dxgi(format) => Dds::new_dxgi(NewDxgiParams {
                height: self.height,
                width: self.width,
                depth,
                format,
                mipmap_levels: Some(self.mip_levels),
                array_layers: Some(self.array_layer_count()),
                caps2: Some(self.caps2),
                is_cubemap: self.dx10_cubemap,
                resource_dimension: match self.shape {
                    TextureShape::OneDimensional => D3D10ResourceDimension::Texture1D,
                    TextureShape::TwoDimensional => D3D10ResourceDimension::Texture2D,
                    TextureShape::ThreeDimensional => D3D10ResourceDimension::Texture3D,
                },
                alpha_mode: AlphaMode::Unknown,
            }),
            Encoding::D3d(format) => Dds::new_d3d(NewD3dParams {
                height: self.height,
                width: self.width,
                depth,
                format,
                mipmap_levels: Some(self.mip_levels),
                caps2: Some(self.caps2),
            }),
        }
        .unwrap();

        // ddsfile writes these as plain RGB, the way no real encoder does.
        if let Encoding::D3d(format) = self.format.encoding {
            let pixel_format = &mut dds.header.spf;
            match format {
                D3DFormat::L8 => {
                    pixel_format.flags = PixelFormatFlags::LUMINANCE;
                    pixel_format.r_bit_mask = Some(0xff);
                }
                D3DFormat::A16B16G16R16F | D3DFormat::A32B32G32R32F => {
                    pixel_format.flags = PixelFormatFlags::FOURCC;
                    pixel_format.fourcc = Some(FourCC(match format {
                        D3DFormat::A16B16G16R16F => FourCC::A16B16G16R16F,
                        _ => FourCC::A32B32G32R32F,
                    }));
                    pixel_format.rgb_bit_count = None;
                }
                _ => {}
            }
        }

        dds.data = self.payload();
        dds
    }

    pub fn into_bytes(self) -> Vec<u8> {
        write_dds(&self.into_dds())
    }
}

pub fn write_dds(dds: &Dds) -> Vec<u8> {
    let mut bytes = Vec::new();
    dds.write(&mut bytes).unwrap();
    bytes
}
