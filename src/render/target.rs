use anyhow::Result;

use crate::error::Error;
use crate::resource::texture::{TextureDescription, TextureShape};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextureTarget {
    D1,
    D1Array,
    D2,
    D2Array,
    Cube,
    CubeArray,
    D3,
}

impl TextureTarget {
    pub fn select(description: &TextureDescription) -> Result<Self> {
        let layers = description.array_layer_count;

        let target = match description.shape {
            TextureShape::OneDimensional => {
                if description.is_cubemap {
                    return Err(Error::new("One dimensional cubemaps are not supported").into());
                }

                if layers > 1 {
                    TextureTarget::D1Array
                } else {
                    TextureTarget::D1
                }
            }
            TextureShape::TwoDimensional => {
                if description.is_cubemap {
                    if layers == 0 || layers % 6 != 0 {
                        return Err(Error::new(format!(
                            "The cubemap layer count is not a multiple of six: {layers}"
                        ))
                        .into());
                    }

                    if description.width != description.height {
                        return Err(Error::new(format!(
                            "Cubemap faces must be square: {}x{}",
                            description.width, description.height
                        ))
                        .into());
                    }

                    if layers > 6 {
                        TextureTarget::CubeArray
                    } else {
                        TextureTarget::Cube
                    }
                } else if layers > 1 {
                    TextureTarget::D2Array
                } else {
                    TextureTarget::D2
                }
            }
            TextureShape::ThreeDimensional => {
                if description.is_cubemap || layers > 1 {
                    return Err(Error::new(format!(
                        "Volume textures cannot have array layers or cubemap faces (layers={layers})"
                    ))
                    .into());
                }

                TextureTarget::D3
            }
        };

        if target != TextureTarget::D3 && description.depth > 1 {
            return Err(Error::new(format!(
                "Only volume textures can have a depth greater than one: {}",
                description.depth
            ))
            .into());
        }

        Ok(target)
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            TextureTarget::D1Array | TextureTarget::D2Array | TextureTarget::CubeArray
        )
    }

    /// wgpu restricts 1D textures to a single mip and layer, so 1D targets are stored as 2D rows.
    pub fn gpu_dimension(&self) -> wgpu::TextureDimension {
        match self {
            TextureTarget::D3 => wgpu::TextureDimension::D3,
            _ => wgpu::TextureDimension::D2,
        }
    }

    pub fn view_dimension(&self) -> wgpu::TextureViewDimension {
        match self {
            TextureTarget::D1 | TextureTarget::D2 => wgpu::TextureViewDimension::D2,
            TextureTarget::D1Array | TextureTarget::D2Array => wgpu::TextureViewDimension::D2Array,
            TextureTarget::Cube => wgpu::TextureViewDimension::Cube,
            TextureTarget::CubeArray => wgpu::TextureViewDimension::CubeArray,
            TextureTarget::D3 => wgpu::TextureViewDimension::D3,
        }
    }

    pub fn storage_extent(&self, description: &TextureDescription) -> wgpu::Extent3d {
        let (height, depth_or_array_layers) = match self {
            TextureTarget::D1 => (1, 1),
            TextureTarget::D1Array => (1, description.array_layer_count),
            TextureTarget::D2 => (description.height, 1),
            TextureTarget::D2Array | TextureTarget::Cube | TextureTarget::CubeArray => {
                (description.height, description.array_layer_count)
            }
            TextureTarget::D3 => (description.height, description.depth),
        };

        wgpu::Extent3d {
            width: description.width,
            height,
            depth_or_array_layers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::texture::PixelFormat;

    fn description(
        shape: TextureShape,
        (width, height, depth): (u32, u32, u32),
        array_layer_count: u32,
        is_cubemap: bool,
    ) -> TextureDescription {
        TextureDescription {
            shape,
            width,
            height,
            depth,
            mip_level_count: 1,
            array_layer_count,
            is_cubemap,
            format: PixelFormat::Rgba8Unorm,
        }
    }

    #[test]
    fn test_one_dimensional_targets() {
        let single = description(TextureShape::OneDimensional, (64, 1, 1), 1, false);
        let array = description(TextureShape::OneDimensional, (64, 1, 1), 3, false);

        assert_eq!(TextureTarget::select(&single).unwrap(), TextureTarget::D1);
        assert_eq!(TextureTarget::select(&array).unwrap(), TextureTarget::D1Array);
        assert!(TextureTarget::D1Array.is_array());
        assert_eq!(
            TextureTarget::D1Array.storage_extent(&array),
            wgpu::Extent3d {
                width: 64,
                height: 1,
                depth_or_array_layers: 3
            }
        );
        assert_eq!(TextureTarget::D1.gpu_dimension(), wgpu::TextureDimension::D2);
    }

    #[test]
    fn test_two_dimensional_targets() {
        let single = description(TextureShape::TwoDimensional, (32, 16, 1), 1, false);
        let array = description(TextureShape::TwoDimensional, (32, 16, 1), 4, false);

        assert_eq!(TextureTarget::select(&single).unwrap(), TextureTarget::D2);
        assert_eq!(TextureTarget::select(&array).unwrap(), TextureTarget::D2Array);
        assert_eq!(
            TextureTarget::D2Array.view_dimension(),
            wgpu::TextureViewDimension::D2Array
        );
        assert_eq!(TextureTarget::D2.storage_extent(&single).depth_or_array_layers, 1);
    }

    #[test]
    fn test_cubemap_targets() {
        let cube = description(TextureShape::TwoDimensional, (16, 16, 1), 6, true);
        let cube_array = description(TextureShape::TwoDimensional, (16, 16, 1), 18, true);

        assert_eq!(TextureTarget::select(&cube).unwrap(), TextureTarget::Cube);
        assert_eq!(
            TextureTarget::select(&cube_array).unwrap(),
            TextureTarget::CubeArray
        );
        assert!(!TextureTarget::Cube.is_array());
        assert!(TextureTarget::CubeArray.is_array());
        assert_eq!(
            TextureTarget::CubeArray
                .storage_extent(&cube_array)
                .depth_or_array_layers,
            18
        );
    }

    #[test]
    fn test_invalid_cubemaps_are_rejected() {
        let partial = description(TextureShape::TwoDimensional, (16, 16, 1), 4, true);
        let not_square = description(TextureShape::TwoDimensional, (16, 8, 1), 6, true);
        let one_dimensional = description(TextureShape::OneDimensional, (16, 1, 1), 6, true);

        assert!(TextureTarget::select(&partial).is_err());
        assert!(TextureTarget::select(&not_square).is_err());
        assert!(TextureTarget::select(&one_dimensional).is_err());
    }

    #[test]
    fn test_volume_target() {
        let volume = description(TextureShape::ThreeDimensional, (8, 8, 4), 1, false);
        let volume_array = description(TextureShape::ThreeDimensional, (8, 8, 4), 2, false);

        assert_eq!(TextureTarget::select(&volume).unwrap(), TextureTarget::D3);
        assert_eq!(
            TextureTarget::D3.storage_extent(&volume),
            wgpu::Extent3d {
                width: 8,
                height: 8,
                depth_or_array_layers: 4
            }
        );
        assert!(TextureTarget::select(&volume_array).is_err());
    }

    #[test]
    fn test_depth_outside_volume_is_rejected() {
        let flat = description(TextureShape::TwoDimensional, (8, 8, 2), 1, false);

        assert!(TextureTarget::select(&flat).is_err());
    }
}
