use anyhow::Result;

use crate::error::Error;
use crate::resource::texture::{PixelFormat, TextureDescription, TextureShape};

pub fn mip_extent(base: u32, mip_level: u32) -> u32 {
    base.checked_shr(mip_level).unwrap_or(0).max(1)
}

/// Number of levels in a full mip chain for the given extent.
pub fn max_mip_level_count(width: u32, height: u32, depth: u32) -> u32 {
    32 - width.max(height).max(depth).leading_zeros()
}

fn extent_too_large(format: PixelFormat, width: u32, height: u32, depth: u32) -> anyhow::Error {
    Error::new(format!(
        "The texture extent is too large: {width}x{height}x{depth} of {format:?}"
    ))
    .into()
}

/// Width and height of a mip level rounded up to whole blocks.
pub fn physical_extent(format: PixelFormat, width: u32, height: u32) -> Result<(u32, u32)> {
    let (block_width, block_height) = format.block_dimensions();

    match (
        width.div_ceil(block_width).checked_mul(block_width),
        height.div_ceil(block_height).checked_mul(block_height),
    ) {
        (Some(physical_width), Some(physical_height)) => Ok((physical_width, physical_height)),
        _ => Err(extent_too_large(format, width, height, 1)),
    }
}

pub fn bytes_per_row(format: PixelFormat, width: u32) -> Result<u32> {
    let (block_width, _) = format.block_dimensions();

    width
        .div_ceil(block_width)
        .checked_mul(format.block_size())
        .ok_or_else(|| extent_too_large(format, width, 1, 1))
}

pub fn rows_per_image(format: PixelFormat, height: u32) -> u32 {
    let (_, block_height) = format.block_dimensions();
    height.div_ceil(block_height)
}

pub fn subresource_size(format: PixelFormat, width: u32, height: u32, depth: u32) -> Result<usize> {
    (bytes_per_row(format, width)? as usize)
        .checked_mul(rows_per_image(format, height) as usize)
        .and_then(|size| size.checked_mul(depth as usize))
        .ok_or_else(|| extent_too_large(format, width, height, depth))
}

/// Extent of the given mip level as (width, height, depth).
pub fn level_extent(description: &TextureDescription, mip_level: u32) -> (u32, u32, u32) {
    let depth = match description.shape {
        TextureShape::ThreeDimensional => mip_extent(description.depth, mip_level),
        _ => 1,
    };

    (
        mip_extent(description.width, mip_level),
        mip_extent(description.height, mip_level),
        depth,
    )
}

pub fn level_size(description: &TextureDescription, mip_level: u32) -> Result<usize> {
    let (width, height, depth) = level_extent(description, mip_level);
    subresource_size(description.format, width, height, depth)
}

fn levels_size(description: &TextureDescription, mip_level_count: u32) -> Result<usize> {
    (0..mip_level_count).try_fold(0usize, |size, mip_level| {
        size.checked_add(level_size(description, mip_level)?)
            .ok_or_else(|| {
                extent_too_large(
                    description.format,
                    description.width,
                    description.height,
                    description.depth,
                )
            })
    })
}

/// Bytes occupied by one layer together with its whole mip chain.
pub fn layer_stride(description: &TextureDescription) -> Result<usize> {
    levels_size(description, description.mip_level_count)
}

pub fn total_size(description: &TextureDescription) -> Result<usize> {
    layer_stride(description)?
        .checked_mul(description.array_layer_count as usize)
        .ok_or_else(|| {
            Error::new(format!(
                "The texture has too many layers: {}",
                description.array_layer_count
            ))
            .into()
        })
}

fn check_subresource(description: &TextureDescription, layer: u32, mip_level: u32) -> Result<()> {
    if layer >= description.array_layer_count {
        return Err(Error::new(format!(
            "Layer {layer} is out of range (layers={})",
            description.array_layer_count
        ))
        .into());
    }

    if mip_level >= description.mip_level_count {
        return Err(Error::new(format!(
            "Mip level {mip_level} is out of range (levels={})",
            description.mip_level_count
        ))
        .into());
    }

    Ok(())
}

/// Byte offset of a subresource in DDS storage order: layers outermost, mip levels inside.
pub fn subresource_offset(
    description: &TextureDescription,
    layer: u32,
    mip_level: u32,
) -> Result<usize> {
    check_subresource(description, layer, mip_level)?;

    let preceding_layers = layer_stride(description)?
        .checked_mul(layer as usize)
        .ok_or_else(|| Error::new(format!("Layer {layer} lies beyond the addressable payload")))?;

    preceding_layers
        .checked_add(levels_size(description, mip_level)?)
        .ok_or_else(|| {
            Error::new(format!(
                "Subresource (layer={layer}, mip_level={mip_level}) lies beyond the addressable payload"
            ))
            .into()
        })
}

/// Destination and data layout for copying one subresource into GPU storage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CopyRegion {
    /// Array layer (or cubemap face) written, used as the origin's z coordinate.
    pub origin_z: u32,
    pub bytes_per_row: u32,
    pub rows_per_image: u32,
    /// Block-rounded width.
    pub width: u32,
    /// Block-rounded height.
    pub height: u32,
    pub depth: u32,
}

pub fn copy_region(
    description: &TextureDescription,
    layer: u32,
    mip_level: u32,
) -> Result<CopyRegion> {
    check_subresource(description, layer, mip_level)?;

    let (width, height, depth) = level_extent(description, mip_level);
    let (physical_width, physical_height) = physical_extent(description.format, width, height)?;

    Ok(CopyRegion {
        origin_z: layer,
        bytes_per_row: bytes_per_row(description.format, width)?,
        rows_per_image: rows_per_image(description.format, height),
        width: physical_width,
        height: physical_height,
        depth,
    })
}
