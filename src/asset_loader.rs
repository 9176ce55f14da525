//! This module handles loading a sprite sheet image from disk and checking that it can be cut
//! into a grid of equally sized frames.
//!
//! A sprite sheet is read row-major: cells of `frame_size` are packed left to right, top to bottom,
//! and a logical frame index names one of those cells.

use std::path::Path;

use bevy::{
    log::debug,
    math::UVec2,
    render::{
        render_asset::RenderAssetUsages,
        texture::{CompressedImageFormats, Image, ImageSampler, ImageType, TextureError},
    },
};
use thiserror::Error;

/// Possible errors that can be produced while loading a sprite sheet or its settings.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SpriteSheetLoaderError {
    /// An [IOError](std::io::Error).
    #[error("Could not load file: {0}")]
    IoError(#[from] std::io::Error),
    /// A [`TextureError`].
    #[error("Could not decode image: {0}")]
    TextureError(#[from] TextureError),
    /// A MissingExtensionError.
    #[error("Could not determine image format of {0}")]
    MissingExtensionError(String),
    /// An InvalidFrameSizeError.
    #[error("Frame size {0} must not be zero")]
    InvalidFrameSizeError(UVec2),
    /// A DegenerateSheetError.
    #[error("Sprite sheet {0} of size {1} can not be divided into frames of size {2}")]
    DegenerateSheetError(String, UVec2, UVec2),
    /// A [RonSpannedError](ron::error::SpannedError).
    #[error("Could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
}

/// Reads and decodes the image at `path`. The format is picked from the file extension.
pub fn load_sprite_sheet(path: impl AsRef<Path>) -> Result<Image, SpriteSheetLoaderError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .ok_or_else(|| SpriteSheetLoaderError::MissingExtensionError(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    let image = Image::from_buffer(
        &bytes,
        ImageType::Extension(extension),
        CompressedImageFormats::NONE,
        true,
        ImageSampler::Default,
        RenderAssetUsages::default(),
    )?;

    debug!("Loaded sprite sheet {} of size {}", path.display(), image.size());
    Ok(image)
}

/// Checks that `image` can be cut into whole columns of `frame_size` and holds at least one row.
///
/// Returns the number of cells in the sheet. `label` only shows up in the error.
pub fn validate_sprite_sheet(
    image: &Image,
    frame_size: UVec2,
    label: &str,
) -> Result<u32, SpriteSheetLoaderError> {
    if frame_size.x == 0 || frame_size.y == 0 {
        return Err(SpriteSheetLoaderError::InvalidFrameSizeError(frame_size));
    }

    let sheet_size = image.size();
    if sheet_size.x < frame_size.x
        || sheet_size.y < frame_size.y
        || sheet_size.x % frame_size.x != 0
    {
        return Err(SpriteSheetLoaderError::DegenerateSheetError(
            label.to_string(),
            sheet_size,
            frame_size,
        ));
    }

    let columns = sheet_size.x / frame_size.x;
    let rows = sheet_size.y / frame_size.y;
    Ok(columns * rows)
}

#[cfg(test)]
mod tests {
    use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

    use super::*;

    fn sheet(width: u32, height: u32) -> Image {
        Image::new_fill(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[255, 255, 255, 255],
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn counts_cells_of_whole_grid() {
        let cells = validate_sprite_sheet(&sheet(260, 60), UVec2::new(26, 30), "sheet").unwrap();

        assert_eq!(cells, 20);
    }

    #[test]
    fn partial_last_row_is_ignored() {
        let cells = validate_sprite_sheet(&sheet(260, 45), UVec2::new(26, 30), "sheet").unwrap();

        assert_eq!(cells, 10);
    }

    #[test]
    fn rejects_width_not_divisible_by_frame_width() {
        let result = validate_sprite_sheet(&sheet(250, 30), UVec2::new(26, 30), "sheet");

        assert!(matches!(
            result,
            Err(SpriteSheetLoaderError::DegenerateSheetError(_, _, _))
        ));
    }

    #[test]
    fn rejects_sheet_smaller_than_a_frame() {
        let result = validate_sprite_sheet(&sheet(26, 20), UVec2::new(26, 30), "sheet");

        assert!(matches!(
            result,
            Err(SpriteSheetLoaderError::DegenerateSheetError(_, _, _))
        ));
    }

    #[test]
    fn rejects_zero_frame_size() {
        let result = validate_sprite_sheet(&sheet(26, 30), UVec2::new(0, 30), "sheet");

        assert!(matches!(
            result,
            Err(SpriteSheetLoaderError::InvalidFrameSizeError(_))
        ));
    }

    #[test]
    fn missing_extension_is_reported() {
        let result = load_sprite_sheet("spritesheet");

        assert!(matches!(
            result,
            Err(SpriteSheetLoaderError::MissingExtensionError(_))
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = load_sprite_sheet("does/not/exist.png");

        assert!(matches!(result, Err(SpriteSheetLoaderError::IoError(_))));
    }
}
