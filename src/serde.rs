//! This module defines the construction settings of an [`Animator`](crate::animator::Animator),
//! usually read from a ron file.
//!
//! ### `player.ron`
//! ```rust,ignore
//! AnimatorSettings ( /* The explicit type name can be omitted */
//!     texture: "assets/spritesheet.png", /* Path to the sprite sheet image */
//!     frame_size: (26, 30), /* Size of a single frame cell */
//!     looping: true, /* This is optional; false by default */
//!     scale: (2.0, 2.0), /* This is optional; (1.0, 1.0) by default */
//!     position: Some((100.0, 50.0)), /* This is optional; half the scaled frame size by default */
//!     flip_x: false, /* This is optional; false by default */
//!     flip_y: false, /* This is optional; false by default */
//! )
//! ```
//!
//! Animations are not part of the settings; they are registered in code with
//! [`Animator::add`](crate::animator::Animator::add).

use std::path::{Path, PathBuf};

use glam::{UVec2, Vec2};
use serde::Deserialize;

use crate::asset_loader::SpriteSheetLoaderError;

/// Construction settings for an [`Animator`](crate::animator::Animator).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnimatorSettings {
    /// Path to the sprite sheet image.
    pub texture: PathBuf,
    /// Size in pixels of a single frame cell.
    pub frame_size: UVec2,
    /// Animator level loop flag.
    #[serde(default)]
    pub looping: bool,
    /// Initial scale of the sprite.
    #[serde(default = "default_scale")]
    pub scale: Vec2,
    /// Initial position of the sprite.
    #[serde(default)]
    pub position: Option<Vec2>,
    /// Initial horizontal mirroring.
    #[serde(default)]
    pub flip_x: bool,
    /// Initial vertical mirroring.
    #[serde(default)]
    pub flip_y: bool,
}

impl AnimatorSettings {
    /// Settings for `texture` cut into frames of `frame_size`, everything else default.
    pub fn new(texture: impl Into<PathBuf>, frame_size: UVec2) -> Self {
        Self {
            texture: texture.into(),
            frame_size,
            looping: false,
            scale: default_scale(),
            position: None,
            flip_x: false,
            flip_y: false,
        }
    }

    /// Parses settings from a ron string.
    pub fn from_ron(ron: &str) -> Result<Self, SpriteSheetLoaderError> {
        Ok(ron::de::from_str::<AnimatorSettings>(ron)?)
    }

    /// Reads and parses settings from a ron file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpriteSheetLoaderError> {
        let bytes = std::fs::read(path)?;
        Ok(ron::de::from_bytes::<AnimatorSettings>(&bytes)?)
    }
}

#[inline]
const fn default_scale() -> Vec2 {
    Vec2::ONE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let settings = AnimatorSettings::from_ron(
            r#"(
                texture: "spritesheet.png",
                frame_size: (26, 30),
            )"#,
        )
        .unwrap();

        assert_eq!(
            settings,
            AnimatorSettings::new("spritesheet.png", UVec2::new(26, 30))
        );
    }

    #[test]
    fn all_fields_are_read() {
        let settings = AnimatorSettings::from_ron(
            r#"AnimatorSettings(
                texture: "assets/player.png",
                frame_size: (16, 24),
                looping: true,
                scale: (2.0, 3.0),
                position: Some((10.0, 20.0)),
                flip_x: true,
                flip_y: true,
            )"#,
        )
        .unwrap();

        assert_eq!(settings.texture, PathBuf::from("assets/player.png"));
        assert_eq!(settings.frame_size, UVec2::new(16, 24));
        assert!(settings.looping);
        assert_eq!(settings.scale, Vec2::new(2.0, 3.0));
        assert_eq!(settings.position, Some(Vec2::new(10.0, 20.0)));
        assert!(settings.flip_x);
        assert!(settings.flip_y);
    }

    #[test]
    fn missing_frame_size_is_an_error() {
        let result = AnimatorSettings::from_ron(r#"(texture: "spritesheet.png")"#);

        assert!(matches!(
            result,
            Err(SpriteSheetLoaderError::RonSpannedError(_))
        ));
    }
}
