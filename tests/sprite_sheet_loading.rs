use std::path::{Path, PathBuf};

use bevy::math::{UVec2, Vec2};
use bevy_afichmation::prelude::*;
use tempfile::TempDir;

fn write_sheet(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 255, 255]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn loads_sheet_from_png() {
    let dir = TempDir::new().unwrap();
    let path = write_sheet(dir.path(), "spritesheet.png", 260, 60);

    let mut animator = Animator::new(&path, true, 26, 30).unwrap();

    assert_eq!(animator.texture().size(), UVec2::new(260, 60));
    assert_eq!(animator.cell_count(), 20);

    animator.add("ladder", [12, 13], 8.0, true).unwrap();
    animator.play("ladder").unwrap();
    assert_eq!(animator.current_frame(), 12);
    assert_eq!(animator.source_rect().min, UVec2::new(52, 30));
    assert_eq!(animator.source_rect().max, UVec2::new(78, 60));
}

#[test]
fn unreadable_path_fails() {
    let dir = TempDir::new().unwrap();

    let result = Animator::new(dir.path().join("missing.png"), true, 26, 30);

    assert!(matches!(result, Err(SpriteSheetLoaderError::IoError(_))));
}

#[test]
fn invalid_image_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let result = Animator::new(&path, true, 26, 30);

    assert!(matches!(result, Err(SpriteSheetLoaderError::TextureError(_))));
}

#[test]
fn sheet_not_divisible_into_frames_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_sheet(dir.path(), "uneven.png", 250, 30);

    let result = Animator::new(&path, true, 26, 30);

    assert!(matches!(
        result,
        Err(SpriteSheetLoaderError::DegenerateSheetError(_, _, _))
    ));
}

#[test]
fn builds_animator_from_settings_file() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(dir.path(), "player.png", 260, 30);
    let settings_path = dir.path().join("player.ron");
    std::fs::write(
        &settings_path,
        format!(
            r#"(
                texture: {:?},
                frame_size: (26, 30),
                looping: true,
                scale: (2.0, 2.0),
                flip_x: true,
            )"#,
            sheet.display().to_string()
        ),
    )
    .unwrap();

    let settings = AnimatorSettings::load(&settings_path).unwrap();
    let animator = Animator::from_settings(&settings).unwrap();

    assert!(animator.is_looping());
    assert!(animator.is_flipped_x());
    assert_eq!(animator.scale(), Vec2::new(-2.0, 2.0));
    assert_eq!(animator.position(), Vec2::new(26.0, 30.0));
    assert_eq!(animator.cell_count(), 10);
}

#[test]
fn settings_position_overrides_default() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(dir.path(), "player.png", 52, 30);
    let mut settings = AnimatorSettings::new(sheet, UVec2::new(26, 30));
    settings.position = Some(Vec2::new(100.0, 40.0));

    let animator = Animator::from_settings(&settings).unwrap();

    assert_eq!(animator.position(), Vec2::new(100.0, 40.0));
    assert_eq!(animator.scale(), Vec2::ONE);
}
