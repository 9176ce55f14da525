//! Walks a character around with the keyboard.
//!
//! A / D run left / right, W climbs stairs, S jumps, Z / X grow / shrink the sprite
//! and R / Q rotate it. Pass the sprite sheet path as first argument; frames are 26x30.

use bevy::{prelude::*, time::Stopwatch};
use bevy_afichmation::prelude::*;

const DEFAULT_SHEET: &str = "assets/spritesheet.png";

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Afichmation".to_string(),
                        resolution: (640.0, 480.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()), // prevents blurry sprites
        )
        .add_plugins(AfichmationPlugin)
        .insert_resource(ClearColor(Color::WHITE))
        .add_systems(Startup, setup)
        .add_systems(Update, control.before(bevy_afichmation::animate_sprites))
        .run();
}

fn setup(mut commands: Commands, mut exit: EventWriter<bevy::app::AppExit>) {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SHEET.to_string());

    let mut animator = match TimedAnimator::load_with_clock(&path, true, 26, 30, Stopwatch::new())
    {
        Ok(animator) => animator,
        Err(err) => {
            error!("Could not load {path}: {err}");
            exit.send(bevy::app::AppExit);
            return;
        }
    };

    for (name, frames, fps, looping) in [
        ("idle", vec![0, 1, 2, 1, 0], 8.0, true),
        ("run", vec![3, 4, 5, 4], 8.0, true),
        ("jump", vec![6], 8.0, false),
        ("stairs", vec![7, 8], 8.0, true),
    ] {
        if let Err(err) = animator.add(name, frames, fps, looping) {
            error!("{err}");
        }
    }
    if let Err(err) = animator.play("idle") {
        error!("{err}");
    }
    animator.set_scale(Vec2::splat(2.0));

    commands.spawn(Camera2dBundle::default());
    commands.spawn((animator, SpriteBundle::default()));
}

fn control(keyboard: Res<ButtonInput<KeyCode>>, mut query: Query<&mut TimedAnimator>) {
    for mut animator in &mut query {
        let animation = if keyboard.pressed(KeyCode::KeyA) {
            animator.flip_x(true);
            animator.translate(Vec2::new(-2.0, 0.0));
            "run"
        } else if keyboard.pressed(KeyCode::KeyD) {
            animator.flip_x(false);
            animator.translate(Vec2::new(2.0, 0.0));
            "run"
        } else {
            "idle"
        };
        let animation = if keyboard.pressed(KeyCode::KeyW) {
            animator.flip_y(true);
            animator.translate(Vec2::new(0.0, 1.0));
            "stairs"
        } else if keyboard.pressed(KeyCode::KeyS) {
            animator.flip_y(false);
            animator.translate(Vec2::new(0.0, -4.0));
            "jump"
        } else {
            animation
        };
        // Unknown names are already logged by the animator.
        let _ = animator.play(animation);

        let size = animator.scale().x.abs();
        if keyboard.pressed(KeyCode::KeyZ) {
            animator.set_scale(Vec2::splat(size + 1.0));
        }
        if keyboard.pressed(KeyCode::KeyX) {
            animator.set_scale(Vec2::splat(size - 1.0));
        }
        if keyboard.pressed(KeyCode::KeyR) {
            animator.rotate(-1.0_f32.to_radians());
        }
        if keyboard.pressed(KeyCode::KeyQ) {
            animator.rotate(1.0_f32.to_radians());
        }
    }
}
