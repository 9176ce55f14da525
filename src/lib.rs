//! This crate animates sprites cut from a single sprite sheet.
//!
//! `bevy_afichmation` introduces the [`Animator`](crate::animator::Animator): a sprite that owns its sprite sheet,
//! a set of named [`Animation`](crate::animation::Animation)s and a clock. Each animation is an ordered list of
//! logical frame indices into the sheet, a playback rate and a loop flag. The sheet is read as a row-major grid
//! of equally sized cells, so frame `12` of a sheet ten cells wide is the third cell of the second row.
//!
//! ```rust,no_run
//! # use bevy_afichmation::prelude::*;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut animator = Animator::new("spritesheet.png", true, 26, 30)?;
//! animator.add("idle", [0, 1, 2, 1, 0], 8.0, true)?;
//! animator.add("run", [3, 4, 5, 4], 8.0, true)?;
//! animator.add("jump", [6], 8.0, false)?;
//! animator.play("idle")?;
//!
//! loop {
//!     /* poll input, then */
//!     animator.update();
//!     /* draw animator.sprite() with animator.texture() at animator.transform() */
//! }
//! # }
//! ```
//!
//! Inside a bevy [`App`](::bevy::app::App), add the [`AfichmationPlugin`] and spawn a
//! [`TimedAnimator`](crate::animator::TimedAnimator) together with a [`SpriteBundle`](::bevy::sprite::SpriteBundle).
//! The plugin uploads the sheet into the bundle's texture handle, ticks the animator with [`Time`] and keeps the
//! sprite rect and transform in sync.
//!
//! The animator owns the sprite's [`Transform`]: it is copied onto the entity every frame, so move, scale and
//! rotate the sprite through the animator (for example [`Animator::translate`](crate::animator::Animator::translate)),
//! not by writing the entity's [`Transform`].
//!
//! ```rust,no_run
//! # use bevy::prelude::*;
//! # use bevy::time::Stopwatch;
//! # use bevy_afichmation::prelude::*;
//! #
//! fn setup(mut commands: Commands) {
//!     let mut animator =
//!         TimedAnimator::load_with_clock("spritesheet.png", true, 26, 30, Stopwatch::new()).unwrap();
//!     animator.add("idle", [0, 1, 2, 1, 0], 8.0, true).unwrap();
//!     animator.play("idle").unwrap();
//!     commands.spawn((animator, SpriteBundle::default()));
//! }
//! #
//! # fn main() {
//! #     App::new().add_plugins(AfichmationPlugin).add_systems(Startup, setup);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(unused_imports, missing_docs)]

use bevy::{
    asset::Assets,
    prelude::{
        Added, App, Commands, Entity, Image, Plugin, Query, Res, ResMut, Sprite, Time, Transform,
        Update,
    },
};

use crate::animator::TimedAnimator;

pub mod animation;
pub mod animator;
pub mod asset_loader;
pub mod clock;
pub mod serde;

/// Uploads and animates every [`TimedAnimator`] in the app.
pub struct AfichmationPlugin;

impl Plugin for AfichmationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (upload_animator_textures, animate_sprites));
    }
}

/// Adds the sprite sheet of each new [`TimedAnimator`] to [`Assets<Image>`] and inserts the handle on its entity.
pub fn upload_animator_textures(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    query: Query<(Entity, &TimedAnimator), Added<TimedAnimator>>,
) {
    for (entity, animator) in &query {
        let handle = images.add(animator.texture().clone());
        commands.entity(entity).insert(handle);
    }
}

/// Ticks each [`TimedAnimator`] with the frame delta, updates it and copies its
/// source rect and transform onto the entity.
///
/// The entity's [`Transform`] is overwritten every frame; changes made to it by other systems are lost.
/// Move the sprite with [`Animator::set_position`](crate::animator::Animator::set_position) or
/// [`Animator::translate`](crate::animator::Animator::translate) instead.
pub fn animate_sprites(
    time: Res<Time>,
    mut query: Query<(
        &mut TimedAnimator,
        Option<&mut Sprite>,
        Option<&mut Transform>,
    )>,
) {
    for (mut animator, sprite, transform) in &mut query {
        animator.tick(time.delta());
        animator.update();

        if let Some(mut sprite) = sprite {
            sprite.rect = Some(animator.source_rect().as_rect());
        }
        if let Some(mut transform) = transform {
            *transform = *animator.transform();
        }
    }
}

/// `use bevy_afichmation::prelude::*;` to import common types and plugins.
pub mod prelude {
    pub use crate::{
        animation::{Animation, AnimationError},
        animator::{Animator, TimedAnimator},
        asset_loader::SpriteSheetLoaderError,
        clock::{FrameClock, WallClock},
        serde::AnimatorSettings,
        AfichmationPlugin,
    };
}
