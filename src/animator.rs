//! This module defines the [`Animator`]: a sprite that owns a sprite sheet, a set of named
//! [`Animation`]s and a clock, and moves its visible frame over time.
//!
//! Call [`Animator::update`] once per rendered frame. Whenever the active animation's frame
//! duration has elapsed, the source rect is set to the animation's current frame and the
//! animation moves on to the next one. The frame shown during a tick was therefore selected at
//! the end of the previous advance.

use std::{collections::HashMap, path::Path};

use bevy::{
    ecs::component::Component,
    log::{debug, warn},
    math::{EulerRot, Quat, URect, UVec2, Vec2},
    render::texture::Image,
    sprite::Sprite,
    time::Stopwatch,
    transform::components::Transform,
};

use crate::{
    animation::{Animation, AnimationError},
    asset_loader::{load_sprite_sheet, validate_sprite_sheet, SpriteSheetLoaderError},
    clock::{FrameClock, WallClock},
    serde::AnimatorSettings,
};

/// An [`Animator`] driven by bevy's [`Time`](bevy::time::Time), as used by
/// [`AfichmationPlugin`](crate::AfichmationPlugin).
pub type TimedAnimator = Animator<Stopwatch>;

/// An animated sprite cut from a single sprite sheet.
#[derive(Component)]
pub struct Animator<C: FrameClock = WallClock> {
    texture: Image,
    cell_count: u32,
    frame_size: UVec2,
    looping: bool,
    animations: HashMap<String, Animation>,
    active: Option<String>,
    playing: bool,
    flip_x: bool,
    flip_y: bool,
    source_rect: URect,
    displayed_frame: u32,
    sprite: Sprite,
    transform: Transform,
    clock: C,
}

impl Animator<WallClock> {
    /// Loads the sprite sheet at `path` and cuts it into frames of `frame_width` x `frame_height`.
    pub fn new(
        path: impl AsRef<Path>,
        looping: bool,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, SpriteSheetLoaderError> {
        Self::load_with_clock(path, looping, frame_width, frame_height, WallClock::default())
    }

    /// Uses an already decoded sprite sheet.
    pub fn from_image(
        texture: Image,
        looping: bool,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, SpriteSheetLoaderError> {
        Self::with_clock(texture, looping, frame_width, frame_height, WallClock::default())
    }

    /// Builds an animator from [`AnimatorSettings`].
    pub fn from_settings(settings: &AnimatorSettings) -> Result<Self, SpriteSheetLoaderError> {
        Self::from_settings_with_clock(settings, WallClock::default())
    }
}

impl<C: FrameClock> Animator<C> {
    /// Like [`Animator::new`], timed by `clock`.
    pub fn load_with_clock(
        path: impl AsRef<Path>,
        looping: bool,
        frame_width: u32,
        frame_height: u32,
        clock: C,
    ) -> Result<Self, SpriteSheetLoaderError> {
        let path = path.as_ref();
        let texture = load_sprite_sheet(path)?;
        Self::build(
            texture,
            &path.display().to_string(),
            looping,
            UVec2::new(frame_width, frame_height),
            clock,
        )
    }

    /// Like [`Animator::from_image`], timed by `clock`.
    pub fn with_clock(
        texture: Image,
        looping: bool,
        frame_width: u32,
        frame_height: u32,
        clock: C,
    ) -> Result<Self, SpriteSheetLoaderError> {
        Self::build(
            texture,
            "<image>",
            looping,
            UVec2::new(frame_width, frame_height),
            clock,
        )
    }

    /// Like [`Animator::from_settings`], timed by `clock`.
    pub fn from_settings_with_clock(
        settings: &AnimatorSettings,
        clock: C,
    ) -> Result<Self, SpriteSheetLoaderError> {
        let mut animator = Self::load_with_clock(
            &settings.texture,
            settings.looping,
            settings.frame_size.x,
            settings.frame_size.y,
            clock,
        )?;

        let position = settings
            .position
            .unwrap_or_else(|| animator.frame_size().as_vec2() * settings.scale / 2.0);
        animator.set_scale(settings.scale);
        animator.set_position(position);
        animator.flip_x(settings.flip_x);
        animator.flip_y(settings.flip_y);
        animator.apply_mirroring();

        Ok(animator)
    }

    fn build(
        texture: Image,
        label: &str,
        looping: bool,
        frame_size: UVec2,
        mut clock: C,
    ) -> Result<Self, SpriteSheetLoaderError> {
        let cell_count = validate_sprite_sheet(&texture, frame_size, label)?;
        let source_rect = URect::from_corners(UVec2::ZERO, frame_size);

        let sprite = Sprite {
            rect: Some(source_rect.as_rect()),
            ..Default::default()
        };
        let transform = Transform::from_translation((frame_size.as_vec2() / 2.0).extend(0.0));

        clock.restart();

        Ok(Self {
            texture,
            cell_count,
            frame_size,
            looping,
            animations: HashMap::new(),
            active: None,
            playing: false,
            flip_x: false,
            flip_y: false,
            source_rect,
            displayed_frame: 0,
            sprite,
            transform,
            clock,
        })
    }

    /// Registers an animation under `name`. A previous animation with the same name is replaced;
    /// if that one was active, the new one is shown from its first frame right away.
    ///
    /// Every frame must name a cell inside the sprite sheet.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        frames: impl IntoIterator<Item = u32>,
        fps: f32,
        looping: bool,
    ) -> Result<(), AnimationError> {
        let animation = Animation::new(name, frames, fps, looping)?;

        if let Some(&frame) = animation
            .frames()
            .iter()
            .find(|&&frame| frame >= self.cell_count)
        {
            return Err(AnimationError::FrameOutOfSheetError(
                animation.name().to_string(),
                frame,
                self.cell_count,
            ));
        }

        let name = animation.name().to_string();
        if self.animations.insert(name.clone(), animation).is_some() {
            debug!("Replaced animation {name}");
            if self.active.as_deref() == Some(name.as_str()) {
                self.show_current_frame();
            }
        } else {
            debug!("Added animation {name}");
        }
        Ok(())
    }

    /// Starts playback of the animation registered under `name`.
    ///
    /// Switching to a different animation restarts it from its first frame and shows that frame
    /// right away. Playing the active animation again only keeps playback on.
    pub fn play(&mut self, name: &str) -> Result<(), AnimationError> {
        self.playing = true;

        if self.active.as_deref() == Some(name) {
            return Ok(());
        }

        let Some(animation) = self.animations.get_mut(name) else {
            warn!("Tried to play unknown animation {name}");
            return Err(AnimationError::UnknownAnimationError(name.to_string()));
        };
        animation.reset();

        debug!("Switched animation to {name}");
        self.active = Some(name.to_string());
        self.show_current_frame();
        Ok(())
    }

    /// Whether playback has been started. Does not tell which animation is playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether playback is on and `name` is the active animation.
    pub fn is_playing_animation(&self, name: &str) -> bool {
        self.playing && self.active.as_deref() == Some(name)
    }

    /// Mirrors the sprite horizontally, starting with the next [`update`](Self::update).
    pub fn flip_x(&mut self, flipped: bool) {
        self.flip_x = flipped;
    }

    /// Mirrors the sprite vertically, starting with the next [`update`](Self::update).
    pub fn flip_y(&mut self, flipped: bool) {
        self.flip_y = flipped;
    }

    /// Requested horizontal mirroring.
    pub fn is_flipped_x(&self) -> bool {
        self.flip_x
    }

    /// Requested vertical mirroring.
    pub fn is_flipped_y(&self) -> bool {
        self.flip_y
    }

    /// Advances the active animation once its frame duration has elapsed.
    pub fn update(&mut self) {
        self.apply_mirroring();

        if !self.playing {
            return;
        }
        let Some(frame_duration) = self.active_animation().map(Animation::frame_duration) else {
            return;
        };

        if self.clock.elapsed_secs() >= frame_duration {
            self.show_current_frame();
            self.clock.restart();
        }
    }

    /// Feeds externally measured time into the clock.
    pub fn tick(&mut self, delta: std::time::Duration) {
        self.clock.tick(delta);
    }

    /// Points the source rect at the active animation's frame, then moves the animation on.
    fn show_current_frame(&mut self) {
        let Some(animation) = self
            .active
            .as_deref()
            .and_then(|name| self.animations.get_mut(name))
        else {
            return;
        };

        let frame = animation.frame();
        animation.advance();

        self.source_rect = source_rect(frame, self.frame_size, self.texture.width());
        self.displayed_frame = frame;
        self.sprite.rect = Some(self.source_rect.as_rect());
    }

    /// Sets the sign of each scale axis to match the flip flags.
    fn apply_mirroring(&mut self) {
        let scale = &mut self.transform.scale;
        if self.flip_x == (scale.x > 0.0) {
            scale.x = -scale.x;
        }
        if self.flip_y == (scale.y > 0.0) {
            scale.y = -scale.y;
        }
    }

    /// The animation currently driving the displayed frame.
    pub fn active_animation(&self) -> Option<&Animation> {
        self.active
            .as_deref()
            .and_then(|name| self.animations.get(name))
    }

    /// Name of the active animation.
    pub fn current_animation(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Logical frame the source rect currently shows.
    pub fn current_frame(&self) -> u32 {
        self.displayed_frame
    }

    /// Looks up a registered animation.
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    /// All registered animations, in no particular order.
    pub fn animations(&self) -> impl Iterator<Item = &Animation> {
        self.animations.values()
    }

    /// Pixel rectangle of the sprite sheet currently mapped onto the sprite.
    pub fn source_rect(&self) -> URect {
        self.source_rect
    }

    /// Size in pixels of a single frame.
    pub fn frame_size(&self) -> UVec2 {
        self.frame_size
    }

    /// Number of frame cells in the sprite sheet.
    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    /// Animator level loop flag given at construction.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// The sprite sheet.
    pub fn texture(&self) -> &Image {
        &self.texture
    }

    /// The sprite, with its rect set to the current frame.
    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Position, scale and rotation of the sprite.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Position of the sprite's center.
    pub fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    /// Moves the sprite's center to `position`.
    pub fn set_position(&mut self, position: Vec2) {
        self.transform.translation = position.extend(self.transform.translation.z);
    }

    /// Moves the sprite by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        self.transform.translation += offset.extend(0.0);
    }

    /// Current scale, including the sign of any applied mirroring.
    pub fn scale(&self) -> Vec2 {
        self.transform.scale.truncate()
    }

    /// Sets the scale. Mirroring is reapplied on the next [`update`](Self::update).
    pub fn set_scale(&mut self, scale: Vec2) {
        self.transform.scale = scale.extend(self.transform.scale.z);
    }

    /// Rotation around the z axis in radians.
    pub fn rotation(&self) -> f32 {
        self.transform.rotation.to_euler(EulerRot::ZYX).0
    }

    /// Sets the rotation around the z axis in radians.
    pub fn set_rotation(&mut self, angle: f32) {
        self.transform.rotation = Quat::from_rotation_z(angle);
    }

    /// Rotates around the z axis by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        self.transform.rotate_z(angle);
    }
}

/// Maps a logical frame index to its cell in a row-major sheet `texture_width` pixels wide.
fn source_rect(frame: u32, frame_size: UVec2, texture_width: u32) -> URect {
    let columns = (texture_width / frame_size.x).max(1);
    let min = UVec2::new(frame % columns, frame / columns) * frame_size;
    URect::from_corners(min, min + frame_size)
}
