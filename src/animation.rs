//! This module defines a single named animation: an ordered cycle of logical frame indices
//! with a playback rate and a loop policy.
//!
//! An [`Animation`] knows nothing about wall-clock time. It only moves its cursor when told to;
//! deciding *when* to advance is the job of the [`Animator`](crate::animator::Animator).

use thiserror::Error;

/// Possible errors that can be produced when registering or selecting an [`Animation`].
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum AnimationError {
    /// An EmptyFramesError.
    #[error("Animation {0} has no frames")]
    EmptyFramesError(String),
    /// An InvalidFrameRateError.
    #[error("Animation {0} has invalid frame rate {1}")]
    InvalidFrameRateError(String, f32),
    /// A FrameOutOfSheetError.
    #[error("Animation {0} references frame {1}, but the sprite sheet only has {2} cells")]
    FrameOutOfSheetError(String, u32, u32),
    /// An UnknownAnimationError.
    #[error("No animation named {0} is registered")]
    UnknownAnimationError(String),
}

/// A named, ordered cycle of logical frame indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    name: String,
    frames: Vec<u32>,
    fps: f32,
    looping: bool,
    cursor: usize,
}

impl Animation {
    /// Creates a new animation positioned on its first frame.
    ///
    /// Fails if `frames` is empty or `fps` is not a positive, finite number.
    pub fn new(
        name: impl Into<String>,
        frames: impl IntoIterator<Item = u32>,
        fps: f32,
        looping: bool,
    ) -> Result<Self, AnimationError> {
        let name = name.into();
        let frames: Vec<u32> = frames.into_iter().collect();

        if frames.is_empty() {
            return Err(AnimationError::EmptyFramesError(name));
        }
        if !fps.is_finite() || fps <= 0.0 {
            return Err(AnimationError::InvalidFrameRateError(name, fps));
        }

        Ok(Self {
            name,
            frames,
            fps,
            looping,
            cursor: 0,
        })
    }

    /// Moves the cursor one position forward.
    ///
    /// Past the last frame the cursor wraps to the start for looping animations
    /// and holds on the last frame otherwise.
    pub fn advance(&mut self) {
        let last = self.frames.len() - 1;
        self.cursor = if self.cursor < last {
            self.cursor + 1
        } else if self.looping {
            0
        } else {
            last
        };
    }

    /// Moves the cursor back to the first frame.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Logical frame index under the cursor.
    pub fn frame(&self) -> u32 {
        self.frames[self.cursor]
    }

    /// Position of the cursor inside [`frames`](Self::frames).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Name this animation is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All logical frame indices, in playback order.
    pub fn frames(&self) -> &[u32] {
        &self.frames
    }

    /// Playback rate in frames per second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Minimum time in seconds a frame stays visible.
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.fps
    }

    /// Whether the animation starts over after its last frame.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// True for a non-looping animation that reached its final pose.
    pub fn is_finished(&self) -> bool {
        !self.looping && self.cursor == self.frames.len() - 1
    }
}
