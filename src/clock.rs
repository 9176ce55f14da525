//! Time sources that drive frame advancement.

use std::time::{Duration, Instant};

use bevy::time::Stopwatch;

/// A restartable elapsed-time source.
///
/// The [`Animator`](crate::animator::Animator) reads [`elapsed_secs`](FrameClock::elapsed_secs)
/// once per update and calls [`restart`](FrameClock::restart) whenever it advances a frame.
pub trait FrameClock: Send + Sync + 'static {
    /// Seconds since construction or the last restart.
    fn elapsed_secs(&self) -> f32;

    /// Starts measuring from zero again.
    fn restart(&mut self);

    /// Feeds externally measured time into the clock. Clocks that measure time
    /// themselves ignore this.
    fn tick(&mut self, _delta: Duration) {}
}

/// Monotonic clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    started: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl FrameClock for WallClock {
    fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    fn restart(&mut self) {
        self.started = Instant::now();
    }
}

/// Clock that only moves when ticked, usually with [`Time::delta`](bevy::time::Time::delta).
impl FrameClock for Stopwatch {
    fn elapsed_secs(&self) -> f32 {
        Stopwatch::elapsed_secs(self)
    }

    fn restart(&mut self) {
        self.reset();
    }

    fn tick(&mut self, delta: Duration) {
        Stopwatch::tick(self, delta);
    }
}
