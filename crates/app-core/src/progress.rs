//! The single smoothed blend scalar between the two configurations.

use crate::constants::PROGRESS_RATE_PER_SEC;
use crate::ease::approach;

/// Binary target configuration. There is no intermediate mode; blending
/// between the two lives in [`ProgressController`], not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Chaos,
    Formed,
}

impl Mode {
    /// Progress value this mode pulls toward.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            Mode::Chaos => 0.0,
            Mode::Formed => 1.0,
        }
    }

    #[inline]
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Chaos => Mode::Formed,
            Mode::Formed => Mode::Chaos,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Chaos => "CHAOS",
            Mode::Formed => "FORMED",
        }
    }
}

/// Owns the process-wide progress scalar in [0, 1].
///
/// The value is never set directly; each frame it approaches the current
/// mode's target through a first-order low-pass filter, so transition time
/// shrinks as the remaining distance shrinks. The mode may flip at any
/// point mid-transition and the value simply reverses course.
pub struct ProgressController {
    mode: Mode,
    value: f32,
}

impl ProgressController {
    /// Starts already converged on `mode` so nothing animates on load.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            value: mode.target(),
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn toggle(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Current blend value: 0 is fully scattered, 1 is fully formed.
    /// Asymptotic — consumers gating discrete effects should compare
    /// against a threshold, not equality with 0 or 1.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance one frame.
    pub fn tick(&mut self, dt_sec: f32) {
        debug_assert!((0.0..=1.0).contains(&self.value));
        self.value = approach(
            self.value,
            self.mode.target(),
            dt_sec,
            PROGRESS_RATE_PER_SEC,
        );
    }
}
