//! Host tick input and the progress stepping used by reactions.

use serde::{Deserialize, Serialize};

/// Which clock a reaction follows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timescale {
    /// Real (unscaled) time; keeps running while the game is slowed or paused.
    Independent,
    /// Scaled game time.
    #[default]
    Dependent,
}

/// Frame delta supplied by the host, in seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickDelta {
    pub scaled: f32,
    pub unscaled: f32,
}

impl TickDelta {
    /// Same delta on both clocks (time scale 1).
    #[inline]
    pub fn uniform(dt: f32) -> Self {
        Self {
            scaled: dt,
            unscaled: dt,
        }
    }

    #[inline]
    pub fn new(scaled: f32, unscaled: f32) -> Self {
        Self { scaled, unscaled }
    }

    /// Delta for the given clock; negative or non-finite values count as zero.
    #[inline]
    pub fn for_timescale(&self, timescale: Timescale) -> f32 {
        let dt = match timescale {
            Timescale::Independent => self.unscaled,
            Timescale::Dependent => self.scaled,
        };
        if dt.is_finite() {
            dt.max(0.0)
        } else {
            0.0
        }
    }

    /// Clamp both clocks to `max` seconds.
    #[inline]
    pub fn clamped(&self, max: f32) -> Self {
        Self {
            scaled: self.scaled.min(max),
            unscaled: self.unscaled.min(max),
        }
    }
}

/// Result of moving progress toward a target for some time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Step {
    pub progress: f32,
    /// Seconds left over after reaching the target; zero if not reached.
    pub overflow: f32,
    pub reached: bool,
}

/// Move linear `progress` toward `target` at `1 / duration` per second.
///
/// A non-positive duration reaches the target immediately without consuming
/// time.
pub(crate) fn step_progress(progress: f32, target: f32, dt: f32, duration: f32) -> Step {
    let distance = (target - progress).abs();
    if duration <= 0.0 || distance <= f32::EPSILON {
        return Step {
            progress: target,
            overflow: if duration <= 0.0 { 0.0 } else { dt },
            reached: true,
        };
    }
    let needed = distance * duration;
    if dt >= needed {
        Step {
            progress: target,
            overflow: dt - needed,
            reached: true,
        }
    } else {
        let moved = dt / duration;
        let progress = if target > progress {
            progress + moved
        } else {
            progress - moved
        };
        Step {
            progress,
            overflow: 0.0,
            reached: false,
        }
    }
}
