//! Per-reaction playback settings.

use serde::{Deserialize, Serialize};

use crate::ease::EaseMode;
use crate::error::ReactorError;
use crate::time::Timescale;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayDirection {
    /// Progress runs 0 → 1
    #[default]
    Forward,
    /// Progress runs 1 → 0
    Reverse,
}

impl PlayDirection {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Progress a play-through in this direction starts from.
    #[inline]
    pub fn start_progress(self) -> f32 {
        match self {
            Self::Forward => 0.0,
            Self::Reverse => 1.0,
        }
    }

    /// Progress a play-through in this direction ends at.
    #[inline]
    pub fn end_progress(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => 0.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopType {
    /// Every iteration replays in the same direction.
    #[default]
    Restart,
    /// Every iteration flips direction.
    PingPong,
}

/// Loop count meaning infinite repeats.
pub const INFINITE_LOOPS: i32 = -1;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionSettings {
    /// Seconds for one play-through (0 → 1).
    pub duration: f32,
    /// Seconds waited after `play` before interpolation starts.
    pub start_delay: f32,
    /// -1 infinite, 0 play once, N > 0 additional repeats.
    pub loops: i32,
    /// Seconds waited before each repeat.
    pub loop_delay: f32,
    pub loop_type: LoopType,
    pub ease: EaseMode,
    pub timescale: Timescale,
}

impl Default for ReactionSettings {
    fn default() -> Self {
        Self {
            duration: 1.0,
            start_delay: 0.0,
            loops: 0,
            loop_delay: 0.0,
            loop_type: LoopType::Restart,
            ease: EaseMode::default(),
            timescale: Timescale::Dependent,
        }
    }
}

impl ReactionSettings {
    #[inline]
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    #[inline]
    pub fn with_start_delay(mut self, delay: f32) -> Self {
        self.start_delay = delay;
        self
    }

    #[inline]
    pub fn with_loops(mut self, loops: i32) -> Self {
        self.loops = loops;
        self
    }

    #[inline]
    pub fn with_loop_delay(mut self, delay: f32) -> Self {
        self.loop_delay = delay;
        self
    }

    #[inline]
    pub fn with_loop_type(mut self, loop_type: LoopType) -> Self {
        self.loop_type = loop_type;
        self
    }

    #[inline]
    pub fn with_ease(mut self, ease: impl Into<EaseMode>) -> Self {
        self.ease = ease.into();
        self
    }

    #[inline]
    pub fn with_timescale(mut self, timescale: Timescale) -> Self {
        self.timescale = timescale;
        self
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.loops == INFINITE_LOOPS
    }

    /// Reject settings that cannot be played.
    pub fn validate(&self) -> Result<(), ReactorError> {
        non_negative("duration", self.duration)?;
        non_negative("start_delay", self.start_delay)?;
        non_negative("loop_delay", self.loop_delay)?;
        if self.loops < INFINITE_LOOPS {
            return Err(ReactorError::invalid(
                "loops",
                format!("must be -1 (infinite) or >= 0, got {}", self.loops),
            ));
        }
        if let EaseMode::Curve(curve) = &self.ease {
            curve.validate()?;
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ReactorError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ReactorError::invalid(
            field,
            format!("must be finite and >= 0, got {value}"),
        ));
    }
    Ok(())
}
