//! Tagged union over the supported channel types, so one animation can hold
//! reactions of mixed value types.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReactorError;
use crate::reaction::{Reaction, ReactionEvent, ReactionState};
use crate::settings::PlayDirection;
use crate::time::TickDelta;
use crate::value::{Color, Vec2, Vec3};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Float,
    Int,
    Vec2,
    Vec3,
    Color,
}

impl ChannelKind {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Color => "color",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelKind {
    type Err = ReactorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" => Ok(Self::Float),
            "int" => Ok(Self::Int),
            "vec2" => Ok(Self::Vec2),
            "vec3" => Ok(Self::Vec3),
            "color" => Ok(Self::Color),
            other => Err(ReactorError::UnknownChannel {
                name: other.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub enum AnyReaction {
    Float(Reaction<f32>),
    Int(Reaction<i32>),
    Vec2(Reaction<Vec2>),
    Vec3(Reaction<Vec3>),
    Color(Reaction<Color>),
}

macro_rules! dispatch {
    ($self:expr, $r:ident => $body:expr) => {
        match $self {
            AnyReaction::Float($r) => $body,
            AnyReaction::Int($r) => $body,
            AnyReaction::Vec2($r) => $body,
            AnyReaction::Vec3($r) => $body,
            AnyReaction::Color($r) => $body,
        }
    };
}

impl AnyReaction {
    #[inline]
    pub fn kind(&self) -> ChannelKind {
        match self {
            Self::Float(_) => ChannelKind::Float,
            Self::Int(_) => ChannelKind::Int,
            Self::Vec2(_) => ChannelKind::Vec2,
            Self::Vec3(_) => ChannelKind::Vec3,
            Self::Color(_) => ChannelKind::Color,
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        dispatch!(self, r => r.enabled)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        dispatch!(self, r => r.enabled = enabled)
    }

    #[inline]
    pub fn has_target(&self) -> bool {
        dispatch!(self, r => r.has_target())
    }

    #[inline]
    pub fn state(&self) -> ReactionState {
        dispatch!(self, r => r.state())
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        dispatch!(self, r => r.is_active())
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        dispatch!(self, r => r.is_paused())
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        dispatch!(self, r => r.progress())
    }

    pub fn play(&mut self, direction: PlayDirection) {
        dispatch!(self, r => r.play(direction))
    }

    pub fn play_from_progress(&mut self, progress: f32) {
        dispatch!(self, r => r.play_from_progress(progress))
    }

    pub fn play_to_progress(&mut self, progress: f32) {
        dispatch!(self, r => r.play_to_progress(progress))
    }

    pub fn set_progress_at(&mut self, progress: f32) {
        dispatch!(self, r => r.set_progress_at(progress))
    }

    pub fn pause(&mut self) {
        dispatch!(self, r => r.pause())
    }

    pub fn resume(&mut self) {
        dispatch!(self, r => r.resume())
    }

    pub fn reverse(&mut self) {
        dispatch!(self, r => r.reverse())
    }

    pub fn stop(&mut self) {
        dispatch!(self, r => r.stop())
    }

    pub fn finish(&mut self) {
        dispatch!(self, r => r.finish())
    }

    pub fn rewind(&mut self) {
        dispatch!(self, r => r.rewind())
    }

    pub fn update_values(&mut self) {
        dispatch!(self, r => r.update_values())
    }

    pub fn advance(&mut self, delta: &TickDelta) {
        dispatch!(self, r => r.advance(delta))
    }

    pub(crate) fn take_events(&mut self) -> Vec<ReactionEvent> {
        dispatch!(self, r => r.take_events())
    }

    pub(crate) fn set_record_events(&mut self, record: bool) {
        dispatch!(self, r => r.set_record_events(record))
    }

    pub(crate) fn halt(&mut self) {
        dispatch!(self, r => r.halt())
    }
}

macro_rules! channel_access {
    ($variant:ident, $ty:ty, $as_ref:ident, $as_mut:ident) => {
        impl AnyReaction {
            #[inline]
            pub fn $as_ref(&self) -> Option<&Reaction<$ty>> {
                match self {
                    Self::$variant(r) => Some(r),
                    _ => None,
                }
            }

            #[inline]
            pub fn $as_mut(&mut self) -> Option<&mut Reaction<$ty>> {
                match self {
                    Self::$variant(r) => Some(r),
                    _ => None,
                }
            }
        }

        impl From<Reaction<$ty>> for AnyReaction {
            fn from(r: Reaction<$ty>) -> Self {
                Self::$variant(r)
            }
        }
    };
}

channel_access!(Float, f32, as_float, as_float_mut);
channel_access!(Int, i32, as_int, as_int_mut);
channel_access!(Vec2, Vec2, as_vec2, as_vec2_mut);
channel_access!(Vec3, Vec3, as_vec3, as_vec3_mut);
channel_access!(Color, Color, as_color, as_color_mut);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ReactionSettings;

    #[test]
    fn kind_and_access() {
        let r = Reaction::between(Vec2::ZERO, Vec2::ONE, ReactionSettings::new(1.0)).unwrap();
        let mut any = AnyReaction::from(r);
        assert_eq!(any.kind(), ChannelKind::Vec2);
        assert!(any.as_float().is_none());
        any.set_progress_at(1.0);
        assert_eq!(any.as_vec2().unwrap().current_value(), Vec2::ONE);
    }

    #[test]
    fn channel_names_parse() {
        assert_eq!("color".parse::<ChannelKind>().unwrap(), ChannelKind::Color);
        assert!(matches!(
            "quat".parse::<ChannelKind>(),
            Err(ReactorError::UnknownChannel { .. })
        ));
    }
}
