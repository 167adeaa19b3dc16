//! Reactor Core (engine-agnostic)
//!
//! Tick-driven reactions (single animated values) and animations (aggregates
//! of reactions with barrier-gated play/stop/finish callbacks). The host owns
//! the frame loop and calls `advance` once per frame with scaled and unscaled
//! delta time; values reach the host through getter/setter closures.

pub mod animation;
pub mod any_reaction;
pub mod callbacks;
pub mod config;
pub mod ease;
pub mod engine;
pub mod error;
pub mod ids;
pub mod outputs;
pub mod presets;
pub mod reaction;
pub mod reference;
pub mod settings;
pub mod stored_animation;
pub mod target;
pub mod time;
pub mod value;

// Re-exports for consumers (hosts and adapters)
pub use animation::Animation;
pub use any_reaction::{AnyReaction, ChannelKind};
pub use callbacks::Callback;
pub use config::Config;
pub use ease::{CubicBezier, Ease, EaseMode};
pub use engine::Reactor;
pub use error::ReactorError;
pub use ids::{AnimationId, ReactionId};
pub use outputs::{AnimationEvent, Outputs, ReactorEvent};
pub use presets::{UiAnimation, UiTarget, UiTransform};
pub use reaction::{Reaction, ReactionEvent, ReactionState};
pub use reference::{resolve, ReferencePoint, ReferenceValue};
pub use settings::{LoopType, PlayDirection, ReactionSettings};
pub use stored_animation::{parse_animation_json, StoredAnimation, StoredReaction};
pub use target::Target;
pub use time::{TickDelta, Timescale};
pub use value::{Animatable, Color, Vec2, Vec3};

/// Reactor result type
pub type Result<T> = core::result::Result<T, ReactorError>;
