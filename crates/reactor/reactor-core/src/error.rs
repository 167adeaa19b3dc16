//! Error types for reactions and animations

use serde::{Deserialize, Serialize};

/// Configuration and lookup failures.
///
/// Lifecycle calls (`play`, `stop`, `pause`, ...) never fail; they are either
/// transitions or no-ops. Everything here is an authoring bug surfaced to the
/// caller instead of being papered over with a default.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ReactorError {
    /// Reference value code or name not recognized
    #[error("Unknown reference value: {value}")]
    UnknownReferenceValue { value: String },

    /// Ease name not recognized
    #[error("Unknown ease: {name}")]
    UnknownEase { name: String },

    /// Channel type not recognized
    #[error("Unknown channel kind: {name}")]
    UnknownChannel { name: String },

    /// Reaction settings out of range
    #[error("Invalid setting {field}: {reason}")]
    InvalidSettings { field: String, reason: String },

    /// An enabled reaction has no bound target
    #[error("Reaction '{reaction}' has no target bound")]
    MissingTarget { reaction: String },

    /// Reaction name not present in an animation
    #[error("Reaction not found: {name}")]
    ReactionNotFound { name: String },

    /// Reaction name registered twice in an animation
    #[error("Duplicate reaction name: {name}")]
    DuplicateReaction { name: String },

    /// Reaction exists but animates a different channel type
    #[error("Channel mismatch for '{name}': expected {expected}, got {actual}")]
    ChannelMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// Id not registered with the reactor
    #[error("Animation not found: {id}")]
    AnimationNotFound { id: u32 },

    /// Id not registered with the reactor
    #[error("Standalone reaction not found: {id}")]
    StandaloneReactionNotFound { id: u32 },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl ReactorError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownReferenceValue { .. }
            | Self::UnknownEase { .. }
            | Self::UnknownChannel { .. }
            | Self::InvalidSettings { .. } => "config",
            Self::MissingTarget { .. } => "target",
            Self::ReactionNotFound { .. }
            | Self::DuplicateReaction { .. }
            | Self::ChannelMismatch { .. } => "animation",
            Self::AnimationNotFound { .. } | Self::StandaloneReactionNotFound { .. } => "reactor",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for ReactorError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
