use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::animation::Animation;
use crate::any_reaction::{AnyReaction, ChannelKind};
use crate::ease::{Ease, EaseMode};
use crate::error::ReactorError;
use crate::reaction::Reaction;
use crate::reference::{ReferencePoint, ReferenceValue};
use crate::settings::ReactionSettings;
use crate::time::Timescale;
use crate::value::{Animatable, Color, Vec2, Vec3};

/// Public API: parse a JSON animation preset (see fixtures/presets/*.json)
/// into an [`Animation`] ready for targets to be bound.
///
/// Notes:
/// - `channel` is one of float, int, vec2, vec3, color.
/// - `settings` fields are optional; `ease` may be a bare ease name or the
///   tagged `{ "mode": ..., "value": ... }` form.
/// - `reference` accepts names ("StartValue", "current_value") or the numeric
///   codes 0, 1, 2. Anything else is rejected.
/// - Omitted `from`/`to` keep the reaction defaults (current value to start value).
pub fn parse_animation_json(s: &str) -> Result<Animation, ReactorError> {
    StoredAnimation::from_json(s)?.build(Timescale::default())
}

// ----- JSON schema (serde) -----

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredAnimation {
    pub name: String,
    #[serde(default)]
    pub reactions: Vec<StoredReaction>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredReaction {
    pub name: String,
    /// Kept as text so an unknown kind reports `UnknownChannel`.
    pub channel: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub settings: Value,
    #[serde(default)]
    pub from: Option<StoredPoint>,
    #[serde(default)]
    pub to: Option<StoredPoint>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredPoint {
    pub reference: Value,
    #[serde(default)]
    pub offset: Option<Value>,
    #[serde(default)]
    pub custom: Option<Value>,
}

fn enabled_by_default() -> bool {
    true
}

impl StoredAnimation {
    pub fn from_json(s: &str) -> Result<Self, ReactorError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Build the animation. `default_timescale` fills settings that do not
    /// name a timescale.
    pub fn build(&self, default_timescale: Timescale) -> Result<Animation, ReactorError> {
        let mut animation = Animation::new(self.name.clone());
        for stored in &self.reactions {
            let kind = ChannelKind::from_str(&stored.channel)?;
            let settings = stored.resolve_settings(default_timescale)?;
            let reaction: AnyReaction = match kind {
                ChannelKind::Float => stored.build_typed::<f32>(settings)?.into(),
                ChannelKind::Int => stored.build_typed::<i32>(settings)?.into(),
                ChannelKind::Vec2 => stored.build_typed::<Vec2>(settings)?.into(),
                ChannelKind::Vec3 => stored.build_typed::<Vec3>(settings)?.into(),
                ChannelKind::Color => stored.build_typed::<Color>(settings)?.into(),
            };
            animation.add_reaction(stored.name.clone(), reaction)?;
        }
        Ok(animation)
    }
}

impl StoredReaction {
    fn resolve_settings(&self, default_timescale: Timescale) -> Result<ReactionSettings, ReactorError> {
        let mut raw: Map<String, Value> = match &self.settings {
            Value::Null => Map::new(),
            Value::Object(map) => map.clone(),
            other => {
                return Err(ReactorError::invalid(
                    "settings",
                    format!("expected an object, got {other}"),
                ))
            }
        };
        let named = match raw.get("ease") {
            Some(Value::String(name)) => Some(Ease::from_str(name)?),
            _ => None,
        };
        if let Some(ease) = named {
            raw.insert("ease".into(), serde_json::to_value(EaseMode::Ease(ease))?);
        }
        if !raw.contains_key("timescale") {
            raw.insert("timescale".into(), serde_json::to_value(default_timescale)?);
        }
        let settings: ReactionSettings = serde_json::from_value(Value::Object(raw))?;
        settings.validate()?;
        Ok(settings)
    }

    fn build_typed<T: Animatable>(
        &self,
        settings: ReactionSettings,
    ) -> Result<Reaction<T>, ReactorError> {
        let mut reaction = Reaction::<T>::new(settings)?.with_enabled(self.enabled);
        if let Some(from) = &self.from {
            reaction = reaction.with_from(from.decode()?);
        }
        if let Some(to) = &self.to {
            reaction = reaction.with_to(to.decode()?);
        }
        Ok(reaction)
    }
}

impl StoredPoint {
    fn decode<T: Animatable>(&self) -> Result<ReferencePoint<T>, ReactorError> {
        Ok(ReferencePoint {
            reference: parse_reference(&self.reference)?,
            offset: decode_value(self.offset.as_ref())?,
            custom: decode_value(self.custom.as_ref())?,
        })
    }
}

fn parse_reference(v: &Value) -> Result<ReferenceValue, ReactorError> {
    match v {
        Value::String(s) => s.parse(),
        Value::Number(n) => {
            let code = n
                .as_i64()
                .and_then(|c| i32::try_from(c).ok())
                .ok_or_else(|| ReactorError::UnknownReferenceValue {
                    value: n.to_string(),
                })?;
            ReferenceValue::try_from(code)
        }
        other => Err(ReactorError::UnknownReferenceValue {
            value: other.to_string(),
        }),
    }
}

fn decode_value<T: Animatable>(v: Option<&Value>) -> Result<T, ReactorError> {
    match v {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => Ok(serde_json::from_value(v.clone())?),
    }
}
