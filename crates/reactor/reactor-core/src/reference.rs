//! Reference-value resolution for a reaction's From/To operands.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReactorError;
use crate::value::Animatable;

/// Where an operand is computed from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceValue {
    /// The value captured when the target was bound (plus offset)
    StartValue,
    /// The live value at resolution time (plus offset)
    CurrentValue,
    /// The authored custom value (offset ignored)
    CustomValue,
}

impl ReferenceValue {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartValue => "start_value",
            Self::CurrentValue => "current_value",
            Self::CustomValue => "custom_value",
        }
    }
}

impl fmt::Display for ReferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric codes as authored in serialized presets: 0, 1, 2.
impl TryFrom<i32> for ReferenceValue {
    type Error = ReactorError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::StartValue),
            1 => Ok(Self::CurrentValue),
            2 => Ok(Self::CustomValue),
            other => Err(ReactorError::UnknownReferenceValue {
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for ReferenceValue {
    type Err = ReactorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start_value" | "StartValue" => Ok(Self::StartValue),
            "current_value" | "CurrentValue" => Ok(Self::CurrentValue),
            "custom_value" | "CustomValue" => Ok(Self::CustomValue),
            other => Err(ReactorError::UnknownReferenceValue {
                value: other.to_string(),
            }),
        }
    }
}

/// Resolve one operand.
#[inline]
pub fn resolve<T: Animatable>(
    reference: ReferenceValue,
    offset: T,
    custom: T,
    start: T,
    current: T,
) -> T {
    match reference {
        ReferenceValue::StartValue => start.offset_by(offset),
        ReferenceValue::CurrentValue => current.offset_by(offset),
        ReferenceValue::CustomValue => custom,
    }
}

/// Authored description of one operand (From or To).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Animatable")]
pub struct ReferencePoint<T> {
    pub reference: ReferenceValue,
    #[serde(default)]
    pub offset: T,
    #[serde(default)]
    pub custom: T,
}

impl<T: Animatable> ReferencePoint<T> {
    pub fn start() -> Self {
        Self::start_offset(T::default())
    }

    pub fn start_offset(offset: T) -> Self {
        Self {
            reference: ReferenceValue::StartValue,
            offset,
            custom: T::default(),
        }
    }

    pub fn current() -> Self {
        Self::current_offset(T::default())
    }

    pub fn current_offset(offset: T) -> Self {
        Self {
            reference: ReferenceValue::CurrentValue,
            offset,
            custom: T::default(),
        }
    }

    pub fn custom(value: T) -> Self {
        Self {
            reference: ReferenceValue::CustomValue,
            offset: T::default(),
            custom: value,
        }
    }

    #[inline]
    pub fn resolve(&self, start: T, current: T) -> T {
        resolve(self.reference, self.offset, self.custom, start, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Vec2;

    #[test]
    fn custom_ignores_offset() {
        let v = resolve(ReferenceValue::CustomValue, 5.0f32, 2.0, 100.0, 200.0);
        assert_eq!(v, 2.0);
    }

    #[test]
    fn start_and_current_add_offset() {
        assert_eq!(resolve(ReferenceValue::StartValue, 5, 0, 10, 20), 15);
        assert_eq!(
            resolve(
                ReferenceValue::CurrentValue,
                Vec2::new(1.0, 1.0),
                Vec2::ZERO,
                Vec2::ZERO,
                Vec2::new(2.0, 3.0)
            ),
            Vec2::new(3.0, 4.0)
        );
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(ReferenceValue::try_from(1).unwrap(), ReferenceValue::CurrentValue);
        assert!(matches!(
            ReferenceValue::try_from(3),
            Err(ReactorError::UnknownReferenceValue { .. })
        ));
        assert!("Relative".parse::<ReferenceValue>().is_err());
    }

    #[test]
    fn unknown_names_fail_deserialization() {
        let bad = r#"{"reference":"Relative","offset":1.0}"#;
        assert!(serde_json::from_str::<ReferencePoint<f32>>(bad).is_err());

        let ok = r#"{"reference":"CurrentValue","offset":5.0}"#;
        let point: ReferencePoint<f32> = serde_json::from_str(ok).unwrap();
        assert_eq!(point.resolve(0.0, 1.0), 6.0);
    }
}
