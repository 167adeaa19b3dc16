//! Easing applied to linear progress before a value is sampled.
//!
//! - `Ease`: named curves (easings.net set)
//! - `CubicBezier`: authored timing curve (x1, y1, x2, y2), CSS-style
//! - `EaseMode`: which of the two a reaction uses

use core::f32::consts::PI;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReactorError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBack,
    OutBack,
    InOutBack,
    InElastic,
    OutElastic,
    InOutElastic,
    InBounce,
    OutBounce,
    InOutBounce,
}

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

impl Ease {
    pub const ALL: [Ease; 31] = [
        Ease::Linear,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InQuint,
        Ease::OutQuint,
        Ease::InOutQuint,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
        Ease::InCirc,
        Ease::OutCirc,
        Ease::InOutCirc,
        Ease::InBack,
        Ease::OutBack,
        Ease::InOutBack,
        Ease::InElastic,
        Ease::OutElastic,
        Ease::InOutElastic,
        Ease::InBounce,
        Ease::OutBounce,
        Ease::InOutBounce,
    ];

    /// Map linear progress `t` (clamped to [0, 1]) to eased progress.
    /// Back and elastic curves leave [0, 1] between the endpoints.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::InSine => 1.0 - (t * PI / 2.0).cos(),
            Ease::OutSine => (t * PI / 2.0).sin(),
            Ease::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Ease::InQuad => t * t,
            Ease::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::InOutQuad => in_out_pow(t, 2),
            Ease::InCubic => t * t * t,
            Ease::OutCubic => 1.0 - (1.0 - t).powi(3),
            Ease::InOutCubic => in_out_pow(t, 3),
            Ease::InQuart => t.powi(4),
            Ease::OutQuart => 1.0 - (1.0 - t).powi(4),
            Ease::InOutQuart => in_out_pow(t, 4),
            Ease::InQuint => t.powi(5),
            Ease::OutQuint => 1.0 - (1.0 - t).powi(5),
            Ease::InOutQuint => in_out_pow(t, 5),
            Ease::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * t - 10.0)
                }
            }
            Ease::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Ease::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Ease::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Ease::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Ease::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Ease::InBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Ease::OutBack => 1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2),
            Ease::InOutBack => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0)
                        / 2.0
                }
            }
            Ease::InElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Ease::OutElastic => out_elastic(t),
            Ease::InOutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin())
                        / 2.0
                } else {
                    (2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin())
                        / 2.0
                        + 1.0
                }
            }
            Ease::InBounce => 1.0 - out_bounce(1.0 - t),
            Ease::OutBounce => out_bounce(t),
            Ease::InOutBounce => {
                if t < 0.5 {
                    (1.0 - out_bounce(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + out_bounce(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::InSine => "in_sine",
            Ease::OutSine => "out_sine",
            Ease::InOutSine => "in_out_sine",
            Ease::InQuad => "in_quad",
            Ease::OutQuad => "out_quad",
            Ease::InOutQuad => "in_out_quad",
            Ease::InCubic => "in_cubic",
            Ease::OutCubic => "out_cubic",
            Ease::InOutCubic => "in_out_cubic",
            Ease::InQuart => "in_quart",
            Ease::OutQuart => "out_quart",
            Ease::InOutQuart => "in_out_quart",
            Ease::InQuint => "in_quint",
            Ease::OutQuint => "out_quint",
            Ease::InOutQuint => "in_out_quint",
            Ease::InExpo => "in_expo",
            Ease::OutExpo => "out_expo",
            Ease::InOutExpo => "in_out_expo",
            Ease::InCirc => "in_circ",
            Ease::OutCirc => "out_circ",
            Ease::InOutCirc => "in_out_circ",
            Ease::InBack => "in_back",
            Ease::OutBack => "out_back",
            Ease::InOutBack => "in_out_back",
            Ease::InElastic => "in_elastic",
            Ease::OutElastic => "out_elastic",
            Ease::InOutElastic => "in_out_elastic",
            Ease::InBounce => "in_bounce",
            Ease::OutBounce => "out_bounce",
            Ease::InOutBounce => "in_out_bounce",
        }
    }
}

impl FromStr for Ease {
    type Err = ReactorError;

    /// Accepts snake_case names ("in_out_sine") and variant names ("InOutSine").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Ease::ALL
            .iter()
            .copied()
            .find(|e| e.name().replace('_', "") == folded)
            .ok_or_else(|| ReactorError::UnknownEase {
                name: s.to_string(),
            })
    }
}

#[inline]
fn in_out_pow(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        2.0_f32.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

fn out_elastic(t: f32) -> f32 {
    if t == 0.0 || t == 1.0 {
        t
    } else {
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

fn out_bounce(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

/// Cubic-bezier timing curve with fixed endpoints (0,0) and (1,1).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);

    #[inline]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased y for input x = `t`, inverting the x polynomial by bisection.
    /// x1/x2 are expected in [0, 1] so x stays monotonic.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if *self == Self::LINEAR {
            return t;
        }
        let mut lo = 0.0f32;
        let mut hi = 1.0f32;
        let mut mid = t;
        for _ in 0..24 {
            let x = cubic_bezier(0.0, self.x1, self.x2, 1.0, mid);
            if (x - t).abs() < 1e-6 {
                break;
            }
            if x < t {
                lo = mid;
            } else {
                hi = mid;
            }
            mid = 0.5 * (lo + hi);
        }
        cubic_bezier(0.0, self.y1, self.y2, 1.0, mid)
    }

    pub(crate) fn validate(&self) -> Result<(), ReactorError> {
        let ok = [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|v| v.is_finite());
        if !ok {
            return Err(ReactorError::invalid("curve", "control points must be finite"));
        }
        if !(0.0..=1.0).contains(&self.x1) || !(0.0..=1.0).contains(&self.x2) {
            return Err(ReactorError::invalid("curve", "x1 and x2 must lie in [0, 1]"));
        }
        Ok(())
    }
}

#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// How a reaction shapes its progress.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum EaseMode {
    Ease(Ease),
    Curve(CubicBezier),
}

impl EaseMode {
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            EaseMode::Ease(e) => e.apply(t),
            EaseMode::Curve(c) => c.apply(t),
        }
    }
}

impl Default for EaseMode {
    fn default() -> Self {
        EaseMode::Ease(Ease::Linear)
    }
}

impl From<Ease> for EaseMode {
    fn from(ease: Ease) -> Self {
        EaseMode::Ease(ease)
    }
}

impl From<CubicBezier> for EaseMode {
    fn from(curve: CubicBezier) -> Self {
        EaseMode::Curve(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for ease in Ease::ALL {
            assert!(ease.apply(0.0).abs() < 1e-4, "{} at 0", ease.name());
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-4, "{} at 1", ease.name());
        }
    }

    #[test]
    fn in_out_curves_cross_midpoint() {
        for ease in [Ease::InOutSine, Ease::InOutQuad, Ease::InOutCubic, Ease::InOutQuint] {
            assert!((ease.apply(0.5) - 0.5).abs() < 1e-4, "{}", ease.name());
        }
    }

    #[test]
    fn back_overshoots() {
        assert!(Ease::InBack.apply(0.2) < 0.0);
        assert!(Ease::OutBack.apply(0.8) > 1.0);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Ease::Linear.apply(-0.5), 0.0);
        assert_eq!(Ease::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn parse_names() {
        assert_eq!("in_out_sine".parse::<Ease>().unwrap(), Ease::InOutSine);
        assert_eq!("OutBounce".parse::<Ease>().unwrap(), Ease::OutBounce);
        assert!(matches!(
            "wobble".parse::<Ease>(),
            Err(ReactorError::UnknownEase { .. })
        ));
    }

    #[test]
    fn bezier_linear_and_ease() {
        assert_eq!(CubicBezier::LINEAR.apply(0.3), 0.3);
        let mid = CubicBezier::EASE.apply(0.5);
        assert!(mid > 0.5, "css ease is ahead of linear at the midpoint: {mid}");
        assert!((CubicBezier::EASE.apply(1.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn bezier_validation() {
        assert!(CubicBezier::new(1.5, 0.0, 0.5, 1.0).validate().is_err());
        assert!(CubicBezier::new(0.4, -0.6, 0.6, 1.6).validate().is_ok());
    }
}
