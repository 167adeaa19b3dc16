//! Value channels a reaction can animate.
//! All floating channels use f32, matching typical host transform types.

use core::fmt::Debug;
use core::ops::{Add, Sub};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A value type that can be offset and interpolated.
///
/// `lerp` must accept `t` outside [0, 1]: overshooting eases (back, elastic)
/// sample past the endpoints.
pub trait Animatable:
    Copy + Debug + Default + PartialEq + Serialize + DeserializeOwned + 'static
{
    /// Offset used by start/current reference values.
    fn offset_by(self, offset: Self) -> Self;

    /// Component-wise `ease · (to − self) + self`.
    fn lerp(self, to: Self, t: f32) -> Self;
}

#[inline]
fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Animatable for f32 {
    #[inline]
    fn offset_by(self, offset: Self) -> Self {
        self + offset
    }

    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        lerp_f32(self, to, t)
    }
}

impl Animatable for i32 {
    #[inline]
    fn offset_by(self, offset: Self) -> Self {
        self.saturating_add(offset)
    }

    /// Interpolates in f32 and rounds to the nearest integer.
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        lerp_f32(self as f32, to as f32, t).round() as i32
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// RGBA color, unclamped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const CLEAR: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

macro_rules! componentwise {
    ($ty:ident { $($field:ident),+ }) => {
        impl Add for $ty {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $ty {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Animatable for $ty {
            #[inline]
            fn offset_by(self, offset: Self) -> Self {
                self + offset
            }

            #[inline]
            fn lerp(self, to: Self, t: f32) -> Self {
                Self { $($field: lerp_f32(self.$field, to.$field, t)),+ }
            }
        }
    };
}

componentwise!(Vec2 { x, y });
componentwise!(Vec3 { x, y, z });
componentwise!(Color { r, g, b, a });

impl From<[f32; 2]> for Vec2 {
    fn from(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Self::rgba(v[0], v[1], v[2], v[3])
    }
}
