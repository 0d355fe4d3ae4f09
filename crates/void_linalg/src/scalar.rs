//! Scalar abstraction shared by every vector, matrix and rotation type.
//!
//! All types in this crate are generic over [`Real`], which is implemented
//! for `f32` and `f64`. The `f`/`d` aliases (`Matrix4f`, `Vector3d`, ...)
//! pick one of the two.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use core::fmt::{Debug, Display};
use num_traits::{Float, FloatConst, NumAssignOps};

/// Floating-point scalar usable as a matrix/vector component.
pub trait Real:
    Float
    + FloatConst
    + NumAssignOps
    + Default
    + Debug
    + Display
    + AbsDiffEq<Epsilon = Self>
    + RelativeEq
    + UlpsEq
    + Send
    + Sync
    + 'static
{
    /// Tolerance used when deciding whether a matrix "looks like" the
    /// identity, a translation, and so on.
    const PROPERTY_TOLERANCE: f64;

    /// Convert an `f64` literal into this scalar type.
    fn lit(v: f64) -> Self;

    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    #[inline]
    fn half() -> Self {
        Self::lit(0.5)
    }

    /// `1 / sqrt(self)`
    #[inline]
    fn inv_sqrt(self) -> Self {
        Self::one() / self.sqrt()
    }

    /// `true` if this is `+Inf` (used to detect infinite far/near planes)
    #[inline]
    fn is_positive_infinity(self) -> bool {
        self > Self::zero() && self.is_infinite()
    }
}

impl Real for f32 {
    const PROPERTY_TOLERANCE: f64 = 1e-6;

    #[inline]
    fn lit(v: f64) -> Self {
        v as f32
    }
}

impl Real for f64 {
    const PROPERTY_TOLERANCE: f64 = 1e-12;

    #[inline]
    fn lit(v: f64) -> Self {
        v
    }
}

/// Convert degrees to radians
#[inline]
pub fn radians<T: Real>(degrees: T) -> T {
    degrees.to_radians()
}

/// Convert radians to degrees
#[inline]
pub fn degrees<T: Real>(radians: T) -> T {
    radians.to_degrees()
}

/// Linear interpolation
#[inline]
pub fn lerp<T: Real>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Clamp value between min and max
#[inline]
pub fn clamp<T: Real>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Smooth step interpolation
#[inline]
pub fn smoothstep<T: Real>(edge0: T, edge1: T, x: T) -> T {
    let t = clamp((x - edge0) / (edge1 - edge0), T::zero(), T::one());
    t * t * (T::lit(3.0) - T::two() * t)
}

/// Reciprocal of the difference `a - b`, the building block of every
/// closed-form projection matrix.
#[inline]
pub(crate) fn inv_diff<T: Real>(a: T, b: T) -> T {
    T::one() / (a - b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radians_degrees() {
        assert!((radians(180.0f32) - core::f32::consts::PI).abs() < 1e-6);
        assert!((degrees(core::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_and_lerp() {
        assert_eq!(clamp(5.0f32, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0f64, 0.0, 1.0), 0.0);
        assert_eq!(lerp(2.0f32, 4.0, 0.5), 3.0);
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.0f32, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0f32, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0f64, 1.0, 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_positive_infinity() {
        assert!(f32::INFINITY.is_positive_infinity());
        assert!(!f32::NEG_INFINITY.is_positive_infinity());
        assert!(!1.0f64.is_positive_infinity());
    }
}
