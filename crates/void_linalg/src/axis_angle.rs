//! Axis-angle rotation

use crate::quaternion::Quaternion;
use crate::scalar::Real;
use crate::vector::Vector3;

/// Rotation of `angle` radians about the axis `(x, y, z)`.
///
/// The axis is expected to be unit length; nothing enforces it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct AxisAngle4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub angle: T,
}

pub type AxisAngle4f = AxisAngle4<f32>;
pub type AxisAngle4d = AxisAngle4<f64>;

impl<T: Real> AxisAngle4<T> {
    #[inline]
    pub const fn new(x: T, y: T, z: T, angle: T) -> Self {
        Self { x, y, z, angle }
    }

    #[inline]
    pub fn from_axis(axis: Vector3<T>, angle: T) -> Self {
        Self::new(axis.x, axis.y, axis.z, angle)
    }

    /// Axis-angle of a unit quaternion.
    ///
    /// A quaternion with no rotation yields the `+Z` axis and a zero angle.
    pub fn from_quaternion(q: Quaternion<T>) -> Self {
        let w = q.w.max(-T::one()).min(T::one());
        let angle = T::two() * w.acos();
        let sin_half = (T::one() - w * w).sqrt();
        if sin_half <= T::lit(1e-12) {
            return Self::new(T::zero(), T::zero(), T::one(), angle);
        }
        let inv = T::one() / sin_half;
        Self::new(q.x * inv, q.y * inv, q.z * inv, angle)
    }

    #[inline]
    pub fn axis(&self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Normalize the axis (the angle is left untouched)
    pub fn normalize(self) -> Self {
        let inv_len = self.axis().length_squared().inv_sqrt();
        Self::new(self.x * inv_len, self.y * inv_len, self.z * inv_len, self.angle)
    }

    #[inline]
    pub fn to_quaternion(self) -> Quaternion<T> {
        Quaternion::from_axis_angle(self.axis(), self.angle)
    }

    /// Rotate a vector (Rodrigues' formula)
    pub fn transform(&self, v: Vector3<T>) -> Vector3<T> {
        let (sin, cos) = self.angle.sin_cos();
        let k = self.axis();
        let dot = k.dot(v);
        v * cos + k.cross(v) * sin + k * (dot * (T::one() - cos))
    }

    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.angle]
    }
}

impl<T: Real> Default for AxisAngle4<T> {
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::one(), T::zero())
    }
}

impl<T: Real> From<Quaternion<T>> for AxisAngle4<T> {
    fn from(q: Quaternion<T>) -> Self {
        Self::from_quaternion(q)
    }
}

impl<T: Real> From<AxisAngle4<T>> for Quaternion<T> {
    fn from(a: AxisAngle4<T>) -> Self {
        a.to_quaternion()
    }
}
