//! Quaternion for 3D rotations

use crate::scalar::Real;
use crate::vector::{Vector3, Vector4};
use core::ops::{Mul, MulAssign};

/// Quaternion representing a 3D rotation
///
/// A unit quaternion is a pure rotation. Converting a non-unit quaternion to
/// a matrix yields the rotation combined with a uniform scale of `|q|²`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quaternion<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type Quaternionf = Quaternion<f32>;
pub type Quaterniond = Quaternion<f64>;

/// Anything with an upper-left 3x3 rotation block.
///
/// Implemented by all matrix types so that quaternion extraction is written
/// once.
pub trait RotationSource<T: Real> {
    /// Upper-left 3x3 block as `[column][row]`
    fn rotation_columns(&self) -> [[T; 3]; 3];
}

impl<T: Real> Quaternion<T> {
    /// Create a new quaternion
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// Identity quaternion (no rotation)
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Create from a Vector4
    #[inline]
    pub fn from_vector4(v: Vector4<T>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Create from axis and angle (radians). The axis is normalized here.
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        let (sin, cos) = (angle * T::half()).sin_cos();
        let inv_len = axis.length_squared().inv_sqrt();
        Self::new(
            axis.x * inv_len * sin,
            axis.y * inv_len * sin,
            axis.z * inv_len * sin,
            cos,
        )
    }

    /// Create from rotation around X axis
    #[inline]
    pub fn from_rotation_x(angle: T) -> Self {
        let (sin, cos) = (angle * T::half()).sin_cos();
        Self::new(sin, T::zero(), T::zero(), cos)
    }

    /// Create from rotation around Y axis
    #[inline]
    pub fn from_rotation_y(angle: T) -> Self {
        let (sin, cos) = (angle * T::half()).sin_cos();
        Self::new(T::zero(), sin, T::zero(), cos)
    }

    /// Create from rotation around Z axis
    #[inline]
    pub fn from_rotation_z(angle: T) -> Self {
        let (sin, cos) = (angle * T::half()).sin_cos();
        Self::new(T::zero(), T::zero(), sin, cos)
    }

    /// Rotation about Z, then Y, then X (`Rz * Ry * Rx`)
    pub fn from_rotation_zyx(angle_z: T, angle_y: T, angle_x: T) -> Self {
        let (sx, cx) = (angle_x * T::half()).sin_cos();
        let (sy, cy) = (angle_y * T::half()).sin_cos();
        let (sz, cz) = (angle_z * T::half()).sin_cos();

        let cycz = cy * cz;
        let sysz = sy * sz;
        let sycz = sy * cz;
        let cysz = cy * sz;
        Self::new(
            sx * cycz - cx * sysz,
            cx * sycz + sx * cysz,
            cx * cysz - sx * sycz,
            cx * cycz + sx * sysz,
        )
    }

    /// Create quaternion that rotates from one direction to another
    pub fn from_rotation_arc(from: Vector3<T>, to: Vector3<T>) -> Self {
        let from = from.normalize();
        let to = to.normalize();

        let dot = from.dot(to);
        let limit = T::lit(0.99999);

        if dot > limit {
            return Self::identity();
        }

        if dot < -limit {
            // Vectors are opposite, pick arbitrary perpendicular axis
            let axis = Vector3::unit_x().cross(from);
            let axis = if axis.length_squared() < T::lit(1e-6) {
                Vector3::unit_y().cross(from)
            } else {
                axis
            };
            return Self::from_axis_angle(axis, T::PI());
        }

        let axis = from.cross(to);
        let s = ((T::one() + dot) * T::two()).sqrt();
        let inv_s = T::one() / s;

        Self::new(axis.x * inv_s, axis.y * inv_s, axis.z * inv_s, s * T::half())
    }

    /// Extract the rotation of a matrix whose 3x3 block is already
    /// orthonormal. Skips the three column-length square roots of
    /// [`from_unnormalized_matrix`](Self::from_unnormalized_matrix).
    pub fn from_normalized_matrix<M: RotationSource<T>>(m: &M) -> Self {
        from_normalized_columns(m.rotation_columns())
    }

    /// Extract the rotation of a matrix whose columns may carry scale.
    pub fn from_unnormalized_matrix<M: RotationSource<T>>(m: &M) -> Self {
        let mut c = m.rotation_columns();
        for col in c.iter_mut() {
            let inv_len = (col[0] * col[0] + col[1] * col[1] + col[2] * col[2]).inv_sqrt();
            col[0] *= inv_len;
            col[1] *= inv_len;
            col[2] *= inv_len;
        }
        from_normalized_columns(c)
    }

    /// Get the length squared
    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    /// Get the length
    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Normalize the quaternion
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > T::zero() {
            Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
        } else {
            Self::identity()
        }
    }

    /// Conjugate (inverse for unit quaternions)
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Inverse
    #[inline]
    pub fn inverse(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > T::zero() {
            let inv = T::one() / len_sq;
            Self::new(-self.x * inv, -self.y * inv, -self.z * inv, self.w * inv)
        } else {
            Self::identity()
        }
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Angle of the rotation in radians (unit quaternion)
    #[inline]
    pub fn angle(self) -> T {
        T::two() * self.w.abs().min(T::one()).acos()
    }

    /// `true` if `self` and `other` encode the same rotation (`q` and `-q`
    /// are the same rotation).
    pub fn same_rotation(self, other: Self, epsilon: T) -> bool {
        self.dot(other).abs() >= T::one() - epsilon
    }

    /// Spherical linear interpolation
    pub fn slerp(self, other: Self, t: T) -> Self {
        let mut dot = self.dot(other);
        let mut other = other;

        // Ensure shortest path
        let epsilon = T::lit(1e-6);
        if dot < -epsilon {
            other = Self::new(-other.x, -other.y, -other.z, -other.w);
            dot = -dot;
        }

        dot = dot.min(T::one()).max(-T::one());

        // Use linear interpolation for nearly identical quaternions
        if dot > T::lit(0.9995) {
            return self.lerp_raw(other, t).normalize();
        }

        let theta = dot.acos();
        let sin_theta = theta.sin();
        let s1 = ((T::one() - t) * theta).sin() / sin_theta;
        let s2 = (t * theta).sin() / sin_theta;

        Self::new(
            self.x * s1 + other.x * s2,
            self.y * s1 + other.y * s2,
            self.z * s1 + other.z * s2,
            self.w * s1 + other.w * s2,
        )
    }

    /// Normalized linear interpolation (faster but less accurate than slerp)
    pub fn nlerp(self, other: Self, t: T) -> Self {
        let other = if self.dot(other) < T::zero() {
            Self::new(-other.x, -other.y, -other.z, -other.w)
        } else {
            other
        };
        self.lerp_raw(other, t).normalize()
    }

    #[inline]
    fn lerp_raw(self, other: Self, t: T) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
            self.w + (other.w - self.w) * t,
        )
    }

    /// Rotate a vector
    pub fn transform(self, v: Vector3<T>) -> Vector3<T> {
        let qv = Vector3::new(self.x, self.y, self.z);
        let uv = qv.cross(v);
        let uuv = qv.cross(uv);
        v + (uv * self.w + uuv) * T::two()
    }

    /// Convert to Vector4
    #[inline]
    pub fn to_vector4(self) -> Vector4<T> {
        Vector4::new(self.x, self.y, self.z, self.w)
    }

    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

/// Trace-based rotation extraction.
///
/// The branch is chosen on the trace and then on the largest diagonal
/// element so that the square root argument never approaches zero; all four
/// branches are needed for rotations near 180°.
pub(crate) fn from_normalized_columns<T: Real>(c: [[T; 3]; 3]) -> Quaternion<T> {
    let (m00, m01, m02) = (c[0][0], c[0][1], c[0][2]);
    let (m10, m11, m12) = (c[1][0], c[1][1], c[1][2]);
    let (m20, m21, m22) = (c[2][0], c[2][1], c[2][2]);
    let half = T::half();

    let tr = m00 + m11 + m22;
    if tr >= T::zero() {
        let t = (tr + T::one()).sqrt();
        let w = t * half;
        let t = half / t;
        Quaternion::new((m12 - m21) * t, (m20 - m02) * t, (m01 - m10) * t, w)
    } else if m00 >= m11 && m00 >= m22 {
        let t = (m00 - (m11 + m22) + T::one()).sqrt();
        let x = t * half;
        let t = half / t;
        Quaternion::new(x, (m10 + m01) * t, (m02 + m20) * t, (m12 - m21) * t)
    } else if m11 > m22 {
        let t = (m11 - (m22 + m00) + T::one()).sqrt();
        let y = t * half;
        let t = half / t;
        Quaternion::new((m10 + m01) * t, y, (m21 + m12) * t, (m20 - m02) * t)
    } else {
        let t = (m22 - (m00 + m11) + T::one()).sqrt();
        let z = t * half;
        let t = half / t;
        Quaternion::new((m02 + m20) * t, (m21 + m12) * t, z, (m01 - m10) * t)
    }
}

/// Columns of the rotation matrix of `q` (`[column][row]`).
pub(crate) fn rotation_columns_of<T: Real>(q: Quaternion<T>) -> [[T; 3]; 3] {
    let w2 = q.w * q.w;
    let x2 = q.x * q.x;
    let y2 = q.y * q.y;
    let z2 = q.z * q.z;
    let zw = q.z * q.w;
    let xy = q.x * q.y;
    let xz = q.x * q.z;
    let yw = q.y * q.w;
    let yz = q.y * q.z;
    let xw = q.x * q.w;
    let two = T::two();
    [
        [w2 + x2 - z2 - y2, (xy + zw) * two, (xz - yw) * two],
        [(xy - zw) * two, y2 - z2 + w2 - x2, (yz + xw) * two],
        [(yw + xz) * two, (yz - xw) * two, z2 - y2 - x2 + w2],
    ]
}

impl<T: Real> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Mul for Quaternion<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl<T: Real> MulAssign for Quaternion<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Real> Mul<Vector3<T>> for Quaternion<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Vector3<T> {
        self.transform(rhs)
    }
}
