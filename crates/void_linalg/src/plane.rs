//! Plane in implicit form

use crate::scalar::Real;
use crate::vector::{Vector3, Vector4};

/// Plane in 3D space (`a*x + b*y + c*z + d = 0`)
///
/// `(a, b, c)` is the normal. Planes produced by
/// [`Matrix4::frustum_plane`](crate::Matrix4::frustum_plane) are normalized
/// and their normals point into the frustum.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Plane<T> {
    pub a: T,
    pub b: T,
    pub c: T,
    pub d: T,
}

pub type Planef = Plane<f32>;
pub type Planed = Plane<f64>;

impl<T: Real> Plane<T> {
    /// Create a plane from its raw coefficients (not normalized)
    #[inline]
    pub const fn new(a: T, b: T, c: T, d: T) -> Self {
        Self { a, b, c, d }
    }

    /// Create a plane from a point on the plane and its normal
    pub fn from_point_normal(point: Vector3<T>, normal: Vector3<T>) -> Self {
        Self::new(normal.x, normal.y, normal.z, -normal.dot(point))
    }

    /// Create a plane from three points (counter-clockwise winding)
    pub fn from_points(p0: Vector3<T>, p1: Vector3<T>, p2: Vector3<T>) -> Self {
        let normal = (p1 - p0).cross(p2 - p0);
        Self::from_point_normal(p0, normal)
    }

    /// Plane normal `(a, b, c)`
    #[inline]
    pub fn normal(&self) -> Vector3<T> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Scale the equation so that the normal has unit length.
    ///
    /// A zero normal produces non-finite coefficients.
    #[inline]
    pub fn normalize(self) -> Self {
        let inv_len = (self.a * self.a + self.b * self.b + self.c * self.c).inv_sqrt();
        Self::new(self.a * inv_len, self.b * inv_len, self.c * inv_len, self.d * inv_len)
    }

    /// Signed distance from a point to the plane (exact for normalized planes)
    ///
    /// Positive = in front (same side as normal)
    /// Negative = behind (opposite side of normal)
    #[inline]
    pub fn distance_to_point(&self, point: Vector3<T>) -> T {
        self.a * point.x + self.b * point.y + self.c * point.z + self.d
    }

    /// Check if a point is in front of the plane
    #[inline]
    pub fn is_in_front(&self, point: Vector3<T>) -> bool {
        self.distance_to_point(point) > T::zero()
    }

    /// Get the closest point on the normalized plane to a given point
    pub fn closest_point(&self, point: Vector3<T>) -> Vector3<T> {
        point - self.normal() * self.distance_to_point(point)
    }

    #[inline]
    pub fn to_vector4(self) -> Vector4<T> {
        Vector4::new(self.a, self.b, self.c, self.d)
    }

    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

impl<T: Real> Default for Plane<T> {
    /// The XZ plane with `+Y` normal
    fn default() -> Self {
        Self::new(T::zero(), T::one(), T::zero(), T::zero())
    }
}

impl<T: Real> From<Vector4<T>> for Plane<T> {
    fn from(v: Vector4<T>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}
