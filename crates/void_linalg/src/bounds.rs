//! Bounding volumes for frustum culling

use crate::matrix4::Matrix4;
use crate::scalar::Real;
use crate::vector::Vector3;

/// Axis-Aligned Bounding Box
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb<T> {
    pub min: Vector3<T>,
    pub max: Vector3<T>,
}

pub type Aabbf = Aabb<f32>;
pub type Aabbd = Aabb<f64>;

impl<T: Real> Aabb<T> {
    /// Create from min and max points
    #[inline]
    pub const fn new(min: Vector3<T>, max: Vector3<T>) -> Self {
        Self { min, max }
    }

    /// Inverted box that any point expands
    pub fn empty() -> Self {
        Self {
            min: Vector3::splat(T::max_value()),
            max: Vector3::splat(T::min_value()),
        }
    }

    /// Create from center and half-extents
    #[inline]
    pub fn from_center_half_extents(center: Vector3<T>, half_extents: Vector3<T>) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Create from a set of points
    pub fn from_points(points: &[Vector3<T>]) -> Self {
        points
            .iter()
            .fold(Self::empty(), |aabb, &point| aabb.expand_to_include(point))
    }

    #[inline]
    pub fn center(&self) -> Vector3<T> {
        (self.min + self.max) * T::half()
    }

    #[inline]
    pub fn half_extents(&self) -> Vector3<T> {
        (self.max - self.min) * T::half()
    }

    #[inline]
    pub fn size(&self) -> Vector3<T> {
        self.max - self.min
    }

    /// True if min exceeds max on any axis
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand to include a point
    #[inline]
    pub fn expand_to_include(self, point: Vector3<T>) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Smallest box containing both boxes
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn contains_point(&self, point: Vector3<T>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Get the closest point inside the box to a given point
    #[inline]
    pub fn closest_point(&self, point: Vector3<T>) -> Vector3<T> {
        point.max(self.min).min(self.max)
    }

    #[inline]
    pub fn distance_squared_to_point(&self, point: Vector3<T>) -> T {
        (point - self.closest_point(point)).length_squared()
    }

    /// Corner most aligned with `normal` (p-vertex)
    #[inline]
    pub fn positive_vertex(&self, normal: Vector3<T>) -> Vector3<T> {
        let pick = |n: T, lo: T, hi: T| if n >= T::zero() { hi } else { lo };
        Vector3::new(
            pick(normal.x, self.min.x, self.max.x),
            pick(normal.y, self.min.y, self.max.y),
            pick(normal.z, self.min.z, self.max.z),
        )
    }

    /// Corner least aligned with `normal` (n-vertex)
    #[inline]
    pub fn negative_vertex(&self, normal: Vector3<T>) -> Vector3<T> {
        self.positive_vertex(-normal)
    }

    /// Get the 8 corners of the box
    pub fn corners(&self) -> [Vector3<T>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Transform the box by an affine matrix (result is still axis-aligned)
    pub fn transform(&self, matrix: &Matrix4<T>) -> Self {
        self.corners()
            .iter()
            .fold(Self::empty(), |aabb, &corner| {
                aabb.expand_to_include(matrix.transform_position(corner))
            })
    }
}

impl<T: Real> Default for Aabb<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Bounding Sphere
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere<T> {
    pub center: Vector3<T>,
    pub radius: T,
}

pub type Spheref = Sphere<f32>;
pub type Sphered = Sphere<f64>;

impl<T: Real> Sphere<T> {
    #[inline]
    pub const fn new(center: Vector3<T>, radius: T) -> Self {
        Self { center, radius }
    }

    /// Bounding sphere of an AABB
    pub fn from_aabb(aabb: &Aabb<T>) -> Self {
        Self::new(aabb.center(), aabb.half_extents().length())
    }

    #[inline]
    pub fn contains_point(&self, point: Vector3<T>) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    #[inline]
    pub fn intersects_sphere(&self, other: &Self) -> bool {
        let combined_radius = self.radius + other.radius;
        (other.center - self.center).length_squared() <= combined_radius * combined_radius
    }

    #[inline]
    pub fn intersects_aabb(&self, aabb: &Aabb<T>) -> bool {
        aabb.distance_squared_to_point(self.center) <= self.radius * self.radius
    }

    /// Get the bounding AABB
    pub fn to_aabb(&self) -> Aabb<T> {
        Aabb::from_center_half_extents(self.center, Vector3::splat(self.radius))
    }

    /// Transform the sphere by an affine matrix
    ///
    /// For non-uniform scaling the radius grows by the largest axis scale,
    /// so the result contains the true transformed ellipsoid.
    pub fn transform(&self, matrix: &Matrix4<T>) -> Self {
        let scale = matrix.scale_factors();
        let max_scale = scale.x.max(scale.y).max(scale.z);
        Self::new(matrix.transform_position(self.center), self.radius * max_scale)
    }
}

impl<T: Real> Default for Sphere<T> {
    fn default() -> Self {
        Self::new(Vector3::zero(), T::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matrix4d, Vector3d, Vector3f};

    #[test]
    fn test_aabb_contains_point() {
        let aabb = Aabb::new(Vector3f::ZERO, Vector3f::ONE);
        assert!(aabb.contains_point(Vector3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(Vector3::new(1.5, 0.5, 0.5)));
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::new(Vector3f::ZERO, Vector3f::ONE);
        let b = Aabb::new(Vector3::splat(0.5), Vector3::splat(1.5));
        let c = Aabb::new(Vector3::splat(2.0), Vector3::splat(3.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.union(&c), Aabb::new(Vector3f::ZERO, Vector3::splat(3.0)));
    }

    #[test]
    fn test_aabb_from_points() {
        assert!(Aabbd::empty().is_empty());
        let aabb = Aabbd::from_points(&[
            Vector3::new(1.0, -2.0, 0.0),
            Vector3::new(-1.0, 4.0, 2.0),
        ]);
        assert_eq!(aabb.min, Vector3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 4.0, 2.0));
        assert_eq!(aabb.center(), Vector3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_aabb_support_vertices() {
        let aabb = Aabb::new(Vector3d::ZERO, Vector3d::ONE);
        let n = Vector3::new(1.0, -1.0, 0.0);
        assert_eq!(aabb.positive_vertex(n), Vector3::new(1.0, 0.0, 1.0));
        assert_eq!(aabb.negative_vertex(n), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_aabb_transform() {
        let aabb = Aabb::new(Vector3d::ZERO, Vector3d::ONE);
        let m = Matrix4d::from_rotation_z(std::f64::consts::FRAC_PI_2)
            .translate(Vector3::new(1.0, 0.0, 0.0));
        let t = aabb.transform(&m);
        assert!((t.min - Vector3::new(-1.0, 1.0, 0.0)).length() < 1e-12);
        assert!((t.max - Vector3::new(0.0, 2.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_sphere_queries() {
        let sphere = Sphere::new(Vector3f::ZERO, 1.0);
        assert!(sphere.contains_point(Vector3::new(0.5, 0.0, 0.0)));
        assert!(!sphere.contains_point(Vector3::new(1.5, 0.0, 0.0)));
        assert!(sphere.intersects_sphere(&Sphere::new(Vector3::new(1.5, 0.0, 0.0), 0.5)));
        assert!(sphere.intersects_aabb(&Aabb::new(Vector3::splat(0.5), Vector3::splat(2.0))));
        assert!(!sphere.intersects_aabb(&Aabb::new(Vector3::splat(1.0), Vector3::splat(2.0))));
        assert_eq!(sphere.to_aabb(), Aabb::new(Vector3::splat(-1.0), Vector3f::ONE));
    }

    #[test]
    fn test_sphere_transform() {
        let sphere = Sphere::new(Vector3d::X, 1.0);
        let m = Matrix4d::from_translation(Vector3::new(0.0, 5.0, 0.0))
            .scale(Vector3::new(1.0, 3.0, 2.0));
        let t = sphere.transform(&m);
        assert!((t.center - Vector3::new(1.0, 5.0, 0.0)).length() < 1e-12);
        assert!((t.radius - 3.0).abs() < 1e-12);
    }
}
