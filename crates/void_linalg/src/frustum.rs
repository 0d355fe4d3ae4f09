//! Frustum planes, corners and culling
//!
//! Planes are extracted from a (view-)projection matrix with the
//! Gribb/Hartmann method: each clip plane is the last matrix row plus or
//! minus one of the first three rows.

use crate::bounds::{Aabb, Sphere};
use crate::error::{LinalgError, Result};
use crate::matrix4::Matrix4;
use crate::matrix4x3::Matrix4x3;
use crate::plane::Plane;
use crate::scalar::Real;
use crate::vector::{Vector3, Vector4};

/// One of the six clip planes, named by the NDC half-space it bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FrustumPlane {
    /// `x = -1`
    Nx = 0,
    /// `x = +1`
    Px = 1,
    /// `y = -1`
    Ny = 2,
    /// `y = +1`
    Py = 3,
    /// `z = -1` (near)
    Nz = 4,
    /// `z = +1` (far)
    Pz = 5,
}

impl FrustumPlane {
    pub const ALL: [Self; 6] = [Self::Nx, Self::Px, Self::Ny, Self::Py, Self::Nz, Self::Pz];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for FrustumPlane {
    type Error = LinalgError;

    fn try_from(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(LinalgError::InvalidPlaneIndex(index))
    }
}

/// One of the eight frustum vertices, named by the NDC signs of its
/// coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FrustumCorner {
    NxNyNz = 0,
    PxNyNz = 1,
    PxPyNz = 2,
    NxPyNz = 3,
    PxNyPz = 4,
    NxNyPz = 5,
    NxPyPz = 6,
    PxPyPz = 7,
}

impl FrustumCorner {
    pub const ALL: [Self; 8] = [
        Self::NxNyNz,
        Self::PxNyNz,
        Self::PxPyNz,
        Self::NxPyNz,
        Self::PxNyPz,
        Self::NxNyPz,
        Self::NxPyPz,
        Self::PxPyPz,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The three clip planes meeting at this corner (x, y, z order)
    pub fn planes(self) -> [FrustumPlane; 3] {
        use FrustumPlane::*;
        match self {
            Self::NxNyNz => [Nx, Ny, Nz],
            Self::PxNyNz => [Px, Ny, Nz],
            Self::PxPyNz => [Px, Py, Nz],
            Self::NxPyNz => [Nx, Py, Nz],
            Self::PxNyPz => [Px, Ny, Pz],
            Self::NxNyPz => [Nx, Ny, Pz],
            Self::NxPyPz => [Nx, Py, Pz],
            Self::PxPyPz => [Px, Py, Pz],
        }
    }
}

impl TryFrom<usize> for FrustumCorner {
    type Error = LinalgError;

    fn try_from(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(LinalgError::InvalidCornerIndex(index))
    }
}

/// Intersection point of three planes.
///
/// Parallel planes produce non-finite coordinates.
pub(crate) fn intersect_planes<T: Real>(p1: Plane<T>, p2: Plane<T>, p3: Plane<T>) -> Vector3<T> {
    let (n1, n2, n3) = (p1.normal(), p2.normal(), p3.normal());
    let c23 = n2.cross(n3);
    let c31 = n3.cross(n1);
    let c12 = n1.cross(n2);
    let inv_dot = T::one() / n1.dot(c23);
    (c23 * -p1.d - c31 * p2.d - c12 * p3.d) * inv_dot
}

/// Unnormalized clip plane from the last row and one of the first three
fn clip_plane<T: Real>(row3: Vector4<T>, rows: [Vector4<T>; 3], plane: FrustumPlane) -> Plane<T> {
    let v = match plane {
        FrustumPlane::Nx => row3 + rows[0],
        FrustumPlane::Px => row3 - rows[0],
        FrustumPlane::Ny => row3 + rows[1],
        FrustumPlane::Py => row3 - rows[1],
        FrustumPlane::Nz => row3 + rows[2],
        FrustumPlane::Pz => row3 - rows[2],
    };
    Plane::from(v)
}

impl<T: Real> Matrix4<T> {
    /// Normalized clip plane of this (view-)projection matrix in the
    /// matrix's input space. The normal points into the frustum.
    pub fn frustum_plane(&self, plane: FrustumPlane) -> Plane<T> {
        clip_plane(self.row(3), [self.row(0), self.row(1), self.row(2)], plane).normalize()
    }

    /// Corner of the frustum described by this (view-)projection matrix,
    /// as the intersection of its three clip planes
    pub fn frustum_corner(&self, corner: FrustumCorner) -> Vector3<T> {
        let [a, b, c] = corner.planes();
        intersect_planes(
            self.frustum_plane(a),
            self.frustum_plane(b),
            self.frustum_plane(c),
        )
    }

    /// All six clip planes, indexed by [`FrustumPlane`]
    pub fn frustum_planes(&self) -> [Plane<T>; 6] {
        FrustumPlane::ALL.map(|p| self.frustum_plane(p))
    }

    /// All eight frustum corners, indexed by [`FrustumCorner`]
    pub fn frustum_corners(&self) -> [Vector3<T>; 8] {
        let planes = self.frustum_planes();
        FrustumCorner::ALL.map(|corner| {
            let [a, b, c] = corner.planes();
            intersect_planes(planes[a.index()], planes[b.index()], planes[c.index()])
        })
    }

    /// Normalized direction of the ray through the frustum of this
    /// (view-)projection matrix at `(x, y)` in `[0, 1]²`, interpolated
    /// bilinearly between the four edge rays. `(0, 0)` is the `Nx`/`Ny`
    /// edge and `(1, 1)` the `Px`/`Py` edge.
    pub fn frustum_ray_dir(&self, x: T, y: T) -> Vector3<T> {
        let [m00, m01, _, m03, m10, m11, _, m13, m20, m21, _, m23, _, _, _, _] = self.to_cols_array();
        let (a, b, c) = (m10 * m23, m13 * m21, m10 * m21);
        let (d, e, f) = (m11 * m23, m13 * m20, m11 * m20);
        let (g, h, i) = (m03 * m20, m01 * m23, m01 * m20);
        let (j, k, l) = (m03 * m21, m00 * m23, m00 * m21);
        let (m, n, o) = (m00 * m13, m03 * m11, m00 * m11);
        let (p, q, r) = (m01 * m13, m03 * m10, m01 * m10);
        let (x0, y0) = (T::one() - x, T::one() - y);
        let left = Vector3::new(
            (d + e + f - a - b - c) * y0 + (a - b - c + d - e + f) * y,
            (j + k + l - g - h - i) * y0 + (g - h - i + j - k + l) * y,
            (p + q + r - m - n - o) * y0 + (m - n - o + p - q + r) * y,
        );
        let right = Vector3::new(
            (b - c - d + e + f - a) * y0 + (a + b - c - d - e + f) * y,
            (h - i - j + k + l - g) * y0 + (g + h - i - j - k + l) * y,
            (n - o - p + q + r - m) * y0 + (m + n - o - p - q + r) * y,
        );
        (left * x0 + right * x).normalize()
    }

    /// Axis-aligned bounds of the frustum, with `self` being the inverse of
    /// a view-projection matrix: the corners of the `[-1, 1]³` clip cube are
    /// taken through `self` and the perspective divide.
    pub fn frustum_aabb(&self) -> Aabb<T> {
        let ndc = |t: usize, bit: usize| if (t >> bit) & 1 == 1 { T::one() } else { -T::one() };
        let corners: [Vector3<T>; 8] =
            core::array::from_fn(|t| self.transform_project(Vector3::new(ndc(t, 0), ndc(t, 1), ndc(t, 2))));
        Aabb::from_points(&corners)
    }
}

impl<T: Real> Matrix4x3<T> {
    /// Normalized clip plane of this matrix treated as an (orthographic)
    /// projection with implicit last row `(0, 0, 0, 1)`
    pub fn frustum_plane(&self, plane: FrustumPlane) -> Plane<T> {
        let (o, l) = (T::zero(), T::one());
        let row = |i: usize| Vector4::new(self.get(0, i), self.get(1, i), self.get(2, i), self.get(3, i));
        clip_plane(Vector4::new(o, o, o, l), [row(0), row(1), row(2)], plane).normalize()
    }
}

/// Result of frustum containment test
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrustumTestResult {
    /// Object is completely inside the frustum
    Inside,
    /// Object is completely outside the frustum
    Outside,
    /// Object intersects the frustum boundary
    Intersecting,
}

impl FrustumTestResult {
    /// Check if the object is at least partially visible
    #[inline]
    pub fn is_visible(&self) -> bool {
        *self != FrustumTestResult::Outside
    }

    /// Check if the object is completely inside
    #[inline]
    pub fn is_inside(&self) -> bool {
        *self == FrustumTestResult::Inside
    }
}

/// View frustum for culling, holding six normalized planes indexed by
/// [`FrustumPlane`]. All normals point inward.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrustumPlanes<T> {
    pub planes: [Plane<T>; 6],
}

pub type FrustumPlanesf = FrustumPlanes<f32>;
pub type FrustumPlanesd = FrustumPlanes<f64>;

impl<T: Real> FrustumPlanes<T> {
    /// Extract frustum planes from a view-projection matrix
    pub fn from_matrix(view_projection: &Matrix4<T>) -> Self {
        Self {
            planes: view_projection.frustum_planes(),
        }
    }

    #[inline]
    pub fn plane(&self, plane: FrustumPlane) -> Plane<T> {
        self.planes[plane.index()]
    }

    /// Test if an AABB is inside, outside, or intersecting the frustum
    pub fn contains_aabb(&self, aabb: &Aabb<T>) -> FrustumTestResult {
        let mut result = FrustumTestResult::Inside;

        for plane in &self.planes {
            // If p-vertex is outside, entire AABB is outside
            if plane.distance_to_point(aabb.positive_vertex(plane.normal())) < T::zero() {
                return FrustumTestResult::Outside;
            }

            // If n-vertex is outside, AABB intersects
            if plane.distance_to_point(aabb.negative_vertex(plane.normal())) < T::zero() {
                result = FrustumTestResult::Intersecting;
            }
        }

        result
    }

    /// Test if a sphere is inside, outside, or intersecting the frustum
    pub fn contains_sphere(&self, sphere: &Sphere<T>) -> FrustumTestResult {
        let mut result = FrustumTestResult::Inside;

        for plane in &self.planes {
            let dist = plane.distance_to_point(sphere.center);

            if dist < -sphere.radius {
                return FrustumTestResult::Outside;
            }

            if dist < sphere.radius {
                result = FrustumTestResult::Intersecting;
            }
        }

        result
    }

    /// Test if a point is inside the frustum (boundary counts as inside)
    pub fn contains_point(&self, point: Vector3<T>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= T::zero())
    }

    /// Quick visibility test - returns true if AABB might be visible
    pub fn is_aabb_visible(&self, aabb: &Aabb<T>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(aabb.positive_vertex(plane.normal())) >= T::zero())
    }

    /// Quick visibility test - returns true if sphere might be visible
    pub fn is_sphere_visible(&self, sphere: &Sphere<T>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(sphere.center) >= -sphere.radius)
    }
}

impl<T: Real> Default for FrustumPlanes<T> {
    /// Planes of the canonical `[-1, 1]^3` clip volume
    fn default() -> Self {
        Self::from_matrix(&Matrix4::identity())
    }
}
