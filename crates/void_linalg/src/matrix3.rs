//! 3x3 matrix (column-major)
//!
//! Rotation/scale block without translation. Unlike [`Matrix4`](crate::Matrix4)
//! it carries no property bits: every operation on it is cheap enough that
//! fast paths would not pay for themselves.

use crate::axis_angle::AxisAngle4;
use crate::error::{check_len, Result};
use crate::quaternion::{rotation_columns_of, Quaternion, RotationSource};
use crate::scalar::Real;
use crate::vector::Vector3;
use core::ops::{Mul, MulAssign};

/// 3x3 matrix, element `mCR` is column `C`, row `R`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Matrix3<T> {
    pub cols: [Vector3<T>; 3],
}

pub type Matrix3f = Matrix3<f32>;
pub type Matrix3d = Matrix3<f64>;

impl<T: Real> Matrix3<T> {
    #[inline]
    pub const fn from_cols(c0: Vector3<T>, c1: Vector3<T>, c2: Vector3<T>) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::from_scale(Vector3::one())
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_cols(Vector3::zero(), Vector3::zero(), Vector3::zero())
    }

    /// Build from 9 scalars in column-major order
    #[inline]
    pub fn from_cols_array(m: [T; 9]) -> Self {
        Self::from_cols(
            Vector3::new(m[0], m[1], m[2]),
            Vector3::new(m[3], m[4], m[5]),
            Vector3::new(m[6], m[7], m[8]),
        )
    }

    /// Read 9 column-major scalars from the start of `src`
    pub fn from_cols_slice(src: &[T]) -> Result<Self> {
        check_len(0, 9, src.len())?;
        let mut m = [T::zero(); 9];
        m.copy_from_slice(&src[..9]);
        Ok(Self::from_cols_array(m))
    }

    /// The 9 elements in column-major order (`col * 3 + row`)
    #[inline]
    pub fn to_cols_array(&self) -> [T; 9] {
        let [c0, c1, c2] = self.cols;
        [c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z]
    }

    /// Write the elements column-major into `dest[offset..offset + 9]`.
    /// Nothing outside that range is touched.
    pub fn write_cols(&self, dest: &mut [T], offset: usize) -> Result<()> {
        check_len(offset, 9, dest.len())?;
        dest[offset..offset + 9].copy_from_slice(&self.to_cols_array());
        Ok(())
    }

    #[inline]
    pub fn from_scale(scale: Vector3<T>) -> Self {
        let z = T::zero();
        Self::from_cols(
            Vector3::new(scale.x, z, z),
            Vector3::new(z, scale.y, z),
            Vector3::new(z, z, scale.z),
        )
    }

    /// Rotation matrix of `q`; a non-unit `q` also scales by `|q|²`
    pub fn from_quat(q: Quaternion<T>) -> Self {
        let [c0, c1, c2] = rotation_columns_of(q);
        Self::from_cols(c0.into(), c1.into(), c2.into())
    }

    /// Rotation about a (not necessarily unit) axis
    #[inline]
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        Self::from_quat(Quaternion::from_axis_angle(axis, angle))
    }

    pub fn from_rotation_x(angle: T) -> Self {
        let (sin, cos) = angle.sin_cos();
        let (o, z) = (T::one(), T::zero());
        Self::from_cols(
            Vector3::new(o, z, z),
            Vector3::new(z, cos, sin),
            Vector3::new(z, -sin, cos),
        )
    }

    pub fn from_rotation_y(angle: T) -> Self {
        let (sin, cos) = angle.sin_cos();
        let (o, z) = (T::one(), T::zero());
        Self::from_cols(
            Vector3::new(cos, z, -sin),
            Vector3::new(z, o, z),
            Vector3::new(sin, z, cos),
        )
    }

    pub fn from_rotation_z(angle: T) -> Self {
        let (sin, cos) = angle.sin_cos();
        let (o, z) = (T::one(), T::zero());
        Self::from_cols(
            Vector3::new(cos, sin, z),
            Vector3::new(-sin, cos, z),
            Vector3::new(z, z, o),
        )
    }

    /// `Rz * Ry * Rx`: rotate about X first, then Y, then Z
    pub fn from_rotation_zyx(angle_z: T, angle_y: T, angle_x: T) -> Self {
        let [c0, c1, c2] = rotation_zyx_columns(angle_z, angle_y, angle_x);
        Self::from_cols(c0.into(), c1.into(), c2.into())
    }

    /// Element at column `col`, row `row`
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> T {
        self.to_cols_array()[col * 3 + row]
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.to_cols_array();
        Self::from_cols_array([m00, m10, m20, m01, m11, m21, m02, m12, m22])
    }

    #[inline]
    pub fn determinant(&self) -> T {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.to_cols_array();
        (m00 * m11 - m01 * m10) * m22 + (m02 * m10 - m00 * m12) * m21 + (m01 * m12 - m02 * m11) * m20
    }

    /// Inverse via the adjugate. A singular matrix yields non-finite
    /// elements.
    pub fn invert(&self) -> Self {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.to_cols_array();
        let det = self.determinant();
        if cfg!(debug_assertions) && det == T::zero() {
            log::debug!("inverting singular 3x3 matrix");
        }
        let s = T::one() / det;
        Self::from_cols_array([
            (m11 * m22 - m21 * m12) * s,
            (m21 * m02 - m01 * m22) * s,
            (m01 * m12 - m11 * m02) * s,
            (m20 * m12 - m10 * m22) * s,
            (m00 * m22 - m20 * m02) * s,
            (m10 * m02 - m00 * m12) * s,
            (m10 * m21 - m20 * m11) * s,
            (m20 * m01 - m00 * m21) * s,
            (m00 * m11 - m10 * m01) * s,
        ])
    }

    /// Normal matrix (inverse transpose)
    #[inline]
    pub fn normal(&self) -> Self {
        self.invert().transpose()
    }

    /// Column lengths
    #[inline]
    pub fn scale_factors(&self) -> Vector3<T> {
        Vector3::new(self.cols[0].length(), self.cols[1].length(), self.cols[2].length())
    }

    #[inline]
    pub fn transform(&self, v: Vector3<T>) -> Vector3<T> {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    /// Rotation of an orthonormal matrix
    #[inline]
    pub fn normalized_rotation(&self) -> Quaternion<T> {
        Quaternion::from_normalized_matrix(self)
    }

    /// Rotation of a matrix whose columns may be scaled
    #[inline]
    pub fn unnormalized_rotation(&self) -> Quaternion<T> {
        Quaternion::from_unnormalized_matrix(self)
    }

    #[inline]
    pub fn rotation_axis_angle(&self) -> AxisAngle4<T> {
        AxisAngle4::from_quaternion(self.normalized_rotation())
    }

    /// Angles `(x, y, z)` such that `from_rotation_zyx(z, y, x)` rebuilds
    /// the matrix. Not stable near `y = ±π/2`.
    #[inline]
    pub fn euler_angles_zyx(&self) -> Vector3<T> {
        euler_angles_zyx(&self.rotation_columns())
    }
}

impl<T: Real> RotationSource<T> for Matrix3<T> {
    fn rotation_columns(&self) -> [[T; 3]; 3] {
        [self.cols[0].to_array(), self.cols[1].to_array(), self.cols[2].to_array()]
    }
}

/// Columns of `Rz * Ry * Rx`
pub(crate) fn rotation_zyx_columns<T: Real>(angle_z: T, angle_y: T, angle_x: T) -> [[T; 3]; 3] {
    let (sx, cx) = angle_x.sin_cos();
    let (sy, cy) = angle_y.sin_cos();
    let (sz, cz) = angle_z.sin_cos();

    let (nm00, nm01) = (cz, sz);
    let (nm10, nm11) = (-sz, cz);
    let (nm20, nm21, nm22) = (nm00 * sy, nm01 * sy, cy);
    [
        [nm00 * cy, nm01 * cy, -sy],
        [nm10 * cx + nm20 * sx, nm11 * cx + nm21 * sx, nm22 * sx],
        [nm10 * -sx + nm20 * cx, nm11 * -sx + nm21 * cx, nm22 * cx],
    ]
}

/// ZYX Euler angles of a rotation block given as `[column][row]`.
///
/// Gimbal lock is not special-cased.
pub(crate) fn euler_angles_zyx<T: Real>(c: &[[T; 3]; 3]) -> Vector3<T> {
    let (m00, m01, m02) = (c[0][0], c[0][1], c[0][2]);
    let (m12, m22) = (c[1][2], c[2][2]);
    Vector3::new(
        m12.atan2(m22),
        (-m02).atan2((m12 * m12 + m22 * m22).sqrt()),
        m01.atan2(m00),
    )
}

impl<T: Real> Default for Matrix3<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Mul for Matrix3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(
            self.transform(rhs.cols[0]),
            self.transform(rhs.cols[1]),
            self.transform(rhs.cols[2]),
        )
    }
}

impl<T: Real> MulAssign for Matrix3<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Real> Mul<Vector3<T>> for Matrix3<T> {
    type Output = Vector3<T>;

    #[inline]
    fn mul(self, rhs: Vector3<T>) -> Vector3<T> {
        self.transform(rhs)
    }
}

impl<T: Real> From<Quaternion<T>> for Matrix3<T> {
    fn from(q: Quaternion<T>) -> Self {
        Self::from_quat(q)
    }
}

macro_rules! impl_matrix3_consts {
    ($($t:ty),+) => {$(
        impl Matrix3<$t> {
            pub const IDENTITY: Self = Self::from_cols(Vector3::<$t>::X, Vector3::<$t>::Y, Vector3::<$t>::Z);
            pub const ZERO: Self = Self::from_cols(Vector3::<$t>::ZERO, Vector3::<$t>::ZERO, Vector3::<$t>::ZERO);
        }
    )+};
}

impl_matrix3_consts!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_identity_product() {
        let m = Matrix3d::from_cols_array([2.0, 1.0, 0.5, -1.0, 3.0, 0.0, 0.25, 0.0, 4.0]);
        let p = m * m.invert();
        let id = Matrix3d::IDENTITY.to_cols_array();
        for (a, b) in p.to_cols_array().iter().zip(id.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_singular_invert_is_not_finite() {
        let m = Matrix3f::from_scale(Vector3::new(1.0, 0.0, 1.0));
        let inv = m.invert();
        assert!(inv.to_cols_array().iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_column_major_layout() {
        let m = Matrix3f::from_rotation_z(core::f32::consts::FRAC_PI_2);
        let a = m.to_cols_array();
        // m01 = sin, m10 = -sin
        assert!((a[1] - 1.0).abs() < 1e-6);
        assert!((a[3] + 1.0).abs() < 1e-6);
        assert_eq!(m.get(0, 1), a[1]);
    }

    #[test]
    fn test_rotation_zyx_matches_product() {
        let (z, y, x) = (0.4f64, -0.3, 1.2);
        let m = Matrix3d::from_rotation_zyx(z, y, x);
        let expected =
            Matrix3d::from_rotation_z(z) * Matrix3d::from_rotation_y(y) * Matrix3d::from_rotation_x(x);
        for (a, b) in m.to_cols_array().iter().zip(expected.to_cols_array().iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_euler_roundtrip() {
        let m = Matrix3d::from_rotation_zyx(0.7, 0.2, -1.1);
        let e = m.euler_angles_zyx();
        assert!((e.x + 1.1).abs() < 1e-12);
        assert!((e.y - 0.2).abs() < 1e-12);
        assert!((e.z - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_unnormalized_rotation_ignores_scale() {
        let q = Quaternion::from_axis_angle(Vector3::new(1.0, 2.0, -1.0), 2.5);
        let m = Matrix3d::from_quat(q) * Matrix3d::from_scale(Vector3::new(2.0, 3.0, 0.5));
        assert!(m.unnormalized_rotation().same_rotation(q, 1e-12));
    }

    #[test]
    fn test_slice_roundtrip_and_bounds() {
        let m = Matrix3f::from_rotation_x(0.3);
        let mut buf = [-1.0f32; 12];
        m.write_cols(&mut buf, 2).unwrap();
        assert_eq!(buf[0], -1.0);
        assert_eq!(buf[11], -1.0);
        assert_eq!(Matrix3f::from_cols_slice(&buf[2..]).unwrap(), m);
        assert!(m.write_cols(&mut buf, 4).is_err());
    }
}
