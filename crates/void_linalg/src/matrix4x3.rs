//! 4x3 affine matrix (column-major, implicit last row `0 0 0 1`)

use crate::axis_angle::AxisAngle4;
use crate::error::{check_len, Result};
use crate::matrix3::{euler_angles_zyx, rotation_zyx_columns, Matrix3};
use crate::properties::{is_orthonormal_3x3, Properties};
use crate::quaternion::{rotation_columns_of, Quaternion, RotationSource};
use crate::scalar::Real;
use crate::vector::Vector3;
use core::ops::{Mul, MulAssign};

/// Affine transform stored as four columns of three rows.
///
/// Always reports [`Properties::AFFINE`]. The remaining bits are set by the
/// constructors that can prove them and dropped by any element-level write.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Matrix4x3<T> {
    cols: [Vector3<T>; 4],
    #[cfg_attr(feature = "serde", serde(skip, default = "affine_only"))]
    properties: Properties,
}

pub type Matrix4x3f = Matrix4x3<f32>;
pub type Matrix4x3d = Matrix4x3<f64>;

#[cfg(feature = "serde")]
fn affine_only() -> Properties {
    Properties::AFFINE
}

impl<T: Real> Matrix4x3<T> {
    /// Build from columns; only `AFFINE` is assumed.
    #[inline]
    pub fn from_cols(c0: Vector3<T>, c1: Vector3<T>, c2: Vector3<T>, c3: Vector3<T>) -> Self {
        Self::from_raw([c0, c1, c2, c3], Properties::AFFINE)
    }

    #[inline]
    pub(crate) const fn from_raw(cols: [Vector3<T>; 4], properties: Properties) -> Self {
        Self { cols, properties }
    }

    pub fn identity() -> Self {
        let (o, z) = (T::one(), T::zero());
        Self::from_raw(
            [
                Vector3::new(o, z, z),
                Vector3::new(z, o, z),
                Vector3::new(z, z, o),
                Vector3::zero(),
            ],
            Properties::IDENTITY_BITS,
        )
    }

    /// Build from 12 scalars in column-major order
    pub fn from_cols_array(m: [T; 12]) -> Self {
        Self::from_cols(
            Vector3::new(m[0], m[1], m[2]),
            Vector3::new(m[3], m[4], m[5]),
            Vector3::new(m[6], m[7], m[8]),
            Vector3::new(m[9], m[10], m[11]),
        )
    }

    /// Read 12 column-major scalars from the start of `src`
    pub fn from_cols_slice(src: &[T]) -> Result<Self> {
        check_len(0, 12, src.len())?;
        let mut m = [T::zero(); 12];
        m.copy_from_slice(&src[..12]);
        Ok(Self::from_cols_array(m))
    }

    /// The 12 elements in column-major order (`col * 3 + row`)
    pub fn to_cols_array(&self) -> [T; 12] {
        let [c0, c1, c2, c3] = self.cols;
        [
            c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z, c3.x, c3.y, c3.z,
        ]
    }

    /// Write the elements column-major into `dest[offset..offset + 12]`
    pub fn write_cols(&self, dest: &mut [T], offset: usize) -> Result<()> {
        check_len(offset, 12, dest.len())?;
        dest[offset..offset + 12].copy_from_slice(&self.to_cols_array());
        Ok(())
    }

    #[inline]
    pub fn from_translation(t: Vector3<T>) -> Self {
        let mut m = Self::identity();
        m.cols[3] = t;
        m.properties = Properties::TRANSLATION_BITS;
        m
    }

    #[inline]
    pub fn from_scale(s: Vector3<T>) -> Self {
        Self::from_matrix3(Matrix3::from_scale(s), Vector3::zero())
    }

    /// Rotation matrix of `q`; a non-unit `q` also scales by `|q|²`
    pub fn from_quat(q: Quaternion<T>) -> Self {
        let [c0, c1, c2] = rotation_columns_of(q);
        Self::from_raw(
            [c0.into(), c1.into(), c2.into(), Vector3::zero()],
            Properties::of_quat(q),
        )
    }

    /// Rotation of `q` followed by a translation
    pub fn from_rotation_translation(q: Quaternion<T>, t: Vector3<T>) -> Self {
        let mut m = Self::from_quat(q);
        m.cols[3] = t;
        m
    }

    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        Self::from_quat(Quaternion::from_axis_angle(axis, angle))
    }

    /// `Rz * Ry * Rx`
    pub fn from_rotation_zyx(angle_z: T, angle_y: T, angle_x: T) -> Self {
        Self::from_rotation_columns(rotation_zyx_columns(angle_z, angle_y, angle_x))
    }

    fn from_rotation_columns(c: [[T; 3]; 3]) -> Self {
        Self::from_raw(
            [c[0].into(), c[1].into(), c[2].into(), Vector3::zero()],
            Properties::RIGID_BITS,
        )
    }

    /// Linear part `m` followed by translation `t`
    pub fn from_matrix3(m: Matrix3<T>, t: Vector3<T>) -> Self {
        let [c0, c1, c2] = m.cols;
        Self::from_cols(c0, c1, c2, t)
    }

    #[inline]
    pub fn properties(&self) -> Properties {
        self.properties
    }

    /// Forget everything except the implicit `AFFINE` bit
    #[inline]
    pub fn assume_nothing(mut self) -> Self {
        self.properties = Properties::AFFINE;
        self
    }

    /// Recompute the property bits from the element values.
    ///
    /// `IDENTITY` and `TRANSLATION` need exact zeros and ones, since their
    /// fast paths skip the 3x3 block entirely. `ORTHONORMAL` allows rounding.
    pub fn determine_properties(mut self) -> Self {
        let c = self.rotation_columns();
        let is_id3 = (0..3).all(|i| (0..3).all(|j| c[i][j] == if i == j { T::one() } else { T::zero() }));
        let t = self.cols[3];
        self.properties = if is_id3 && t == Vector3::zero() {
            Properties::IDENTITY_BITS
        } else if is_id3 {
            Properties::TRANSLATION_BITS
        } else if is_orthonormal_3x3(&c) {
            Properties::RIGID_BITS
        } else {
            Properties::AFFINE
        };
        self
    }

    #[inline]
    pub fn col(&self, index: usize) -> Vector3<T> {
        self.cols[index]
    }

    /// Replace a column; property bits are reset
    #[inline]
    pub fn set_col(&mut self, index: usize, col: Vector3<T>) {
        self.cols[index] = col;
        self.properties = Properties::AFFINE;
    }

    /// Element at column `col`, row `row`
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> T {
        self.cols[col].to_array()[row]
    }

    /// Write one element; property bits are reset
    pub fn set_element(&mut self, col: usize, row: usize, value: T) {
        let mut c = self.cols[col].to_array();
        c[row] = value;
        self.set_col(col, c.into());
    }

    /// Upper-left 3x3 block
    #[inline]
    pub fn matrix3(&self) -> Matrix3<T> {
        Matrix3::from_cols(self.cols[0], self.cols[1], self.cols[2])
    }

    #[inline]
    pub fn translation(&self) -> Vector3<T> {
        self.cols[3]
    }

    #[inline]
    pub fn scale_factors(&self) -> Vector3<T> {
        self.matrix3().scale_factors()
    }

    #[inline]
    pub fn determinant(&self) -> T {
        self.matrix3().determinant()
    }

    /// Apply a translation: `self * T(v)`
    pub fn translate(self, v: Vector3<T>) -> Self {
        if self.properties.contains(Properties::IDENTITY) {
            return Self::from_translation(v);
        }
        let mut m = self;
        m.cols[3] = self.transform_position(v);
        m.properties = self.properties.after_translation_apply();
        m
    }

    /// Apply a scale: `self * S(v)`
    pub fn scale(self, v: Vector3<T>) -> Self {
        let mut m = self;
        m.cols[0] *= v.x;
        m.cols[1] *= v.y;
        m.cols[2] *= v.z;
        m.properties = self.properties.after_affine_apply();
        m
    }

    /// Apply the rotation of `q`: `self * R(q)`. A non-unit `q` also scales
    /// by `|q|²`.
    pub fn rotate(self, q: Quaternion<T>) -> Self {
        if self.properties.contains(Properties::IDENTITY) {
            return Self::from_quat(q);
        }
        let mut m = self * Self::from_quat(q);
        m.properties = self.properties.after_quat_apply(q);
        m
    }

    pub fn rotate_x(self, angle: T) -> Self {
        self.rotate(Quaternion::from_rotation_x(angle))
    }

    pub fn rotate_y(self, angle: T) -> Self {
        self.rotate(Quaternion::from_rotation_y(angle))
    }

    pub fn rotate_z(self, angle: T) -> Self {
        self.rotate(Quaternion::from_rotation_z(angle))
    }

    /// Transform a point (translation applied)
    #[inline]
    pub fn transform_position(&self, p: Vector3<T>) -> Vector3<T> {
        self.transform_direction(p) + self.cols[3]
    }

    /// Transform a direction (translation ignored)
    #[inline]
    pub fn transform_direction(&self, v: Vector3<T>) -> Vector3<T> {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    /// Affine product with identity and translation shortcuts
    fn mul_affine(&self, rhs: &Self) -> Self {
        if self.properties.contains(Properties::IDENTITY) {
            return *rhs;
        }
        if rhs.properties.contains(Properties::IDENTITY) {
            return *self;
        }
        if self.properties.contains(Properties::TRANSLATION) {
            let mut m = *rhs;
            m.cols[3] += self.cols[3];
            m.properties = rhs.properties.difference(Properties::IDENTITY);
            return m;
        }
        Self::from_raw(
            [
                self.transform_direction(rhs.cols[0]),
                self.transform_direction(rhs.cols[1]),
                self.transform_direction(rhs.cols[2]),
                self.transform_position(rhs.cols[3]),
            ],
            self.properties
                .intersection(rhs.properties)
                .intersection(Properties::RIGID_BITS | Properties::TRANSLATION),
        )
    }

    /// Inverse, dispatching on the property bits.
    ///
    /// Identity and translation take shortcuts, an orthonormal block uses
    /// [`invert_unit_scale`](Self::invert_unit_scale), anything else the
    /// general affine inverse. Singular input yields non-finite elements.
    pub fn invert(&self) -> Self {
        if self.properties.contains(Properties::IDENTITY) {
            return *self;
        }
        if self.properties.contains(Properties::TRANSLATION) {
            return Self::from_translation(-self.cols[3]);
        }
        if self.properties.contains(Properties::ORTHONORMAL) {
            return self.invert_unit_scale();
        }
        self.invert_affine()
    }

    /// General affine inverse: 3x3 adjugate plus `-R⁻¹t`, no shortcuts.
    pub fn invert_affine(&self) -> Self {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22, m30, m31, m32] = self.to_cols_array();
        let (m11m00, m10m01, m10m02) = (m00 * m11, m01 * m10, m02 * m10);
        let (m12m00, m12m01, m11m02) = (m00 * m12, m01 * m12, m02 * m11);
        let (m10m22, m10m21, m11m22) = (m10 * m22, m10 * m21, m11 * m22);
        let (m11m20, m12m21, m12m20) = (m11 * m20, m12 * m21, m12 * m20);
        let (m20m02, m20m01, m22m01) = (m20 * m02, m20 * m01, m22 * m01);
        let (m21m02, m21m00, m22m00) = (m21 * m02, m21 * m00, m22 * m00);

        let det = (m11m00 - m10m01) * m22 + (m10m02 - m12m00) * m21 + (m12m01 - m11m02) * m20;
        if cfg!(debug_assertions) && det == T::zero() {
            log::debug!("inverting singular 4x3 matrix");
        }
        let s = T::one() / det;

        Self::from_raw(
            [
                Vector3::new((m11m22 - m12m21) * s, (m21m02 - m22m01) * s, (m12m01 - m11m02) * s),
                Vector3::new((m12m20 - m10m22) * s, (m22m00 - m20m02) * s, (m10m02 - m12m00) * s),
                Vector3::new((m10m21 - m11m20) * s, (m20m01 - m21m00) * s, (m11m00 - m10m01) * s),
                Vector3::new(
                    (m10m22 * m31 - m10m21 * m32 + m11m20 * m32 - m11m22 * m30 + m12m21 * m30
                        - m12m20 * m31)
                        * s,
                    (m20m02 * m31 - m20m01 * m32 + m21m00 * m32 - m21m02 * m30 + m22m01 * m30
                        - m22m00 * m31)
                        * s,
                    (m11m02 * m30 - m12m01 * m30 + m12m00 * m31 - m10m02 * m31 + m10m01 * m32
                        - m11m00 * m32)
                        * s,
                ),
            ],
            Properties::AFFINE,
        )
    }

    /// Inverse of a matrix whose 3x3 block is orthonormal (rotation and
    /// translation only): transpose plus `-Rᵗt`. Unchecked.
    pub fn invert_unit_scale(&self) -> Self {
        let r = self.matrix3().transpose();
        let t = -r.transform(self.cols[3]);
        let [c0, c1, c2] = r.cols;
        Self::from_raw([c0, c1, c2, t], self.properties.intersection(Properties::RIGID_BITS))
    }

    /// Inverse of a matrix built by `orthographic`: diagonal scale plus
    /// translation. Off-diagonal elements are ignored.
    pub fn invert_ortho(&self) -> Self {
        let inv00 = T::one() / self.cols[0].x;
        let inv11 = T::one() / self.cols[1].y;
        let inv22 = T::one() / self.cols[2].z;
        let z = T::zero();
        Self::from_raw(
            [
                Vector3::new(inv00, z, z),
                Vector3::new(z, inv11, z),
                Vector3::new(z, z, inv22),
                Vector3::new(
                    -self.cols[3].x * inv00,
                    -self.cols[3].y * inv11,
                    -self.cols[3].z * inv22,
                ),
            ],
            Properties::AFFINE,
        )
    }

    #[inline]
    pub fn normalized_rotation(&self) -> Quaternion<T> {
        Quaternion::from_normalized_matrix(self)
    }

    #[inline]
    pub fn unnormalized_rotation(&self) -> Quaternion<T> {
        Quaternion::from_unnormalized_matrix(self)
    }

    #[inline]
    pub fn rotation_axis_angle(&self) -> AxisAngle4<T> {
        AxisAngle4::from_quaternion(self.normalized_rotation())
    }

    /// Angles `(x, y, z)` such that `from_rotation_zyx(z, y, x)` rebuilds
    /// the rotation. Not stable near `y = ±π/2`.
    #[inline]
    pub fn euler_angles_zyx(&self) -> Vector3<T> {
        euler_angles_zyx(&self.rotation_columns())
    }
}

impl<T: Real> RotationSource<T> for Matrix4x3<T> {
    fn rotation_columns(&self) -> [[T; 3]; 3] {
        [self.cols[0].to_array(), self.cols[1].to_array(), self.cols[2].to_array()]
    }
}

impl<T: Real> Default for Matrix4x3<T> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Element-wise equality; cached property bits are ignored.
impl<T: Real> PartialEq for Matrix4x3<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cols == other.cols
    }
}

impl<T: Real> Mul for Matrix4x3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_affine(&rhs)
    }
}

impl<T: Real> MulAssign for Matrix4x3<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Real> Mul<Vector3<T>> for Matrix4x3<T> {
    type Output = Vector3<T>;

    /// Transforms a point
    #[inline]
    fn mul(self, rhs: Vector3<T>) -> Vector3<T> {
        self.transform_position(rhs)
    }
}

macro_rules! impl_matrix4x3_consts {
    ($($t:ty),+) => {$(
        impl Matrix4x3<$t> {
            pub const IDENTITY: Self = Self::from_raw(
                [Vector3::<$t>::X, Vector3::<$t>::Y, Vector3::<$t>::Z, Vector3::<$t>::ZERO],
                Properties::IDENTITY_BITS,
            );
        }
    )+};
}

impl_matrix4x3_consts!(f32, f64);
