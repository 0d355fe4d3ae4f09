//! 4x4 matrix (column-major) - the main transformation matrix
//!
//! Every `Matrix4` carries a [`Properties`] value describing what is known
//! about its structure. Constructors set the bits they can prove; `mul` and
//! `invert` read them to skip work. Element-level writers reset the bits, so
//! they never go stale; `assume_*` lets a caller assert a fact the
//! constructors could not prove.

use crate::axis_angle::AxisAngle4;
use crate::error::{check_len, Result};
use crate::matrix3::{euler_angles_zyx, Matrix3};
use crate::matrix4x3::Matrix4x3;
use crate::properties::Properties;
use crate::quaternion::{rotation_columns_of, Quaternion, RotationSource};
use crate::scalar::Real;
use crate::vector::{Vector3, Vector4};
use core::ops::{Mul, MulAssign};

/// 4x4 matrix, element `mCR` is column `C`, row `R`
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Matrix4<T> {
    cols: [Vector4<T>; 4],
    #[cfg_attr(feature = "serde", serde(skip, default = "Properties::empty"))]
    properties: Properties,
}

pub type Matrix4f = Matrix4<f32>;
pub type Matrix4d = Matrix4<f64>;

impl<T: Real> Matrix4<T> {
    /// Build from columns. Nothing is assumed about the structure; call
    /// [`determine_properties`](Self::determine_properties) to enable fast
    /// paths.
    #[inline]
    pub fn from_cols(c0: Vector4<T>, c1: Vector4<T>, c2: Vector4<T>, c3: Vector4<T>) -> Self {
        Self::from_raw([c0, c1, c2, c3], Properties::empty())
    }

    #[inline]
    pub(crate) const fn from_raw(cols: [Vector4<T>; 4], properties: Properties) -> Self {
        Self { cols, properties }
    }

    /// Build from 16 column-major scalars with the given property bits
    #[inline]
    pub(crate) fn from_array_with(m: [T; 16], properties: Properties) -> Self {
        Self::from_raw(
            [
                Vector4::new(m[0], m[1], m[2], m[3]),
                Vector4::new(m[4], m[5], m[6], m[7]),
                Vector4::new(m[8], m[9], m[10], m[11]),
                Vector4::new(m[12], m[13], m[14], m[15]),
            ],
            properties,
        )
    }

    pub fn identity() -> Self {
        let (o, z) = (T::one(), T::zero());
        Self::from_raw(
            [
                Vector4::new(o, z, z, z),
                Vector4::new(z, o, z, z),
                Vector4::new(z, z, o, z),
                Vector4::new(z, z, z, o),
            ],
            Properties::IDENTITY_BITS,
        )
    }

    pub fn zero() -> Self {
        Self::from_raw([Vector4::zero(); 4], Properties::empty())
    }

    /// Build from 16 scalars in column-major order
    #[inline]
    pub fn from_cols_array(m: [T; 16]) -> Self {
        Self::from_array_with(m, Properties::empty())
    }

    /// Read 16 column-major scalars from the start of `src`
    pub fn from_cols_slice(src: &[T]) -> Result<Self> {
        check_len(0, 16, src.len())?;
        let mut m = [T::zero(); 16];
        m.copy_from_slice(&src[..16]);
        Ok(Self::from_cols_array(m))
    }

    /// The 16 elements in column-major order (`col * 4 + row`)
    #[inline]
    pub fn to_cols_array(&self) -> [T; 16] {
        let [c0, c1, c2, c3] = self.cols;
        [
            c0.x, c0.y, c0.z, c0.w, c1.x, c1.y, c1.z, c1.w, c2.x, c2.y, c2.z, c2.w, c3.x, c3.y,
            c3.z, c3.w,
        ]
    }

    #[inline]
    pub fn to_cols_array_2d(&self) -> [[T; 4]; 4] {
        [
            self.cols[0].to_array(),
            self.cols[1].to_array(),
            self.cols[2].to_array(),
            self.cols[3].to_array(),
        ]
    }

    /// Write the elements column-major into `dest[offset..offset + 16]`.
    /// Nothing outside that range is touched.
    pub fn write_cols(&self, dest: &mut [T], offset: usize) -> Result<()> {
        check_len(offset, 16, dest.len())?;
        dest[offset..offset + 16].copy_from_slice(&self.to_cols_array());
        Ok(())
    }

    #[inline]
    pub fn from_translation(t: Vector3<T>) -> Self {
        let mut m = Self::identity();
        m.cols[3] = t.extend(T::one());
        m.properties = Properties::TRANSLATION_BITS;
        m
    }

    #[inline]
    pub fn from_scale(s: Vector3<T>) -> Self {
        Matrix4x3::from_scale(s).into()
    }

    /// Rotation matrix of `q`; a non-unit `q` also scales by `|q|²`
    pub fn from_quat(q: Quaternion<T>) -> Self {
        let [c0, c1, c2] = rotation_columns_of(q);
        let (z, o) = (T::zero(), T::one());
        Self::from_raw(
            [
                Vector4::new(c0[0], c0[1], c0[2], z),
                Vector4::new(c1[0], c1[1], c1[2], z),
                Vector4::new(c2[0], c2[1], c2[2], z),
                Vector4::new(z, z, z, o),
            ],
            Properties::of_quat(q),
        )
    }

    pub fn from_rotation_translation(q: Quaternion<T>, t: Vector3<T>) -> Self {
        Matrix4x3::from_rotation_translation(q, t).into()
    }

    /// `T * R * S`: points are scaled, then rotated, then translated
    pub fn from_scale_rotation_translation(s: Vector3<T>, q: Quaternion<T>, t: Vector3<T>) -> Self {
        Self::from_rotation_translation(q, t).scale(s)
    }

    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        Self::from_quat(Quaternion::from_axis_angle(axis, angle))
    }

    pub fn from_rotation_x(angle: T) -> Self {
        Matrix4x3::from_matrix3(Matrix3::from_rotation_x(angle), Vector3::zero())
            .determine_properties()
            .into()
    }

    pub fn from_rotation_y(angle: T) -> Self {
        Matrix4x3::from_matrix3(Matrix3::from_rotation_y(angle), Vector3::zero())
            .determine_properties()
            .into()
    }

    pub fn from_rotation_z(angle: T) -> Self {
        Matrix4x3::from_matrix3(Matrix3::from_rotation_z(angle), Vector3::zero())
            .determine_properties()
            .into()
    }

    /// `Rz * Ry * Rx`: rotate about X first, then Y, then Z
    pub fn from_rotation_zyx(angle_z: T, angle_y: T, angle_x: T) -> Self {
        Matrix4x3::from_rotation_zyx(angle_z, angle_y, angle_x).into()
    }

    #[inline]
    pub fn properties(&self) -> Properties {
        self.properties
    }

    /// Assert that the last row is `(0, 0, 0, 1)`
    #[inline]
    pub fn assume_affine(mut self) -> Self {
        self.properties = Properties::AFFINE;
        self
    }

    /// Assert that the matrix has the shape produced by
    /// [`perspective`](Self::perspective)
    #[inline]
    pub fn assume_perspective(mut self) -> Self {
        self.properties = Properties::PERSPECTIVE;
        self
    }

    #[inline]
    pub fn assume_nothing(mut self) -> Self {
        self.properties = Properties::empty();
        self
    }

    /// Recompute the property bits from the element values
    pub fn determine_properties(mut self) -> Self {
        let [_, m01, m02, m03, m10, _, m12, m13, m20, m21, _, m23, m30, m31, _, m33] =
            self.to_cols_array();
        let (z, o) = (T::zero(), T::one());
        self.properties = if m03 == z && m13 == z && m23 == z && m33 == o {
            self.to_matrix4x3().determine_properties().properties()
        } else if m01 == z
            && m02 == z
            && m03 == z
            && m10 == z
            && m12 == z
            && m13 == z
            && m20 == z
            && m21 == z
            && m30 == z
            && m31 == z
            && m33 == z
        {
            Properties::PERSPECTIVE
        } else {
            Properties::empty()
        };
        self
    }

    #[inline]
    pub fn col(&self, index: usize) -> Vector4<T> {
        self.cols[index]
    }

    #[inline]
    pub fn row(&self, index: usize) -> Vector4<T> {
        let a = self.to_cols_array_2d();
        Vector4::new(a[0][index], a[1][index], a[2][index], a[3][index])
    }

    /// Replace a column; property bits are reset
    #[inline]
    pub fn set_col(&mut self, index: usize, col: Vector4<T>) {
        self.cols[index] = col;
        self.properties = Properties::empty();
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

    /// Last row is exactly `(0, 0, 0, 1)`
    #[inline]
    pub fn is_affine(&self) -> bool {
        self.row(3) == Vector4::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Upper-left 3x3 block
    #[inline]
    pub fn matrix3(&self) -> Matrix3<T> {
        Matrix3::from_cols(self.cols[0].xyz(), self.cols[1].xyz(), self.cols[2].xyz())
    }

    /// Inverse transpose of the upper-left 3x3 block, for transforming
    /// normals. An orthonormal block is its own normal matrix.
    pub fn normal(&self) -> Matrix3<T> {
        if self.properties.contains(Properties::ORTHONORMAL) {
            self.matrix3()
        } else {
            self.matrix3().normal()
        }
    }

    /// Drop the last row
    pub fn to_matrix4x3(&self) -> Matrix4x3<T> {
        let bits = self.properties.difference(Properties::PERSPECTIVE) | Properties::AFFINE;
        Matrix4x3::from_raw(
            [
                self.cols[0].xyz(),
                self.cols[1].xyz(),
                self.cols[2].xyz(),
                self.cols[3].xyz(),
            ],
            bits,
        )
    }

    #[inline]
    pub fn translation(&self) -> Vector3<T> {
        self.cols[3].xyz()
    }

    /// Lengths of the first three columns
    #[inline]
    pub fn scale_factors(&self) -> Vector3<T> {
        self.matrix3().scale_factors()
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        let [m00, m01, m02, m03, m10, m11, m12, m13, m20, m21, m22, m23, m30, m31, m32, m33] =
            self.to_cols_array();
        let props = self.properties & Properties::IDENTITY;
        Self::from_array_with(
            [
                m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33,
            ],
            if props.is_empty() { props } else { Properties::IDENTITY_BITS },
        )
    }

    pub fn determinant(&self) -> T {
        if self.properties.contains(Properties::AFFINE) {
            return self.matrix3().determinant();
        }
        let [m00, m01, m02, m03, m10, m11, m12, m13, m20, m21, m22, m23, m30, m31, m32, m33] =
            self.to_cols_array();
        (m00 * m11 - m01 * m10) * (m22 * m33 - m23 * m32)
            + (m02 * m10 - m00 * m12) * (m21 * m33 - m23 * m31)
            + (m00 * m13 - m03 * m10) * (m21 * m32 - m22 * m31)
            + (m01 * m12 - m02 * m11) * (m20 * m33 - m23 * m30)
            + (m03 * m11 - m01 * m13) * (m20 * m32 - m22 * m30)
            + (m02 * m13 - m03 * m12) * (m20 * m31 - m21 * m30)
    }

    /// Apply a translation: `self * T(v)`
    pub fn translate(self, v: Vector3<T>) -> Self {
        if self.properties.contains(Properties::IDENTITY) {
            return Self::from_translation(v);
        }
        let mut m = self;
        m.cols[3] = self.transform(v.extend(T::one()));
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

    /// Apply `Rz * Ry * Rx`
    pub fn rotate_zyx(self, angle_z: T, angle_y: T, angle_x: T) -> Self {
        self.rotate(Quaternion::from_rotation_zyx(angle_z, angle_y, angle_x))
    }

    /// Matrix product, choosing the cheapest form the property bits allow
    pub fn mul_mat(&self, rhs: &Self) -> Self {
        let (lp, rp) = (self.properties, rhs.properties);
        if lp.contains(Properties::IDENTITY) {
            return *rhs;
        }
        if rp.contains(Properties::IDENTITY) {
            return *self;
        }
        if rp.contains(Properties::AFFINE) {
            if lp.contains(Properties::TRANSLATION) {
                return self.mul_translation_affine(rhs);
            }
            if lp.contains(Properties::AFFINE) {
                return self.mul_affine(rhs);
            }
            if lp.contains(Properties::PERSPECTIVE) {
                return self.mul_perspective_affine(rhs);
            }
            return self.mul_affine_r(rhs);
        }
        self.mul_generic(rhs)
    }

    /// Full 4x4 product
    pub fn mul_generic(&self, rhs: &Self) -> Self {
        Self::from_raw(
            [
                self.transform(rhs.cols[0]),
                self.transform(rhs.cols[1]),
                self.transform(rhs.cols[2]),
                self.transform(rhs.cols[3]),
            ],
            Properties::empty(),
        )
    }

    /// Product where `rhs` is affine
    pub fn mul_affine_r(&self, rhs: &Self) -> Self {
        let [c0, c1, c2, c3] = self.cols;
        let dir = |v: Vector4<T>| c0 * v.x + c1 * v.y + c2 * v.z;
        Self::from_raw(
            [
                dir(rhs.cols[0]),
                dir(rhs.cols[1]),
                dir(rhs.cols[2]),
                dir(rhs.cols[3]) + c3,
            ],
            self.properties.after_affine_apply(),
        )
    }

    /// Product where both operands are affine
    pub fn mul_affine(&self, rhs: &Self) -> Self {
        let bits = Properties::AFFINE | (self.properties & rhs.properties & Properties::ORTHONORMAL);
        Self::from(self.to_matrix4x3() * rhs.to_matrix4x3()).with_properties(bits)
    }

    /// `self` is a pure translation, `rhs` affine
    fn mul_translation_affine(&self, rhs: &Self) -> Self {
        let mut m = *rhs;
        m.cols[3] = rhs.cols[3] + self.cols[3].xyz().extend(T::zero());
        m.properties = Properties::AFFINE | (rhs.properties & Properties::ORTHONORMAL);
        m
    }

    /// `self` built by `perspective`, `rhs` affine (typically a view matrix)
    fn mul_perspective_affine(&self, view: &Self) -> Self {
        let [m00, _, _, _, _, m11, _, _, _, _, m22, m23, _, _, m32, _] = self.to_cols_array();
        let [v00, v01, v02, _, v10, v11, v12, _, v20, v21, v22, _, v30, v31, v32, _] =
            view.to_cols_array();
        Self::from_array_with(
            [
                m00 * v00,
                m11 * v01,
                m22 * v02,
                m23 * v02,
                m00 * v10,
                m11 * v11,
                m22 * v12,
                m23 * v12,
                m00 * v20,
                m11 * v21,
                m22 * v22,
                m23 * v22,
                m00 * v30,
                m11 * v31,
                m22 * v32 + m32,
                m23 * v32,
            ],
            Properties::empty(),
        )
    }

    /// Inverse, dispatching on the property bits.
    ///
    /// Singular input yields non-finite elements; it never panics.
    pub fn invert(&self) -> Self {
        let p = self.properties;
        if p.contains(Properties::IDENTITY) {
            return Self::identity();
        }
        if p.contains(Properties::TRANSLATION) {
            return Self::from_translation(-self.translation());
        }
        if p.contains(Properties::AFFINE) {
            if p.contains(Properties::ORTHONORMAL) {
                return self.invert_affine_unit_scale();
            }
            return self.invert_affine();
        }
        if p.contains(Properties::PERSPECTIVE) {
            return self.invert_perspective();
        }
        self.invert_generic()
    }

    /// Cofactor inverse via 2x2 sub-determinants, no shortcuts
    pub fn invert_generic(&self) -> Self {
        let [m00, m01, m02, m03, m10, m11, m12, m13, m20, m21, m22, m23, m30, m31, m32, m33] =
            self.to_cols_array();
        let a = m00 * m11 - m01 * m10;
        let b = m00 * m12 - m02 * m10;
        let c = m00 * m13 - m03 * m10;
        let d = m01 * m12 - m02 * m11;
        let e = m01 * m13 - m03 * m11;
        let f = m02 * m13 - m03 * m12;
        let g = m20 * m31 - m21 * m30;
        let h = m20 * m32 - m22 * m30;
        let i = m20 * m33 - m23 * m30;
        let j = m21 * m32 - m22 * m31;
        let k = m21 * m33 - m23 * m31;
        let l = m22 * m33 - m23 * m32;
        let det = a * l - b * k + c * j + d * i - e * h + f * g;
        if cfg!(debug_assertions) && det == T::zero() {
            log::debug!("inverting singular 4x4 matrix");
        }
        let det = T::one() / det;
        Self::from_array_with(
            [
                (m11 * l - m12 * k + m13 * j) * det,
                (-m01 * l + m02 * k - m03 * j) * det,
                (m31 * f - m32 * e + m33 * d) * det,
                (-m21 * f + m22 * e - m23 * d) * det,
                (-m10 * l + m12 * i - m13 * h) * det,
                (m00 * l - m02 * i + m03 * h) * det,
                (-m30 * f + m32 * c - m33 * b) * det,
                (m20 * f - m22 * c + m23 * b) * det,
                (m10 * k - m11 * i + m13 * g) * det,
                (-m00 * k + m01 * i - m03 * g) * det,
                (m30 * e - m31 * c + m33 * a) * det,
                (-m20 * e + m21 * c - m23 * a) * det,
                (-m10 * j + m11 * h - m12 * g) * det,
                (m00 * j - m01 * h + m02 * g) * det,
                (-m30 * d + m31 * b - m32 * a) * det,
                (m20 * d - m21 * b + m22 * a) * det,
            ],
            Properties::empty(),
        )
    }

    /// Inverse of an affine matrix. The last row is assumed to be
    /// `(0, 0, 0, 1)` and not read.
    pub fn invert_affine(&self) -> Self {
        self.warn_if_not_affine("invert_affine");
        self.to_matrix4x3().invert_affine().into()
    }

    /// Inverse of an affine matrix with an orthonormal 3x3 block (rotation
    /// plus translation): `R⁻¹ = Rᵗ`.
    pub fn invert_affine_unit_scale(&self) -> Self {
        self.warn_if_not_affine("invert_affine_unit_scale");
        self.to_matrix4x3().invert_unit_scale().into()
    }

    /// Inverse of a view matrix built by `look_at`/`look_along`
    #[inline]
    pub fn invert_look_at(&self) -> Self {
        self.invert_affine_unit_scale()
    }

    /// Inverse of a matrix built by `orthographic`: diagonal scale plus
    /// translation only
    pub fn invert_ortho(&self) -> Self {
        self.warn_if_not_affine("invert_ortho");
        self.to_matrix4x3().invert_ortho().into()
    }

    /// Inverse of a matrix built by `perspective`
    #[rustfmt::skip]
    pub fn invert_perspective(&self) -> Self {
        let [m00, _, _, _, _, m11, _, _, _, _, m22, m23, _, _, m32, _] = self.to_cols_array();
        let a = T::one() / (m00 * m11);
        let l = -T::one() / (m23 * m32);
        let z = T::zero();
        Self::from_array_with(
            [
                m11 * a, z, z, z,
                z, m00 * a, z, z,
                z, z, z, -m23 * l,
                z, z, -m32 * l, m22 * l,
            ],
            Properties::empty(),
        )
    }

    /// Inverse of a matrix built by `frustum`
    #[rustfmt::skip]
    pub fn invert_frustum(&self) -> Self {
        let [m00, _, _, _, _, m11, _, _, m20, m21, m22, m23, _, _, m32, _] = self.to_cols_array();
        let inv_m00 = T::one() / m00;
        let inv_m11 = T::one() / m11;
        let inv_m23 = T::one() / m23;
        let inv_m32 = T::one() / m32;
        let z = T::zero();
        Self::from_array_with(
            [
                inv_m00, z, z, z,
                z, inv_m11, z, z,
                z, z, z, inv_m32,
                -m20 * inv_m00 * inv_m23, -m21 * inv_m11 * inv_m23, inv_m23, -m22 * inv_m23 * inv_m32,
            ],
            Properties::empty(),
        )
    }

    /// `(self * view)⁻¹` where `self` was built by `perspective` and
    /// `view` is an orthonormal affine view matrix
    #[rustfmt::skip]
    pub fn invert_perspective_view(&self, view: &Self) -> Self {
        let [m00, _, _, _, _, m11, _, _, _, _, m22, m23, _, _, m32, _] = self.to_cols_array();
        let a = T::one() / (m00 * m11);
        let l = -T::one() / (m23 * m32);
        let pm00 = m11 * a;
        let pm11 = m00 * a;
        let pm23 = -m23 * l;
        let pm32 = -m32 * l;
        let pm33 = m22 * l;

        let [v00, v01, v02, _, v10, v11, v12, _, v20, v21, v22, _, v30, v31, v32, _] =
            view.to_cols_array();
        let vm30 = -(v00 * v30 + v01 * v31 + v02 * v32);
        let vm31 = -(v10 * v30 + v11 * v31 + v12 * v32);
        let vm32 = -(v20 * v30 + v21 * v31 + v22 * v32);
        let z = T::zero();
        Self::from_array_with(
            [
                v00 * pm00, v10 * pm00, v20 * pm00, z,
                v01 * pm11, v11 * pm11, v21 * pm11, z,
                vm30 * pm23, vm31 * pm23, vm32 * pm23, pm23,
                v02 * pm32 + vm30 * pm33, v12 * pm32 + vm31 * pm33, v22 * pm32 + vm32 * pm33, pm33,
            ],
            Properties::empty(),
        )
    }

    fn warn_if_not_affine(&self, op: &str) {
        if cfg!(debug_assertions) && !self.is_affine() {
            log::warn!("{} called on a matrix with last row {:?}", op, self.row(3));
        }
    }

    #[inline]
    pub(crate) fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// `self * v`
    #[inline]
    pub fn transform(&self, v: Vector4<T>) -> Vector4<T> {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }

    /// Transform a point of an affine matrix (`w = 1`, no divide)
    #[inline]
    pub fn transform_position(&self, p: Vector3<T>) -> Vector3<T> {
        self.transform(p.extend(T::one())).xyz()
    }

    /// Transform a direction (`w = 0`)
    #[inline]
    pub fn transform_direction(&self, v: Vector3<T>) -> Vector3<T> {
        self.transform(v.extend(T::zero())).xyz()
    }

    /// Transform a point and divide by the resulting `w`
    #[inline]
    pub fn transform_project(&self, p: Vector3<T>) -> Vector3<T> {
        self.transform(p.extend(T::one())).project()
    }

    /// Rotation of a matrix whose 3x3 block is orthonormal
    #[inline]
    pub fn normalized_rotation(&self) -> Quaternion<T> {
        Quaternion::from_normalized_matrix(self)
    }

    /// Rotation of a matrix whose columns may carry scale
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

impl<T: Real> RotationSource<T> for Matrix4<T> {
    fn rotation_columns(&self) -> [[T; 3]; 3] {
        [
            self.cols[0].xyz().to_array(),
            self.cols[1].xyz().to_array(),
            self.cols[2].xyz().to_array(),
        ]
    }
}

impl<T: Real> Default for Matrix4<T> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Element-wise equality; cached property bits are ignored.
impl<T: Real> PartialEq for Matrix4<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cols == other.cols
    }
}

impl<T: Real> From<Matrix4x3<T>> for Matrix4<T> {
    fn from(m: Matrix4x3<T>) -> Self {
        let (z, o) = (T::zero(), T::one());
        Self::from_raw(
            [
                m.col(0).extend(z),
                m.col(1).extend(z),
                m.col(2).extend(z),
                m.col(3).extend(o),
            ],
            m.properties(),
        )
    }
}

impl<T: Real> From<Matrix3<T>> for Matrix4<T> {
    fn from(m: Matrix3<T>) -> Self {
        Matrix4x3::from_matrix3(m, Vector3::zero()).into()
    }
}

impl<T: Real> From<Quaternion<T>> for Matrix4<T> {
    fn from(q: Quaternion<T>) -> Self {
        Self::from_quat(q)
    }
}

impl<T: Real> Mul for Matrix4<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl<T: Real> MulAssign for Matrix4<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Real> Mul<Vector4<T>> for Matrix4<T> {
    type Output = Vector4<T>;

    #[inline]
    fn mul(self, rhs: Vector4<T>) -> Vector4<T> {
        self.transform(rhs)
    }
}

macro_rules! impl_matrix4_consts {
    ($($t:ty),+) => {$(
        impl Matrix4<$t> {
            pub const IDENTITY: Self = Self::from_raw(
                [Vector4::<$t>::X, Vector4::<$t>::Y, Vector4::<$t>::Z, Vector4::<$t>::W],
                Properties::IDENTITY_BITS,
            );

            pub const ZERO: Self = Self::from_raw([Vector4::<$t>::ZERO; 4], Properties::empty());
        }
    )+};
}

impl_matrix4_consts!(f32, f64);
