//! Structural property bits cached on `Matrix4` and `Matrix4x3`.
//!
//! The bits let `mul` and `invert` pick a cheaper algorithm. They are set by
//! the constructors that can prove them and cleared by any element-level
//! mutation, so a matrix never claims a property it has lost. The bit layout
//! is stable and exposed through [`Properties::bits`].

use crate::quaternion::Quaternion;
use crate::scalar::Real;
use bitflags::bitflags;

bitflags! {
    /// Known structural facts about a matrix
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Properties: u8 {
        /// Built by a perspective projection constructor
        const PERSPECTIVE = 1 << 0;
        /// Last row is `(0, 0, 0, 1)`
        const AFFINE = 1 << 1;
        /// Exactly the identity
        const IDENTITY = 1 << 2;
        /// Identity 3x3 block plus a translation
        const TRANSLATION = 1 << 3;
        /// Upper-left 3x3 block is orthonormal (rotation without scale)
        const ORTHONORMAL = 1 << 4;
    }
}

impl Properties {
    /// Bits of the identity matrix
    pub const IDENTITY_BITS: Self = Self::IDENTITY
        .union(Self::AFFINE)
        .union(Self::TRANSLATION)
        .union(Self::ORTHONORMAL);

    /// Bits of a pure translation
    pub const TRANSLATION_BITS: Self = Self::AFFINE
        .union(Self::TRANSLATION)
        .union(Self::ORTHONORMAL);

    /// Bits of an affine rotation (with optional translation)
    pub const RIGID_BITS: Self = Self::AFFINE.union(Self::ORTHONORMAL);

    /// Bits that survive post-multiplying by an arbitrary affine transform
    /// whose exact shape is unknown.
    #[inline]
    pub fn after_affine_apply(self) -> Self {
        self.difference(Self::PERSPECTIVE | Self::IDENTITY | Self::TRANSLATION | Self::ORTHONORMAL)
    }

    /// Bits that survive post-multiplying by a rotation
    #[inline]
    pub fn after_rotation_apply(self) -> Self {
        self.difference(Self::PERSPECTIVE | Self::IDENTITY | Self::TRANSLATION)
    }

    /// Bits that survive post-multiplying by the rotation of `q`. A non-unit
    /// `q` also scales, so `ORTHONORMAL` is only kept for a unit `q`.
    #[inline]
    pub(crate) fn after_quat_apply<T: Real>(self, q: Quaternion<T>) -> Self {
        let bits = self.after_rotation_apply();
        if is_unit_quat(q) {
            bits
        } else {
            bits.difference(Self::ORTHONORMAL)
        }
    }

    /// Bits of the matrix built from `q`
    #[inline]
    pub(crate) fn of_quat<T: Real>(q: Quaternion<T>) -> Self {
        if is_unit_quat(q) {
            Self::RIGID_BITS
        } else {
            Self::AFFINE
        }
    }

    /// Bits that survive post-multiplying by a translation
    #[inline]
    pub fn after_translation_apply(self) -> Self {
        self.difference(Self::PERSPECTIVE | Self::IDENTITY)
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self::empty()
    }
}

/// Comparison within [`Real::PROPERTY_TOLERANCE`]
#[inline]
pub(crate) fn near<T: Real>(a: T, b: T) -> bool {
    (a - b).abs() <= T::lit(T::PROPERTY_TOLERANCE)
}

#[inline]
pub(crate) fn is_unit_quat<T: Real>(q: Quaternion<T>) -> bool {
    near(q.length_squared(), T::one())
}

/// `true` if the three columns form an orthonormal basis.
pub(crate) fn is_orthonormal_3x3<T: Real>(c: &[[T; 3]; 3]) -> bool {
    let dot = |a: &[T; 3], b: &[T; 3]| a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    let tol = T::lit(T::PROPERTY_TOLERANCE * 16.0);
    let unit = |a: &[T; 3]| (dot(a, a) - T::one()).abs() <= tol;
    unit(&c[0])
        && unit(&c[1])
        && unit(&c[2])
        && dot(&c[0], &c[1]).abs() <= tol
        && dot(&c[0], &c[2]).abs() <= tol
        && dot(&c[1], &c[2]).abs() <= tol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_layout() {
        assert_eq!(Properties::PERSPECTIVE.bits(), 1);
        assert_eq!(Properties::AFFINE.bits(), 2);
        assert_eq!(Properties::IDENTITY.bits(), 4);
        assert_eq!(Properties::TRANSLATION.bits(), 8);
        assert_eq!(Properties::ORTHONORMAL.bits(), 16);
    }

    #[test]
    fn test_quat_bits_need_unit_length() {
        let unit = Quaternion::new(0.0, 0.0, 0.6, 0.8);
        let doubled = Quaternion::new(0.0, 0.0, 1.2, 1.6);
        assert_eq!(Properties::of_quat(unit), Properties::RIGID_BITS);
        assert_eq!(Properties::of_quat(doubled), Properties::AFFINE);
        assert_eq!(Properties::IDENTITY_BITS.after_quat_apply(unit), Properties::RIGID_BITS);
        assert_eq!(Properties::IDENTITY_BITS.after_quat_apply(doubled), Properties::AFFINE);
    }

    #[test]
    fn test_identity_bits() {
        let bits = Properties::IDENTITY_BITS;
        assert!(bits.contains(Properties::AFFINE | Properties::TRANSLATION));
        assert!(!bits.contains(Properties::PERSPECTIVE));
        assert_eq!(bits.after_affine_apply(), Properties::AFFINE);
        assert_eq!(bits.after_rotation_apply(), Properties::RIGID_BITS);
        assert_eq!(bits.after_translation_apply(), Properties::TRANSLATION_BITS);
    }

    #[test]
    fn test_orthonormal_check() {
        let rot = [[0.0f32, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(is_orthonormal_3x3(&rot));

        let scaled = [[2.0f32, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(!is_orthonormal_3x3(&scaled));
    }
}
