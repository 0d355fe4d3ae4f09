//! `approx` comparisons for vectors, rotations, planes and matrices.
//!
//! Every type compares component-wise in its storage order, so
//! `assert_relative_eq!(a, b, epsilon = 1e-6)` works like it does for the
//! scalar type. Matrix property bits are not compared.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::axis_angle::AxisAngle4;
use crate::matrix3::Matrix3;
use crate::matrix4::Matrix4;
use crate::matrix4x3::Matrix4x3;
use crate::plane::Plane;
use crate::quaternion::Quaternion;
use crate::scalar::Real;
use crate::vector::{Vector2, Vector3, Vector4};

macro_rules! impl_approx_eq {
    ($($ty:ident => $components:ident),+ $(,)?) => {$(
        impl<T: Real> AbsDiffEq for $ty<T> {
            type Epsilon = T;

            #[inline]
            fn default_epsilon() -> T {
                T::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
                self.$components()
                    .iter()
                    .zip(other.$components().iter())
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
        }

        impl<T: Real> RelativeEq for $ty<T> {
            #[inline]
            fn default_max_relative() -> T {
                T::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
                self.$components()
                    .iter()
                    .zip(other.$components().iter())
                    .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
            }
        }

        impl<T: Real> UlpsEq for $ty<T> {
            #[inline]
            fn default_max_ulps() -> u32 {
                T::default_max_ulps()
            }

            fn ulps_eq(&self, other: &Self, epsilon: T, max_ulps: u32) -> bool {
                self.$components()
                    .iter()
                    .zip(other.$components().iter())
                    .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
            }
        }
    )+};
}

impl_approx_eq!(
    Vector2 => to_array,
    Vector3 => to_array,
    Vector4 => to_array,
    Quaternion => to_array,
    AxisAngle4 => to_array,
    Plane => to_array,
    Matrix3 => to_cols_array,
    Matrix4x3 => to_cols_array,
    Matrix4 => to_cols_array,
);
