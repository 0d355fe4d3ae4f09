//! # void_linalg - Linear Algebra for Real-Time Graphics
//!
//! Vectors, 3x3/4x3/4x4 matrices, quaternions and camera projections,
//! generic over `f32` and `f64`.
//!
//! Matrices are column-major and carry a [`Properties`] bitmask recording
//! structural facts (affine, identity, pure translation, orthonormal
//! rotation, perspective) so that multiplication and inversion can take
//! cheaper paths. Constructors set the bits they can prove, element-level
//! mutation clears them.
//!
//! ```
//! use void_linalg::prelude::*;
//!
//! let m = Matrix4f::IDENTITY
//!     .translate(Vector3::new(1.0, 2.0, 3.0))
//!     .scale(Vector3::splat(2.0));
//! assert_eq!(m.transform_position(Vector3::splat(1.0)), Vector3::new(3.0, 4.0, 5.0));
//! assert!(m.properties().contains(Properties::AFFINE));
//! ```

pub mod scalar;
pub mod error;
pub mod config;
pub mod properties;
pub mod vector;
pub mod quaternion;
pub mod axis_angle;
pub mod plane;
pub mod matrix3;
pub mod matrix4x3;
pub mod matrix4;
pub mod projection;
pub mod frustum;
pub mod bounds;
mod approx_eq;

pub use scalar::*;
pub use error::{LinalgError, Result};
pub use config::*;
pub use properties::Properties;
pub use vector::*;
pub use quaternion::*;
pub use axis_angle::*;
pub use plane::*;
pub use matrix3::*;
pub use matrix4x3::*;
pub use matrix4::*;
pub use projection::Viewport;
pub use frustum::*;
pub use bounds::*;

/// Common imports for working with the library
pub mod prelude {
    pub use crate::bounds::{Aabb, Sphere};
    pub use crate::config::{ClipSpace, DepthRange, Handedness};
    pub use crate::frustum::{FrustumCorner, FrustumPlane, FrustumPlanes, FrustumTestResult};
    pub use crate::matrix3::{Matrix3, Matrix3d, Matrix3f};
    pub use crate::matrix4::{Matrix4, Matrix4d, Matrix4f};
    pub use crate::matrix4x3::{Matrix4x3, Matrix4x3d, Matrix4x3f};
    pub use crate::plane::Plane;
    pub use crate::properties::Properties;
    pub use crate::quaternion::{Quaternion, Quaterniond, Quaternionf};
    pub use crate::axis_angle::AxisAngle4;
    pub use crate::scalar::Real;
    pub use crate::vector::{Vector2, Vector3, Vector4};
}

/// Common math constants
pub mod consts {
    pub const PI: f64 = core::f64::consts::PI;
    pub const TAU: f64 = PI * 2.0;
    pub const FRAC_PI_2: f64 = PI / 2.0;
    pub const FRAC_PI_4: f64 = PI / 4.0;
    pub const DEG_TO_RAD: f64 = PI / 180.0;
    pub const RAD_TO_DEG: f64 = 180.0 / PI;
}
