//! Vector types

use crate::scalar::Real;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

/// 3D vector - the workhorse of 3D graphics
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// 4D vector - for homogeneous coordinates and plane equations
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vector4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type Vector2f = Vector2<f32>;
pub type Vector2d = Vector2<f64>;
pub type Vector3f = Vector3<f32>;
pub type Vector3d = Vector3<f64>;
pub type Vector4f = Vector4<f32>;
pub type Vector4d = Vector4<f64>;

impl<T: Real> Vector2<T> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    #[inline]
    pub fn splat(v: T) -> Self {
        Self::new(v, v)
    }

    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > T::zero() { self / len } else { Self::zero() }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }

    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn extend(self, z: T) -> Vector3<T> {
        Vector3::new(self.x, self.y, z)
    }

    #[inline]
    pub fn from_array(a: [T; 2]) -> Self {
        Self::new(a[0], a[1])
    }

    #[inline]
    pub fn to_array(self) -> [T; 2] {
        [self.x, self.y]
    }
}

impl<T: Real> Vector3<T> {
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    #[inline]
    pub fn one() -> Self {
        Self::splat(T::one())
    }

    #[inline]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }

    #[inline]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one(), T::zero())
    }

    #[inline]
    pub fn unit_z() -> Self {
        Self::new(T::zero(), T::zero(), T::one())
    }

    #[inline]
    pub fn splat(v: T) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Self) -> T {
        (self - other).length()
    }

    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > T::zero() { self / len } else { Self::zero() }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }

    #[inline]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * T::two() * self.dot(normal)
    }

    #[inline]
    pub fn mul_elementwise(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn extend(self, w: T) -> Vector4<T> {
        Vector4::new(self.x, self.y, self.z, w)
    }

    #[inline]
    pub fn truncate(self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn from_array(a: [T; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    #[inline]
    pub fn to_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }
}

impl<T: Real> Vector4<T> {
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    #[inline]
    pub fn unit_w() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    #[inline]
    pub fn splat(v: T) -> Self {
        Self::new(v, v, v, v)
    }

    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > T::zero() { self / len } else { Self::zero() }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    #[inline]
    pub fn truncate(self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn xyz(self) -> Vector3<T> {
        self.truncate()
    }

    /// Divide `x`, `y`, `z` by `w` (perspective divide)
    #[inline]
    pub fn project(self) -> Vector3<T> {
        let inv_w = T::one() / self.w;
        Vector3::new(self.x * inv_w, self.y * inv_w, self.z * inv_w)
    }

    #[inline]
    pub fn from_array(a: [T; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

macro_rules! impl_vector_ops {
    ($V:ident { $($f:ident),+ }) => {
        impl<T: Real> Add for $V<T> {
            type Output = Self;
            #[inline] fn add(self, rhs: Self) -> Self { Self { $($f: self.$f + rhs.$f),+ } }
        }
        impl<T: Real> Sub for $V<T> {
            type Output = Self;
            #[inline] fn sub(self, rhs: Self) -> Self { Self { $($f: self.$f - rhs.$f),+ } }
        }
        impl<T: Real> Mul<T> for $V<T> {
            type Output = Self;
            #[inline] fn mul(self, rhs: T) -> Self { Self { $($f: self.$f * rhs),+ } }
        }
        impl<T: Real> Div<T> for $V<T> {
            type Output = Self;
            #[inline] fn div(self, rhs: T) -> Self { Self { $($f: self.$f / rhs),+ } }
        }
        impl<T: Real> Neg for $V<T> {
            type Output = Self;
            #[inline] fn neg(self) -> Self { Self { $($f: -self.$f),+ } }
        }
        impl<T: Real> AddAssign for $V<T> {
            #[inline] fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
        }
        impl<T: Real> SubAssign for $V<T> {
            #[inline] fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
        }
        impl<T: Real> MulAssign<T> for $V<T> {
            #[inline] fn mul_assign(&mut self, rhs: T) { *self = *self * rhs; }
        }
        impl<T: Real> DivAssign<T> for $V<T> {
            #[inline] fn div_assign(&mut self, rhs: T) { *self = *self / rhs; }
        }
        impl Mul<$V<f32>> for f32 {
            type Output = $V<f32>;
            #[inline] fn mul(self, rhs: $V<f32>) -> $V<f32> { rhs * self }
        }
        impl Mul<$V<f64>> for f64 {
            type Output = $V<f64>;
            #[inline] fn mul(self, rhs: $V<f64>) -> $V<f64> { rhs * self }
        }
    };
}

impl_vector_ops!(Vector2 { x, y });
impl_vector_ops!(Vector3 { x, y, z });
impl_vector_ops!(Vector4 { x, y, z, w });

macro_rules! impl_vector_consts {
    ($($t:ty),+) => {$(
        impl Vector2<$t> {
            pub const ZERO: Self = Self::new(0.0, 0.0);
            pub const ONE: Self = Self::new(1.0, 1.0);
            pub const X: Self = Self::new(1.0, 0.0);
            pub const Y: Self = Self::new(0.0, 1.0);
        }

        impl Vector3<$t> {
            pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
            pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
            pub const X: Self = Self::new(1.0, 0.0, 0.0);
            pub const Y: Self = Self::new(0.0, 1.0, 0.0);
            pub const Z: Self = Self::new(0.0, 0.0, 1.0);
        }

        impl Vector4<$t> {
            pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
            pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
            pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
            pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
            pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
            pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);
        }
    )+};
}

impl_vector_consts!(f32, f64);

impl<T: Real> From<[T; 2]> for Vector2<T> {
    fn from(a: [T; 2]) -> Self {
        Self::from_array(a)
    }
}

impl<T: Real> From<[T; 3]> for Vector3<T> {
    fn from(a: [T; 3]) -> Self {
        Self::from_array(a)
    }
}

impl<T: Real> From<[T; 4]> for Vector4<T> {
    fn from(a: [T; 4]) -> Self {
        Self::from_array(a)
    }
}
