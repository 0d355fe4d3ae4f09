//! Camera, projection and view-space constructors
//!
//! Every projection takes a `z_zero_to_one` flag: `true` maps the near/far
//! planes to NDC depth `0..1` (Vulkan, Direct3D), `false` to `-1..1`
//! (OpenGL). Right-handed variants look down `-Z`, the `_lh` variants down
//! `+Z`. The `*_in` constructors read both choices from a [`ClipSpace`].

use crate::config::ClipSpace;
use crate::matrix4::Matrix4;
use crate::matrix4x3::Matrix4x3;
use crate::plane::Plane;
use crate::properties::Properties;
use crate::scalar::Real;
use crate::vector::{Vector3, Vector4};

/// Offset used by infinite near/far projections
const INFINITE_EPSILON: f64 = 1e-6;

/// Window viewport `[x, y, width, height]`
pub type Viewport = [i32; 4];

/// IEEE normalization: a zero vector becomes non-finite instead of zero
#[inline]
fn unit<T: Real>(v: Vector3<T>) -> Vector3<T> {
    v * v.length_squared().inv_sqrt()
}

/// `(m22, m32)` of a perspective/frustum projection.
fn depth_terms<T: Real>(near: T, far: T, z_zero_to_one: bool, left_handed: bool) -> (T, T) {
    let e = T::lit(INFINITE_EPSILON);
    let (zero, one, two) = (T::zero(), T::one(), T::two());
    if far.is_positive_infinity() {
        let m22 = if left_handed { one - e } else { e - one };
        (m22, (e - if z_zero_to_one { one } else { two }) * near)
    } else if near.is_positive_infinity() {
        let m22 = (if z_zero_to_one { zero } else { one }) - e;
        (m22, ((if z_zero_to_one { one } else { two }) - e) * far)
    } else {
        let num = if z_zero_to_one { far } else { far + near };
        let m22 = if left_handed { num / (far - near) } else { num / (near - far) };
        let m32 = (if z_zero_to_one { far } else { far + far }) * near / (near - far);
        (m22, m32)
    }
}

/// `(m22, m32)` of an orthographic projection.
fn ortho_depth_terms<T: Real>(near: T, far: T, z_zero_to_one: bool, left_handed: bool) -> (T, T) {
    let scale = if z_zero_to_one { T::one() } else { T::two() };
    let m22 = if left_handed { scale / (far - near) } else { scale / (near - far) };
    let m32 = (if z_zero_to_one { near } else { far + near }) / (near - far);
    (m22, m32)
}

fn viewport_f<T: Real>(viewport: Viewport) -> [T; 4] {
    viewport.map(|v| T::lit(f64::from(v)))
}

impl<T: Real> Matrix4<T> {
    #[rustfmt::skip]
    fn perspective_impl(fov_y: T, aspect: T, near: T, far: T, z_zero_to_one: bool, lh: bool) -> Self {
        let h = (fov_y * T::half()).tan();
        let (m22, m32) = depth_terms(near, far, z_zero_to_one, lh);
        let z = T::zero();
        let m23 = if lh { T::one() } else { -T::one() };
        Self::from_array_with(
            [
                T::one() / (h * aspect), z, z, z,
                z, T::one() / h, z, z,
                z, z, m22, m23,
                z, z, m32, z,
            ],
            Properties::PERSPECTIVE,
        )
    }

    /// Right-handed perspective projection. `far = +Inf` (or `near = +Inf`)
    /// builds an infinite projection.
    pub fn perspective(fov_y: T, aspect: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        Self::perspective_impl(fov_y, aspect, near, far, z_zero_to_one, false)
    }

    /// Left-handed perspective projection
    pub fn perspective_lh(fov_y: T, aspect: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        Self::perspective_impl(fov_y, aspect, near, far, z_zero_to_one, true)
    }

    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    fn frustum_impl(left: T, right: T, bottom: T, top: T, near: T, far: T, z_zero_to_one: bool, lh: bool) -> Self {
        let (m22, m32) = depth_terms(near, far, z_zero_to_one, lh);
        let z = T::zero();
        let m23 = if lh { T::one() } else { -T::one() };
        Self::from_array_with(
            [
                (near + near) / (right - left), z, z, z,
                z, (near + near) / (top - bottom), z, z,
                (right + left) / (right - left), (top + bottom) / (top - bottom), m22, m23,
                z, z, m32, z,
            ],
            Properties::empty(),
        )
    }

    /// Right-handed off-center perspective frustum
    pub fn frustum(left: T, right: T, bottom: T, top: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        Self::frustum_impl(left, right, bottom, top, near, far, z_zero_to_one, false)
    }

    /// Left-handed off-center perspective frustum
    pub fn frustum_lh(left: T, right: T, bottom: T, top: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        Self::frustum_impl(left, right, bottom, top, near, far, z_zero_to_one, true)
    }

    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    fn orthographic_impl(left: T, right: T, bottom: T, top: T, near: T, far: T, z_zero_to_one: bool, lh: bool) -> Self {
        let (m22, m32) = ortho_depth_terms(near, far, z_zero_to_one, lh);
        let (z, o) = (T::zero(), T::one());
        Self::from_array_with(
            [
                T::two() / (right - left), z, z, z,
                z, T::two() / (top - bottom), z, z,
                z, z, m22, z,
                (right + left) / (left - right), (top + bottom) / (bottom - top), m32, o,
            ],
            Properties::AFFINE,
        )
    }

    /// Right-handed orthographic projection of the box
    /// `[left, right] x [bottom, top] x [-near, -far]`
    pub fn orthographic(left: T, right: T, bottom: T, top: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        Self::orthographic_impl(left, right, bottom, top, near, far, z_zero_to_one, false)
    }

    /// Left-handed orthographic projection
    pub fn orthographic_lh(left: T, right: T, bottom: T, top: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        Self::orthographic_impl(left, right, bottom, top, near, far, z_zero_to_one, true)
    }

    /// Orthographic projection centered on the view axis
    pub fn orthographic_symmetric(width: T, height: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        let (hw, hh) = (width * T::half(), height * T::half());
        Self::orthographic_impl(-hw, hw, -hh, hh, near, far, z_zero_to_one, false)
    }

    pub fn orthographic_symmetric_lh(width: T, height: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        let (hw, hh) = (width * T::half(), height * T::half());
        Self::orthographic_impl(-hw, hw, -hh, hh, near, far, z_zero_to_one, true)
    }

    #[rustfmt::skip]
    fn orthographic_2d_impl(left: T, right: T, bottom: T, top: T, lh: bool) -> Self {
        let (z, o) = (T::zero(), T::one());
        Self::from_array_with(
            [
                T::two() / (right - left), z, z, z,
                z, T::two() / (top - bottom), z, z,
                z, z, if lh { o } else { -o }, z,
                -(right + left) / (right - left), -(top + bottom) / (top - bottom), z, o,
            ],
            Properties::AFFINE,
        )
    }

    /// Orthographic projection with `near = -1` and `far = 1`, for 2D
    /// rendering
    pub fn orthographic_2d(left: T, right: T, bottom: T, top: T) -> Self {
        Self::orthographic_2d_impl(left, right, bottom, top, false)
    }

    pub fn orthographic_2d_lh(left: T, right: T, bottom: T, top: T) -> Self {
        Self::orthographic_2d_impl(left, right, bottom, top, true)
    }

    /// [`perspective`](Self::perspective) or
    /// [`perspective_lh`](Self::perspective_lh) as selected by `clip`
    pub fn perspective_in(clip: ClipSpace, fov_y: T, aspect: T, near: T, far: T) -> Self {
        log::trace!("perspective projection for {:?}", clip);
        Self::perspective_impl(fov_y, aspect, near, far, clip.is_zero_to_one(), clip.is_left_handed())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn frustum_in(clip: ClipSpace, left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
        log::trace!("frustum projection for {:?}", clip);
        Self::frustum_impl(left, right, bottom, top, near, far, clip.is_zero_to_one(), clip.is_left_handed())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn orthographic_in(clip: ClipSpace, left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
        log::trace!("orthographic projection for {:?}", clip);
        Self::orthographic_impl(left, right, bottom, top, near, far, clip.is_zero_to_one(), clip.is_left_handed())
    }

    /// View matrix from basis vectors (rows) and eye position
    #[rustfmt::skip]
    fn view_from_basis(x: Vector3<T>, y: Vector3<T>, z: Vector3<T>, eye: Vector3<T>) -> Self {
        let (zero, one) = (T::zero(), T::one());
        Self::from_array_with(
            [
                x.x, y.x, z.x, zero,
                x.y, y.y, z.y, zero,
                x.z, y.z, z.z, zero,
                -x.dot(eye), -y.dot(eye), -z.dot(eye), one,
            ],
            Properties::RIGID_BITS,
        )
    }

    /// Right-handed view matrix: `eye` looks at `center`, `-Z` is forward
    pub fn look_at(eye: Vector3<T>, center: Vector3<T>, up: Vector3<T>) -> Self {
        let dir = unit(eye - center);
        let left = unit(up.cross(dir));
        let upn = dir.cross(left);
        Self::view_from_basis(left, upn, dir, eye)
    }

    /// Left-handed view matrix: `+Z` is forward
    pub fn look_at_lh(eye: Vector3<T>, center: Vector3<T>, up: Vector3<T>) -> Self {
        let dir = unit(center - eye);
        let left = unit(up.cross(dir));
        let upn = dir.cross(left);
        Self::view_from_basis(left, upn, dir, eye)
    }

    /// Right-handed rotation-only view matrix looking along `dir`
    pub fn look_along(dir: Vector3<T>, up: Vector3<T>) -> Self {
        Self::look_at(Vector3::zero(), dir, up)
    }

    /// Apply a planar projection that casts shadows from `light` onto
    /// `plane`: `self * S`.
    ///
    /// `light.w = 0` is a directional light, `1` a point light. The result
    /// is a projective matrix, so all property bits are cleared.
    #[rustfmt::skip]
    pub fn shadow(self, light: Vector4<T>, plane: Plane<T>) -> Self {
        let p = plane.normalize();
        let dot = p.to_vector4().dot(light);
        let l = light;
        let shadow = Self::from_array_with(
            [
                dot - p.a * l.x, -p.a * l.y, -p.a * l.z, -p.a * l.w,
                -p.b * l.x, dot - p.b * l.y, -p.b * l.z, -p.b * l.w,
                -p.c * l.x, -p.c * l.y, dot - p.c * l.z, -p.c * l.w,
                -p.d * l.x, -p.d * l.y, -p.d * l.z, dot - p.d * l.w,
            ],
            Properties::empty(),
        );
        self.mul_generic(&shadow)
    }

    /// [`shadow`](Self::shadow) onto the `y = 0` plane of `plane_transform`
    pub fn shadow_onto(self, light: Vector4<T>, plane_transform: &Matrix4<T>) -> Self {
        let n = plane_transform.col(1).xyz();
        let t = plane_transform.translation();
        self.shadow(light, Plane::new(n.x, n.y, n.z, -n.dot(t)))
    }

    /// Apply a picking region: maps the window rectangle of size
    /// `width x height` centred at `(x, y)` onto the whole viewport.
    pub fn pick(self, x: T, y: T, width: T, height: T, viewport: Viewport) -> Self {
        let [vx, vy, vw, vh] = viewport_f::<T>(viewport);
        let sx = vw / width;
        let sy = vh / height;
        let tx = (vw + T::two() * (vx - x)) / width;
        let ty = (vh + T::two() * (vy - y)) / height;
        let (z, o) = (T::zero(), T::one());
        let region = Self::from_array_with(
            [sx, z, z, z, z, sy, z, z, z, z, o, z, tx, ty, z, o],
            Properties::AFFINE,
        );
        (self * region).assume_nothing()
    }

    /// Apply an arcball view: orbit `center` at distance `radius` by
    /// `angle_x` around X, then `angle_y` around Y.
    pub fn arcball(self, radius: T, center: Vector3<T>, angle_x: T, angle_y: T) -> Self {
        self.translate(Vector3::new(T::zero(), T::zero(), -radius))
            .rotate_x(angle_x)
            .rotate_y(angle_y)
            .translate(-center)
    }

    /// Model matrix that rotates an object at `obj_pos` about `up` so its
    /// `+Z` faces `target_pos`. `up` must be unit length.
    pub fn billboard_cylindrical(obj_pos: Vector3<T>, target_pos: Vector3<T>, up: Vector3<T>) -> Self {
        let dir = target_pos - obj_pos;
        let left = unit(up.cross(dir));
        let dir = unit(left.cross(up));
        Matrix4x3::from_cols(left, up, dir, obj_pos).into()
    }

    /// Model matrix whose `+Z` points at `target_pos`, keeping `+Y` as
    /// close to `up` as possible
    pub fn billboard_spherical(obj_pos: Vector3<T>, target_pos: Vector3<T>, up: Vector3<T>) -> Self {
        let dir = unit(target_pos - obj_pos);
        let left = unit(up.cross(dir));
        let upn = dir.cross(left);
        Self::from(Matrix4x3::from_cols(left, upn, dir, obj_pos)).with_properties(Properties::RIGID_BITS)
    }

    /// Model matrix whose `+Z` points at `target_pos` using the shortest
    /// arc, with no up vector
    pub fn billboard_spherical_facing(obj_pos: Vector3<T>, target_pos: Vector3<T>) -> Self {
        let to_dir = target_pos - obj_pos;
        let x = -to_dir.y;
        let y = to_dir.x;
        let w = to_dir.length() + to_dir.z;
        let inv_norm = (x * x + y * y + w * w).inv_sqrt();
        let (x, y, w) = (x * inv_norm, y * inv_norm, w * inv_norm);
        let q00 = (x + x) * x;
        let q11 = (y + y) * y;
        let q01 = (x + x) * y;
        let q03 = (x + x) * w;
        let q13 = (y + y) * w;
        let o = T::one();
        Self::from(Matrix4x3::from_cols(
            Vector3::new(o - q11, q01, -q13),
            Vector3::new(q01, o - q00, q03),
            Vector3::new(q13, -q03, o - q11 - q00),
            obj_pos,
        ))
        .with_properties(Properties::RIGID_BITS)
    }

    /// Object space to window coordinates. Window depth is `0..1` for an
    /// NDC depth of `-1..1`.
    pub fn project(&self, p: Vector3<T>, viewport: Viewport) -> Vector3<T> {
        let [vx, vy, vw, vh] = viewport_f::<T>(viewport);
        let ndc = self.transform_project(p);
        let half = T::half();
        Vector3::new(
            (ndc.x * half + half) * vw + vx,
            (ndc.y * half + half) * vh + vy,
            (T::one() + ndc.z) * half,
        )
    }

    /// Inverse of [`project`](Self::project)
    pub fn unproject(&self, win: Vector3<T>, viewport: Viewport) -> Vector3<T> {
        self.invert_generic().unproject_inv(win, viewport)
    }

    /// Ray through the window position `(win_x, win_y)` as
    /// `(origin on the near plane, direction to the far plane)`
    pub fn unproject_ray(&self, win_x: T, win_y: T, viewport: Viewport) -> (Vector3<T>, Vector3<T>) {
        let inv = self.invert_generic();
        let origin = inv.unproject_inv(Vector3::new(win_x, win_y, T::zero()), viewport);
        let far = inv.unproject_inv(Vector3::new(win_x, win_y, T::one()), viewport);
        (origin, far - origin)
    }

    fn unproject_inv(&self, win: Vector3<T>, viewport: Viewport) -> Vector3<T> {
        let [vx, vy, vw, vh] = viewport_f::<T>(viewport);
        let ndc = Vector3::new(
            (win.x - vx) / vw * T::two() - T::one(),
            (win.y - vy) / vh * T::two() - T::one(),
            win.z + win.z - T::one(),
        );
        self.transform_project(ndc)
    }

    /// Eye position of a perspective or view-projection matrix: the
    /// intersection of its left, right and top clip planes
    pub fn perspective_origin(&self) -> Vector3<T> {
        let r = |i: usize| self.row(i);
        let left = r(3) + r(0);
        let right = r(3) - r(0);
        let top = r(3) - r(1);
        crate::frustum::intersect_planes(
            Plane::from(left),
            Plane::from(right),
            Plane::from(top),
        )
    }

    /// Vertical field of view in radians: angle between the bottom and top
    /// clip plane normals
    pub fn perspective_fov(&self) -> T {
        let bottom = (self.row(3) + self.row(1)).xyz();
        let top = (self.row(1) - self.row(3)).xyz();
        (bottom.dot(top) / (bottom.length() * top.length())).acos()
    }

    /// Near plane distance of a matrix built by `perspective` with a
    /// `-1..1` depth range
    pub fn perspective_near(&self) -> T {
        self.get(3, 2) / (self.get(2, 3) + self.get(2, 2))
    }

    /// Far plane distance of a matrix built by `perspective` with a
    /// `-1..1` depth range
    pub fn perspective_far(&self) -> T {
        self.get(3, 2) / (self.get(2, 2) - self.get(2, 3))
    }
}

impl<T: Real> Matrix4x3<T> {
    /// Right-handed orthographic projection
    pub fn orthographic(left: T, right: T, bottom: T, top: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        Matrix4::orthographic(left, right, bottom, top, near, far, z_zero_to_one).to_matrix4x3()
    }

    /// Left-handed orthographic projection
    pub fn orthographic_lh(left: T, right: T, bottom: T, top: T, near: T, far: T, z_zero_to_one: bool) -> Self {
        Matrix4::orthographic_lh(left, right, bottom, top, near, far, z_zero_to_one).to_matrix4x3()
    }

    /// Right-handed view matrix
    pub fn look_at(eye: Vector3<T>, center: Vector3<T>, up: Vector3<T>) -> Self {
        Matrix4::look_at(eye, center, up).to_matrix4x3()
    }

    /// Left-handed view matrix
    pub fn look_at_lh(eye: Vector3<T>, center: Vector3<T>, up: Vector3<T>) -> Self {
        Matrix4::look_at_lh(eye, center, up).to_matrix4x3()
    }
}
