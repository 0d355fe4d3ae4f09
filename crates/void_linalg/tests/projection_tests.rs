//! Projection and frustum tests for void_linalg
//!
//! Clip-space mapping of the projection constructors and the frustum
//! planes/corners derived from them.

use approx::assert_relative_eq;
use void_linalg::prelude::*;
use void_linalg::Vector3d;

const LEFT: f64 = -2.0;
const RIGHT: f64 = 3.0;
const BOTTOM: f64 = -1.0;
const TOP: f64 = 4.0;
const NEAR: f64 = 0.5;
const FAR: f64 = 20.0;

#[test]
fn translate_then_scale_is_exact() {
    let m = Matrix4f::IDENTITY
        .translate(Vector3::new(1.0, 2.0, 3.0))
        .scale(Vector3::new(2.0, 2.0, 2.0));
    assert_eq!(m.transform_position(Vector3::new(1.0, 1.0, 1.0)), Vector3::new(3.0, 4.0, 5.0));
}

#[test]
fn orthographic_maps_box_to_ndc_negative_one_to_one() {
    let m = Matrix4d::orthographic(LEFT, RIGHT, BOTTOM, TOP, NEAR, FAR, false);
    assert_relative_eq!(m.transform_position(Vector3::new(LEFT, BOTTOM, -NEAR)), Vector3::new(-1.0, -1.0, -1.0), epsilon = 1e-12);
    assert_relative_eq!(m.transform_position(Vector3::new(RIGHT, TOP, -FAR)), Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-12);
}

#[test]
fn orthographic_maps_box_to_ndc_zero_to_one() {
    let m = Matrix4d::orthographic(LEFT, RIGHT, BOTTOM, TOP, NEAR, FAR, true);
    assert_relative_eq!(m.transform_position(Vector3::new(LEFT, BOTTOM, -NEAR)), Vector3::new(-1.0, -1.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(m.transform_position(Vector3::new(RIGHT, TOP, -FAR)), Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-12);
}

#[test]
fn left_handed_orthographic_looks_down_positive_z() {
    let m = Matrix4d::orthographic_in(ClipSpace::DIRECT3D, LEFT, RIGHT, BOTTOM, TOP, NEAR, FAR);
    assert_relative_eq!(m.transform_position(Vector3::new(LEFT, BOTTOM, NEAR)), Vector3::new(-1.0, -1.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(m.transform_position(Vector3::new(RIGHT, TOP, FAR)), Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-12);
    assert_eq!(m, Matrix4d::orthographic_lh(LEFT, RIGHT, BOTTOM, TOP, NEAR, FAR, true));
}

#[test]
fn perspective_near_and_far_planes() {
    for (clip, near_z) in [(ClipSpace::OPENGL, -1.0), (ClipSpace::VULKAN, 0.0)] {
        let m = Matrix4d::perspective_in(clip, 1.0, 1.5, NEAR, FAR);
        assert_relative_eq!(m.transform_project(Vector3::new(0.0, 0.0, -NEAR)).z, near_z, epsilon = 1e-12);
        assert_relative_eq!(m.transform_project(Vector3::new(0.0, 0.0, -FAR)).z, 1.0, epsilon = 1e-12);
    }

    let d3d = Matrix4d::perspective_in(ClipSpace::DIRECT3D, 1.0, 1.5, NEAR, FAR);
    assert_relative_eq!(d3d.transform_project(Vector3::new(0.0, 0.0, NEAR)).z, 0.0, epsilon = 1e-12);
    assert_relative_eq!(d3d.transform_project(Vector3::new(0.0, 0.0, FAR)).z, 1.0, epsilon = 1e-12);
}

#[test]
fn infinite_far_plane_maps_to_one_at_infinity() {
    let m = Matrix4d::perspective(1.0, 1.0, NEAR, f64::INFINITY, false);
    assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    assert_relative_eq!(m.transform_project(Vector3::new(0.0, 0.0, -NEAR)).z, -1.0, epsilon = 1e-9);
    assert!(m.transform_project(Vector3::new(0.0, 0.0, -1e9)).z < 1.0);
}

#[test]
fn frustum_matches_symmetric_perspective() {
    let fov: f64 = 1.1;
    let aspect = 1.25;
    let h = (fov * 0.5).tan() * NEAR;
    let w = h * aspect;
    let persp = Matrix4d::perspective(fov, aspect, NEAR, FAR, false);
    let frustum = Matrix4d::frustum(-w, w, -h, h, NEAR, FAR, false);
    assert_relative_eq!(persp, frustum, epsilon = 1e-12);
}

#[test]
fn identity_frustum_planes() {
    let m = Matrix4d::IDENTITY;
    for plane in FrustumPlane::ALL {
        let p = m.frustum_plane(plane);
        assert_relative_eq!(p.normal().length(), 1.0, epsilon = 1e-12);
        assert!(p.distance_to_point(Vector3::zero()) > 0.0);
    }
    let outside = [
        Vector3::new(-2.0, 0.0, 0.0),
        Vector3::new(2.0, 0.0, 0.0),
        Vector3::new(0.0, -2.0, 0.0),
        Vector3::new(0.0, 2.0, 0.0),
        Vector3::new(0.0, 0.0, -2.0),
        Vector3::new(0.0, 0.0, 2.0),
    ];
    for (plane, point) in FrustumPlane::ALL.into_iter().zip(outside) {
        assert!(m.frustum_plane(plane).distance_to_point(point) < 0.0, "{plane:?}");
    }
}

#[test]
fn orthographic_frustum_planes_bound_the_box() {
    let m = Matrix4d::orthographic(LEFT, RIGHT, BOTTOM, TOP, NEAR, FAR, false);
    let center = Vector3::new((LEFT + RIGHT) / 2.0, (BOTTOM + TOP) / 2.0, -(NEAR + FAR) / 2.0);

    assert_relative_eq!(m.frustum_plane(FrustumPlane::Nx).distance_to_point(center), (RIGHT - LEFT) / 2.0, epsilon = 1e-12);
    assert_relative_eq!(m.frustum_plane(FrustumPlane::Py).distance_to_point(center), (TOP - BOTTOM) / 2.0, epsilon = 1e-12);
    assert_relative_eq!(m.frustum_plane(FrustumPlane::Nz).distance_to_point(center), (FAR - NEAR) / 2.0, epsilon = 1e-12);
    assert_relative_eq!(m.frustum_corner(FrustumCorner::NxNyNz), Vector3::new(LEFT, BOTTOM, -NEAR), epsilon = 1e-12);
    assert_relative_eq!(m.frustum_corner(FrustumCorner::PxPyPz), Vector3::new(RIGHT, TOP, -FAR), epsilon = 1e-12);
}

#[test]
fn frustum_corners_lie_on_their_planes() {
    let proj = Matrix4d::perspective(0.8, 1.6, NEAR, FAR, true);
    let view = Matrix4d::look_at(Vector3::new(-3.0, 2.0, 6.0), Vector3::new(1.0, 0.0, 0.0), Vector3d::Y);
    let vp = proj * view;
    for corner in FrustumCorner::ALL {
        let p = vp.frustum_corner(corner);
        for plane in corner.planes() {
            assert!(vp.frustum_plane(plane).distance_to_point(p).abs() < 1e-8, "{corner:?}/{plane:?}");
        }
    }
}

#[test]
fn perspective_origin_recovers_the_eye() {
    let eye = Vector3::new(4.0, -1.0, 2.5);
    let vp = Matrix4d::perspective(1.0, 1.0, NEAR, FAR, false)
        * Matrix4d::look_at(eye, Vector3::zero(), Vector3d::Y);
    assert_relative_eq!(vp.perspective_origin(), eye, epsilon = 1e-9);
    assert_relative_eq!(vp.perspective_fov(), 1.0, epsilon = 1e-9);
}

#[test]
fn look_at_moves_eye_to_origin() {
    let eye = Vector3::new(1.0, 2.0, 3.0);
    let center = Vector3::new(1.0, 2.0, -7.0);
    let view = Matrix4d::look_at(eye, center, Vector3d::Y);
    assert_relative_eq!(view.transform_position(eye), Vector3::zero(), epsilon = 1e-12);
    assert_relative_eq!(view.transform_position(center), Vector3::new(0.0, 0.0, -10.0), epsilon = 1e-12);
    assert!(view.properties().contains(Properties::ORTHONORMAL));

    let view_lh = Matrix4d::look_at_lh(eye, center, Vector3d::Y);
    assert_relative_eq!(view_lh.transform_position(center), Vector3::new(0.0, 0.0, 10.0), epsilon = 1e-12);
}

#[test]
fn project_unproject_round_trip() {
    let viewport = [0, 0, 800, 600];
    let vp = Matrix4d::perspective(1.0, 800.0 / 600.0, NEAR, FAR, false)
        * Matrix4d::look_at(Vector3::new(0.0, 2.0, 8.0), Vector3::zero(), Vector3d::Y);
    let world = Vector3::new(0.5, 0.25, -1.0);
    let win = vp.project(world, viewport);
    assert!(win.x > 0.0 && win.x < 800.0 && win.y > 0.0 && win.y < 600.0);
    assert!(win.z > 0.0 && win.z < 1.0);
    assert_relative_eq!(vp.unproject(win, viewport), world, epsilon = 1e-7);

    let (origin, dir) = vp.unproject_ray(win.x, win.y, viewport);
    let t = (world - origin).dot(dir) / dir.length_squared();
    assert_relative_eq!(origin + dir * t, world, epsilon = 1e-7);
}

#[test]
fn culling_with_a_camera_frustum() {
    let vp = Matrix4f::perspective(1.2, 1.0, 0.1, 100.0, false)
        * Matrix4f::look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), Vector3::new(0.0, 1.0, 0.0));
    let frustum = FrustumPlanes::from_matrix(&vp);

    assert!(frustum.contains_point(Vector3::zero()));
    assert!(!frustum.contains_point(Vector3::new(0.0, 0.0, 10.0)));

    let ahead = Sphere::new(Vector3::new(0.0, 0.0, -10.0), 1.0);
    let behind = Sphere::new(Vector3::new(0.0, 0.0, 20.0), 1.0);
    assert_eq!(frustum.contains_sphere(&ahead), FrustumTestResult::Inside);
    assert_eq!(frustum.contains_sphere(&behind), FrustumTestResult::Outside);

    let around_camera = Aabb::new(Vector3::new(-1.0, -1.0, 4.0), Vector3::new(1.0, 1.0, 6.0));
    assert_eq!(frustum.contains_aabb(&around_camera), FrustumTestResult::Intersecting);
}
