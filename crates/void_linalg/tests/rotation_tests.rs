//! Rotation tests for void_linalg
//!
//! Matrix/quaternion conversion and Euler angle extraction across all
//! three matrix types.

use approx::assert_relative_eq;
use std::f64::consts::{FRAC_PI_2, PI};
use void_linalg::*;

/// `q` and `-q` describe the same rotation
fn assert_same_rotation(a: Quaterniond, b: Quaterniond) {
    assert!(
        a.same_rotation(b, 1e-9),
        "rotations differ: {:?} vs {:?}",
        a,
        b
    );
}

fn sample_rotations() -> Vec<Quaterniond> {
    vec![
        Quaterniond::identity(),
        Quaterniond::from_axis_angle(Vector3::new(1.0, 2.0, 3.0), 0.4),
        // 180 degree turns exercise the x, y and z dominant branches
        Quaterniond::from_rotation_x(PI),
        Quaterniond::from_rotation_y(PI),
        Quaterniond::from_rotation_z(PI),
        Quaterniond::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), PI),
        Quaterniond::from_axis_angle(Vector3::new(0.2, -0.9, 0.4), 2.9),
        Quaterniond::from_rotation_zyx(1.0, -0.5, 2.0),
    ]
}

#[test]
fn matrix_from_quaternion_round_trips() {
    for q in sample_rotations() {
        assert_same_rotation(Matrix3d::from_quat(q).normalized_rotation(), q);
        assert_same_rotation(Matrix4x3d::from_quat(q).normalized_rotation(), q);
        assert_same_rotation(Matrix4d::from_quat(q).normalized_rotation(), q);
    }
}

#[test]
fn scaled_matrix_needs_unnormalized_extraction() {
    let q = Quaterniond::from_axis_angle(Vector3::new(0.0, 1.0, 1.0), 1.3);
    let m = Matrix4d::from_scale_rotation_translation(
        Vector3::new(2.0, 3.0, 0.5),
        q,
        Vector3::new(7.0, 8.0, 9.0),
    );
    assert_same_rotation(m.unnormalized_rotation(), q);
    assert_same_rotation(Quaterniond::from_unnormalized_matrix(&m), q);
}

#[test]
fn quaternion_and_matrix_rotate_vectors_alike() {
    let v = Vector3::new(0.3, -1.2, 2.5);
    for q in sample_rotations() {
        let by_matrix = Matrix3d::from_quat(q).transform(v);
        assert_relative_eq!(q.transform(v), by_matrix, epsilon = 1e-12);
        assert_relative_eq!(q * v, by_matrix, epsilon = 1e-12);
    }
}

#[test]
fn non_unit_quaternion_scales_uniformly() {
    let q = Quaterniond::from_rotation_z(FRAC_PI_2);
    let scaled = Quaterniond::new(q.x * 2.0, q.y * 2.0, q.z * 2.0, q.w * 2.0);
    let m = Matrix3d::from_quat(scaled);
    assert_relative_eq!(m.scale_factors(), Vector3::splat(4.0), epsilon = 1e-12);
    assert_same_rotation(m.unnormalized_rotation(), q);
}

#[test]
fn euler_zyx_round_trips() {
    let angles = [
        (0.1, 0.2, 0.3),
        (-1.2, 0.7, 2.5),
        (3.0, -1.4, -0.9),
        (0.0, 0.0, 0.0),
    ];
    for (z, y, x) in angles {
        let expected = Vector3::new(x, y, z);
        assert_relative_eq!(Matrix3d::from_rotation_zyx(z, y, x).euler_angles_zyx(), expected, epsilon = 1e-12);
        assert_relative_eq!(Matrix4x3d::from_rotation_zyx(z, y, x).euler_angles_zyx(), expected, epsilon = 1e-12);
        assert_relative_eq!(Matrix4d::from_rotation_zyx(z, y, x).euler_angles_zyx(), expected, epsilon = 1e-12);
    }
}

#[test]
fn euler_zyx_matches_composed_rotations() {
    let (z, y, x) = (0.4, -0.3, 1.1);
    let composed = Matrix4d::from_rotation_z(z).rotate_y(y).rotate_x(x);
    assert_relative_eq!(Matrix4d::from_rotation_zyx(z, y, x), composed, epsilon = 1e-12);
    assert_relative_eq!(Matrix4d::IDENTITY.rotate_zyx(z, y, x), composed, epsilon = 1e-12);
}

#[test]
fn axis_angle_extraction() {
    let axis = Vector3::new(1.0, -2.0, 2.0).normalize();
    let m = Matrix4d::from_axis_angle(axis, 1.25);
    let aa = m.rotation_axis_angle();
    assert_relative_eq!(aa.axis(), axis, epsilon = 1e-9);
    assert_relative_eq!(aa.angle, 1.25, epsilon = 1e-9);
}

#[test]
fn rotation_matrices_are_flagged_orthonormal() {
    let m = Matrix4d::from_rotation_x(0.3);
    assert!(m.properties().contains(Properties::AFFINE | Properties::ORTHONORMAL));

    let m = Matrix4x3d::from_quat(Quaterniond::from_rotation_y(1.0));
    assert!(m.properties().contains(Properties::ORTHONORMAL));

    // Scale breaks the orthonormal fast path
    let m = m.scale(Vector3::splat(2.0));
    assert!(!m.properties().contains(Properties::ORTHONORMAL));
}

#[test]
fn slerp_reaches_both_ends() {
    let a = Quaterniond::from_rotation_x(0.2);
    let b = Quaterniond::from_rotation_y(1.4);
    assert_same_rotation(a.slerp(b, 0.0), a);
    assert_same_rotation(a.slerp(b, 1.0), b);

    let half = Quaterniond::identity().slerp(Quaterniond::from_rotation_z(1.0), 0.5);
    assert_relative_eq!(half.angle(), 0.5, epsilon = 1e-12);
}
