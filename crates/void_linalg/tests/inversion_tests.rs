//! Inversion tests for void_linalg
//!
//! Every inverse path (generic, affine, unit-scale, ortho, translation,
//! identity) must agree with the others on the matrices it is valid for.

use approx::assert_relative_eq;
use void_linalg::*;

fn sample_matrix4() -> Matrix4d {
    Matrix4d::from_cols_array([
        2.0, 0.5, -1.0, 0.25, //
        1.0, 3.0, 0.0, -0.5, //
        0.0, -2.0, 4.0, 1.0, //
        1.5, 0.0, 2.0, 3.0,
    ])
}

fn sample_affine() -> Matrix4x3d {
    Matrix4x3d::from_translation(Vector3::new(1.0, -2.0, 3.0))
        .rotate(Quaterniond::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), 0.7))
        .scale(Vector3::new(2.0, 0.5, 1.5))
}

#[test]
fn matrix4_times_inverse_is_identity() {
    let m = sample_matrix4();
    assert_relative_eq!(m * m.invert(), Matrix4d::IDENTITY, epsilon = 1e-9);
    assert_relative_eq!(m.invert() * m, Matrix4d::IDENTITY, epsilon = 1e-9);
}

#[test]
fn matrix4f_times_inverse_is_identity() {
    let m = Matrix4f::from_cols_array([
        3.0, 0.0, 1.0, 0.0, //
        0.0, 2.0, 0.0, 0.0, //
        1.0, 0.0, 2.0, 0.0, //
        0.5, -1.0, 2.0, 1.0,
    ]);
    assert_relative_eq!(m * m.invert(), Matrix4f::IDENTITY, epsilon = 1e-5);
}

#[test]
fn matrix3_times_inverse_is_identity() {
    let m = Matrix3d::from_cols_array([2.0, 1.0, 0.0, -1.0, 3.0, 2.0, 0.5, 0.0, 1.0]);
    assert_relative_eq!(m * m.invert(), Matrix3d::IDENTITY, epsilon = 1e-9);
    assert_relative_eq!(m.normal(), m.invert().transpose(), epsilon = 1e-12);
}

#[test]
fn matrix4x3_times_inverse_is_identity() {
    let m = sample_affine();
    assert_relative_eq!(m * m.invert(), Matrix4x3d::IDENTITY, epsilon = 1e-9);
}

#[test]
fn affine_inverse_agrees_with_general_inverse() {
    let affine = sample_affine();
    let full = Matrix4d::from(affine);
    assert!(full.properties().contains(Properties::AFFINE));

    let via_affine = Matrix4d::from(affine.invert());
    let via_generic = full.invert_generic();
    assert_relative_eq!(via_affine, via_generic, epsilon = 1e-9);
    assert_relative_eq!(full.invert_affine(), via_generic, epsilon = 1e-9);
}

#[test]
fn rigid_inverse_agrees_with_general_inverse() {
    let rigid = Matrix4d::from_rotation_translation(
        Quaterniond::from_rotation_zyx(0.3, -1.1, 0.8),
        Vector3::new(4.0, 5.0, -6.0),
    );
    assert!(rigid.properties().contains(Properties::ORTHONORMAL));
    assert_relative_eq!(rigid.invert(), rigid.invert_generic(), epsilon = 1e-12);
    assert_relative_eq!(rigid.invert_look_at(), rigid.invert_generic(), epsilon = 1e-12);
}

#[test]
fn scaled_quaternion_rotation_inverts() {
    let q = Quaterniond::from_rotation_z(0.5);
    let doubled = Quaterniond::new(q.x * 2.0, q.y * 2.0, q.z * 2.0, q.w * 2.0);

    let m = Matrix4d::from_quat(doubled);
    assert!(!m.properties().contains(Properties::ORTHONORMAL));
    assert_relative_eq!(m * m.invert(), Matrix4d::IDENTITY, epsilon = 1e-12);

    let m = Matrix4x3d::from_quat(doubled);
    assert!(!m.properties().contains(Properties::ORTHONORMAL));
    assert_relative_eq!(m * m.invert(), Matrix4x3d::IDENTITY, epsilon = 1e-12);

    let m = Matrix4d::from_translation(Vector3::new(1.0, 2.0, 3.0)).rotate(doubled);
    assert_relative_eq!(m.invert(), m.invert_generic(), epsilon = 1e-12);
}

#[test]
fn orthographic_inverse_agrees_with_general_inverse() {
    for z_zero_to_one in [false, true] {
        let m = Matrix4d::orthographic(-2.0, 3.0, -1.0, 4.0, 0.5, 20.0, z_zero_to_one);
        assert_relative_eq!(m.invert_ortho(), m.invert_generic(), epsilon = 1e-12);

        let m = Matrix4x3d::orthographic(-2.0, 3.0, -1.0, 4.0, 0.5, 20.0, z_zero_to_one);
        assert_relative_eq!(
            Matrix4d::from(m.invert_ortho()),
            Matrix4d::from(m).invert_generic(),
            epsilon = 1e-12
        );
    }

    let symmetric = Matrix4d::orthographic_symmetric(8.0, 6.0, 0.1, 100.0, true);
    assert_relative_eq!(symmetric.invert_ortho(), symmetric.invert_generic(), epsilon = 1e-12);
}

#[test]
fn ortho_inverse_ignores_off_diagonal_terms() {
    let m = Matrix4d::from(sample_affine());
    let a = m.invert_ortho();
    let b = m.invert_ortho();
    assert_eq!(a.to_cols_array(), b.to_cols_array());

    let honest = m.invert_generic();
    assert!(a
        .to_cols_array()
        .iter()
        .zip(honest.to_cols_array().iter())
        .any(|(x, y)| (x - y).abs() > 1e-6));

    // Only the diagonal and the translation column are read
    let [m00, _, _, _, _, m11, _, _, _, _, m22, _, m30, m31, m32, _] = m.to_cols_array();
    let diagonal = Matrix4d::from_cols_array([
        m00, 0.0, 0.0, 0.0, //
        0.0, m11, 0.0, 0.0, //
        0.0, 0.0, m22, 0.0, //
        m30, m31, m32, 1.0,
    ]);
    assert_eq!(a, diagonal.invert_ortho());
    assert_relative_eq!(a, diagonal.invert_generic(), epsilon = 1e-12);
}

#[test]
fn translation_and_identity_shortcuts() {
    let t = Matrix4d::from_translation(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(t.invert(), Matrix4d::from_translation(Vector3::new(-1.0, -2.0, -3.0)));
    assert_eq!(Matrix4d::IDENTITY.invert(), Matrix4d::IDENTITY);
    assert_eq!(Matrix4x3d::IDENTITY.invert(), Matrix4x3d::IDENTITY);
}

#[test]
fn perspective_inverse_agrees_with_general_inverse() {
    let p = Matrix4d::perspective(1.2, 16.0 / 9.0, 0.1, 100.0, false);
    assert!(p.properties().contains(Properties::PERSPECTIVE));
    assert_relative_eq!(p.invert(), p.invert_generic(), epsilon = 1e-9, max_relative = 1e-9);

    let f = Matrix4d::frustum(-1.0, 2.0, -0.5, 1.5, 0.5, 20.0, false);
    assert_relative_eq!(f.invert_frustum(), f.invert_generic(), epsilon = 1e-9, max_relative = 1e-9);
}

#[test]
fn perspective_view_inverse_agrees_with_general_inverse() {
    let proj = Matrix4d::perspective(0.9, 1.5, 0.5, 50.0, false);
    let view = Matrix4d::look_at(Vector3::new(3.0, 4.0, 5.0), Vector3::zero(), Vector3d::Y);
    let combined = proj * view;
    assert_relative_eq!(
        proj.invert_perspective_view(&view),
        combined.invert_generic(),
        epsilon = 1e-9,
        max_relative = 1e-9
    );
}

#[test]
fn singular_inverse_is_non_finite_without_panicking() {
    let all_finite = |a: &[f64]| a.iter().all(|v| v.is_finite());

    assert!(!all_finite(&Matrix4d::zero().invert().to_cols_array()));
    assert!(!all_finite(&Matrix3d::zero().invert().to_cols_array()));

    let flat = Matrix4x3d::from_scale(Vector3::new(1.0, 0.0, 1.0));
    assert!(!all_finite(&flat.invert().to_cols_array()));
}

#[test]
fn wrong_specialization_is_deterministic() {
    // A projective matrix that claims to be affine
    let lie = sample_matrix4().assume_affine();
    let a = lie.invert();
    let b = lie.invert();
    assert_eq!(a.to_cols_array(), b.to_cols_array());

    let honest = sample_matrix4().invert();
    assert!(a
        .to_cols_array()
        .iter()
        .zip(honest.to_cols_array().iter())
        .any(|(x, y)| (x - y).abs() > 1e-6));
}

#[test]
fn mutation_drops_fast_paths() {
    let mut m = Matrix4d::from_translation(Vector3::new(1.0, 2.0, 3.0));
    m.set_element(0, 0, 2.0);
    assert!(m.properties().is_empty());
    assert_relative_eq!(m * m.invert(), Matrix4d::IDENTITY, epsilon = 1e-12);

    let m = m.determine_properties();
    assert!(m.properties().contains(Properties::AFFINE));
    assert!(!m.properties().contains(Properties::TRANSLATION));
}
