use approx::assert_abs_diff_eq;
use proptest::prelude::*;

use psim::camera::{CameraState, PITCH_LIMIT};
use psim::{NVec3, Quat, SimError};

const EPS: f64 = 1e-9;

fn assert_quat_eq(a: Quat, b: Quat, eps: f64) {
    for (x, y) in a.to_array().iter().zip(b.to_array().iter()) {
        assert_abs_diff_eq!(*x, *y, epsilon = eps);
    }
}

fn assert_orthonormal(cam: &CameraState, eps: f64) {
    let b = cam.basis();
    assert_abs_diff_eq!(b.forward.norm(), 1.0, epsilon = eps);
    assert_abs_diff_eq!(b.right.norm(), 1.0, epsilon = eps);
    assert_abs_diff_eq!(b.up.norm(), 1.0, epsilon = eps);
    assert_abs_diff_eq!(b.forward.dot(&b.right), 0.0, epsilon = eps);
    assert_abs_diff_eq!(b.forward.dot(&b.up), 0.0, epsilon = eps);
    assert_abs_diff_eq!(b.right.dot(&b.up), 0.0, epsilon = eps);
}

// ==================================================================================
// Quaternion tests
// ==================================================================================

#[test]
fn hamilton_product_is_not_commutative() {
    let yaw = Quat::from_axis_angle(&NVec3::y(), 90.0).unwrap();
    let pitch = Quat::from_axis_angle(&NVec3::x(), 90.0).unwrap();

    let yp = yaw * pitch;
    let py = pitch * yaw;

    assert_abs_diff_eq!(yp.z, -0.5, epsilon = EPS);
    assert_abs_diff_eq!(py.z, 0.5, epsilon = EPS);
    assert_ne!(yp, py);
}

#[test]
fn hamilton_product_is_associative() {
    let a = Quat::new(0.3, -1.2, 0.5, 2.0);
    let b = Quat::new(1.1, 0.4, -0.7, 0.2);
    let c = Quat::new(-0.6, 0.9, 1.3, -0.1);

    assert_quat_eq((a * b) * c, a * (b * c), 1e-12);
}

#[test]
fn identity_is_neutral() {
    let q = Quat::new(0.5, 0.5, -0.5, 0.5);
    assert_eq!(Quat::identity() * q, q);
    assert_eq!(q * Quat::identity(), q);
    assert_eq!(Quat::default(), Quat::identity());
}

#[test]
fn conjugate_negates_vector_part() {
    let q = Quat::from([1.0, 2.0, 3.0, 4.0]);
    assert_eq!(q.conjugate(), Quat::new(1.0, -2.0, -3.0, -4.0));
}

#[test]
fn inverse_of_non_unit_quaternion() {
    let q = Quat::new(2.0, 1.0, 0.0, 0.0);
    let inv = q.inverse().unwrap();

    assert_quat_eq(inv, Quat::new(0.4, -0.2, 0.0, 0.0), EPS);
    assert_quat_eq(q * inv, Quat::identity(), EPS);
}

#[test]
fn inverse_of_zero_quaternion_is_degenerate() {
    let err = Quat::new(0.0, 0.0, 0.0, 0.0).inverse().unwrap_err();
    assert!(matches!(err, SimError::DegenerateInput { .. }));
}

#[test]
fn normalize_scales_to_unit() {
    let q = Quat::new(0.0, 3.0, 4.0, 0.0).normalize();
    assert_quat_eq(q, Quat::new(0.0, 0.6, 0.8, 0.0), EPS);
    assert!(q.is_unit(EPS));
}

#[test]
fn normalize_tiny_quaternion_falls_back_to_identity() {
    assert_eq!(Quat::new(1e-5, 0.0, 0.0, 0.0).normalize(), Quat::identity());
    assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize(), Quat::identity());
}

#[test]
fn axis_angle_normalizes_the_axis() {
    let q = Quat::from_axis_angle(&NVec3::new(0.0, 0.0, 5.0), 90.0).unwrap();
    assert!(q.is_unit(EPS));

    let v = q.rotate(&NVec3::x());
    assert_abs_diff_eq!(v, NVec3::y(), epsilon = EPS);
}

#[test]
fn axis_angle_rejects_zero_axis() {
    let err = Quat::from_axis_angle(&NVec3::zeros(), 45.0).unwrap_err();
    assert!(matches!(err, SimError::DegenerateInput { .. }));
}

#[test]
fn rotate_about_y_by_90_degrees() {
    let q = Quat::from_axis_angle(&NVec3::y(), 90.0).unwrap();
    assert_abs_diff_eq!(q.rotate(&NVec3::x()), NVec3::new(0.0, 0.0, -1.0), epsilon = EPS);
    assert_abs_diff_eq!(q.rotate(&NVec3::y()), NVec3::y(), epsilon = EPS);
}

#[test]
fn composed_rotation_applies_right_operand_first() {
    let yaw = Quat::from_axis_angle(&NVec3::y(), 90.0).unwrap();
    let pitch = Quat::from_axis_angle(&NVec3::x(), 90.0).unwrap();

    // pitch takes -z to +y, yaw leaves +y alone
    let v = (yaw * pitch).rotate(&NVec3::new(0.0, 0.0, -1.0));
    assert_abs_diff_eq!(v, NVec3::y(), epsilon = EPS);
}

proptest! {
    #[test]
    fn rotation_preserves_length(
        w in -1.0f64..1.0, x in -1.0f64..1.0, y in -1.0f64..1.0, z in -1.0f64..1.0,
        vx in -1e3f64..1e3, vy in -1e3f64..1e3, vz in -1e3f64..1e3,
    ) {
        let raw = Quat::new(w, x, y, z);
        prop_assume!(raw.norm() > 1e-2);

        let q = raw.normalize();
        let v = NVec3::new(vx, vy, vz);
        let r = q.rotate(&v);

        prop_assert!((r.norm() - v.norm()).abs() <= 1e-9 * (1.0 + v.norm()));
    }
}

// ==================================================================================
// Camera tests
// ==================================================================================

#[test]
fn new_camera_has_canonical_basis() {
    let cam = CameraState::new(NVec3::new(1.0, 2.0, 3.0), 10.0);
    let b = cam.basis();

    assert_eq!(cam.orientation(), Quat::identity());
    assert_eq!(b.forward, NVec3::new(0.0, 0.0, -1.0));
    assert_eq!(b.right, NVec3::x());
    assert_eq!(b.up, NVec3::y());
    assert_eq!(cam.position(), NVec3::new(1.0, 2.0, 3.0));
}

#[test]
fn pitch_clamps_exactly_at_limit() {
    let mut cam = CameraState::default();
    cam.rotate(60.0, 0.0);
    cam.rotate(60.0, 0.0);
    assert_eq!(cam.pitch(), PITCH_LIMIT);

    cam.rotate(-500.0, 0.0);
    assert_eq!(cam.pitch(), -PITCH_LIMIT);
}

#[test]
fn yaw_wraps_by_359_in_a_single_step() {
    let mut cam = CameraState::default();
    cam.rotate(0.0, 300.0);
    cam.rotate(0.0, 100.0);
    assert_abs_diff_eq!(cam.yaw(), 41.0, epsilon = EPS);

    // one wrap only: a huge delta is left partially unwrapped
    let mut cam = CameraState::default();
    cam.rotate(0.0, -800.0);
    assert_abs_diff_eq!(cam.yaw(), -441.0, epsilon = EPS);
    assert!(cam.orientation().is_unit(1e-12));
}

#[test]
fn non_finite_deltas_are_ignored() {
    let mut cam = CameraState::default();
    cam.rotate(20.0, 30.0);
    let q = cam.orientation();

    cam.rotate(f64::NAN, f64::INFINITY);
    assert_eq!(cam.pitch(), 20.0);
    assert_eq!(cam.yaw(), 30.0);
    assert_quat_eq(cam.orientation(), q, EPS);

    // the finite half of a mixed delta still applies
    cam.rotate(5.0, f64::NAN);
    assert_eq!(cam.pitch(), 25.0);
    assert_eq!(cam.yaw(), 30.0);
    assert!(cam.orientation().is_unit(1e-12));
}

#[test]
fn yaw_turns_forward_around_world_up() {
    let mut cam = CameraState::default();
    cam.rotate(0.0, 90.0);
    let b = cam.basis();

    assert_abs_diff_eq!(b.forward, NVec3::new(-1.0, 0.0, 0.0), epsilon = EPS);
    assert_abs_diff_eq!(b.right, NVec3::new(0.0, 0.0, -1.0), epsilon = EPS);
    assert_abs_diff_eq!(b.up, NVec3::y(), epsilon = EPS);
}

#[test]
fn positive_pitch_looks_up() {
    let mut cam = CameraState::default();
    cam.rotate(45.0, 0.0);
    let h = 0.5_f64.sqrt();

    assert_abs_diff_eq!(cam.basis().forward, NVec3::new(0.0, h, -h), epsilon = EPS);
}

#[test]
fn orientation_is_rebuilt_from_absolute_angles() {
    let mut a = CameraState::default();
    for _ in 0..1000 {
        a.rotate(0.03, -0.07);
    }

    let mut b = CameraState::default();
    b.rotate(a.pitch(), a.yaw());

    assert_quat_eq(a.orientation(), b.orientation(), 1e-9);
}

#[test]
fn movement_follows_basis_and_keeps_orientation() {
    let mut cam = CameraState::new(NVec3::zeros(), 10.0);
    cam.rotate(0.0, 90.0);
    let q = cam.orientation();

    cam.move_forward(10.0);
    assert_abs_diff_eq!(cam.position(), NVec3::new(-10.0, 0.0, 0.0), epsilon = EPS);

    cam.move_right(2.0);
    cam.move_up(3.0);
    assert_abs_diff_eq!(cam.position(), NVec3::new(-10.0, 3.0, -2.0), epsilon = EPS);

    assert_eq!(cam.orientation(), q);
}

#[test]
fn reset_restores_identity() {
    let mut cam = CameraState::default();
    cam.rotate(30.0, 120.0);
    cam.reset(NVec3::new(0.0, 5.0, 0.0), 42.0);

    assert_eq!(cam.orientation(), Quat::identity());
    assert_eq!(cam.pitch(), 0.0);
    assert_eq!(cam.yaw(), 0.0);
    assert_eq!(cam.speed, 42.0);
    assert_eq!(cam.position(), NVec3::new(0.0, 5.0, 0.0));
}

#[test]
fn basis_is_orthonormal_after_fixed_sequence() {
    let mut cam = CameraState::default();
    let deltas = [(10.0, 20.0), (95.0, -400.0), (-33.3, 181.0), (0.5, 359.5), (-200.0, -1.0)];

    for (dp, dy) in deltas {
        cam.rotate(dp, dy);
        assert_orthonormal(&cam, 1e-9);
    }
}

proptest! {
    #[test]
    fn orientation_stays_unit_and_roll_free(
        deltas in prop::collection::vec((-200.0f64..200.0, -400.0f64..400.0), 1..50)
    ) {
        let mut cam = CameraState::default();

        for (dp, dy) in deltas {
            cam.rotate(dp, dy);

            prop_assert!(cam.orientation().is_unit(1e-5));
            prop_assert!(cam.pitch().abs() <= PITCH_LIMIT);

            let b = cam.basis();
            prop_assert!((b.forward.norm() - 1.0).abs() < 1e-9);
            prop_assert!((b.right.norm() - 1.0).abs() < 1e-9);
            prop_assert!((b.up.norm() - 1.0).abs() < 1e-9);
            prop_assert!(b.forward.dot(&b.right).abs() < 1e-9);
            prop_assert!(b.forward.dot(&b.up).abs() < 1e-9);
            prop_assert!(b.right.dot(&b.up).abs() < 1e-9);

            // right stays horizontal: no roll
            prop_assert!(b.right.y.abs() < 1e-9);
        }
    }
}
