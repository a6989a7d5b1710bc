//! Shared math primitives
//!
//! Vectors are nalgebra `Vector3<f64>`; rotations use the hand-rolled
//! [`Quat`] so that normalization and degenerate-input fallbacks are explicit.

pub mod quat;

pub use quat::Quat;

use nalgebra::{Unit, Vector3};

pub type NVec3 = Vector3<f64>;
pub type UnitVec3 = Unit<NVec3>;

/// Norm below which a quaternion normalizes to identity
pub const QUAT_NORM_EPSILON: f64 = 1.0e-4;

/// Direction used whenever a collision normal has no defined direction
/// (coincident particles, particle at the sphere centre)
pub fn fallback_normal() -> NVec3 {
    NVec3::y()
}

/// Unit direction of `v`, or `None` when `v` has (near) zero length
#[inline]
pub fn direction(v: &NVec3) -> Option<NVec3> {
    v.try_normalize(f64::EPSILON)
}
