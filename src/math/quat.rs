use std::ops::Mul;

use super::{direction, NVec3, UnitVec3, QUAT_NORM_EPSILON};
use crate::error::SimError;

/// Quaternion `w + xi + yj + zk`, `w` being the scalar part.
///
/// Orientations must be unit quaternions; call [`Quat::normalize`] after
/// every composition. Angles taken by constructors are in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quat {
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Pure quaternion `(0, v)`
    pub fn pure(v: &NVec3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    /// Rotation of `angle_deg` degrees about `axis`.
    ///
    /// The axis is normalized first; a zero axis is rejected with
    /// [`SimError::DegenerateInput`].
    pub fn from_axis_angle(axis: &NVec3, angle_deg: f64) -> Result<Self, SimError> {
        let unit = direction(axis).ok_or_else(|| SimError::degenerate("rotation axis"))?;
        Ok(Self::from_unit_axis_angle(&UnitVec3::new_unchecked(unit), angle_deg))
    }

    /// Infallible form of [`Quat::from_axis_angle`] for an axis already known to be unit
    pub fn from_unit_axis_angle(axis: &UnitVec3, angle_deg: f64) -> Self {
        let half = angle_deg.to_radians() * 0.5;
        let (sin_half, cos_half) = half.sin_cos();
        Self::new(
            cos_half,
            sin_half * axis.x,
            sin_half * axis.y,
            sin_half * axis.z,
        )
    }

    /// Hamilton product `self * other`.
    ///
    /// Non-commutative: `a.multiply(&b)` applies `b` first, then `a`,
    /// when used to rotate vectors.
    pub fn multiply(&self, other: &Self) -> Self {
        let (aw, ax, ay, az) = (self.w, self.x, self.y, self.z);
        let (bw, bx, by, bz) = (other.w, other.x, other.y, other.z);

        Self::new(
            aw * bw - ax * bx - ay * by - az * bz,
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
        )
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn norm_squared(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Multiplicative inverse, `conjugate / ‖q‖²`.
    pub fn inverse(&self) -> Result<Self, SimError> {
        let n2 = self.norm_squared();
        if n2 < f64::EPSILON {
            return Err(SimError::degenerate("quaternion inverse of zero norm"));
        }
        let c = self.conjugate();
        Ok(Self::new(c.w / n2, c.x / n2, c.y / n2, c.z / n2))
    }

    /// Unit quaternion in the same direction; identity when the norm is
    /// below [`QUAT_NORM_EPSILON`].
    pub fn normalize(&self) -> Self {
        let n = self.norm();
        if n < QUAT_NORM_EPSILON {
            return Self::identity();
        }
        let inv = 1.0 / n;
        Self::new(self.w * inv, self.x * inv, self.y * inv, self.z * inv)
    }

    pub fn is_unit(&self, tolerance: f64) -> bool {
        (self.norm() - 1.0).abs() <= tolerance
    }

    pub fn vector_part(&self) -> NVec3 {
        NVec3::new(self.x, self.y, self.z)
    }

    /// Rotate `v` by this quaternion: vector part of `q * (0, v) * q̄`.
    ///
    /// Length preserving only when `self` is unit.
    pub fn rotate(&self, v: &NVec3) -> NVec3 {
        self.multiply(&Self::pure(v))
            .multiply(&self.conjugate())
            .vector_part()
    }

    /// Components as `[w, x, y, z]`
    pub fn to_array(self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }
}

impl Mul for Quat {
    type Output = Quat;

    fn mul(self, rhs: Quat) -> Quat {
        self.multiply(&rhs)
    }
}

impl From<[f64; 4]> for Quat {
    /// Components in `[w, x, y, z]` order, taken verbatim
    fn from(value: [f64; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}
