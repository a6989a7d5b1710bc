//! Free-look camera driven by a unit quaternion
//!
//! Mouse deltas accumulate into pitch/yaw (degrees). Each call rebuilds the
//! orientation from those absolute angles, `yaw * pitch`, so roll can never
//! creep in from repeated small compositions. The quaternion is the source
//! of truth for direction; pitch/yaw only exist to clamp and wrap.
//!
//! The camera never builds a view or projection matrix; the host reads
//! [`CameraState::position`] and [`CameraState::basis`] and does that itself.

use crate::math::{NVec3, Quat};

/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]` to stay off the poles
pub const PITCH_LIMIT: f64 = 89.0;

/// Yaw wraps back by this amount once it crosses `±YAW_WRAP`.
/// Single step, not a modulo.
pub const YAW_WRAP: f64 = 359.0;

/// Rotated camera axes, always orthonormal
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Basis {
    pub forward: NVec3,
    pub right: NVec3,
    pub up: NVec3,
}

impl Basis {
    pub fn canonical() -> Self {
        Self {
            forward: NVec3::new(0.0, 0.0, -1.0),
            right: NVec3::x(),
            up: NVec3::y(),
        }
    }

    fn rotated_by(q: &Quat) -> Self {
        let c = Self::canonical();
        Self {
            forward: q.rotate(&c.forward),
            right: q.rotate(&c.right),
            up: q.rotate(&c.up),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraState {
    position: NVec3,
    orientation: Quat,
    basis: Basis,
    pitch: f64, // degrees, clamp tracking only
    yaw: f64,   // degrees, wrap tracking only
    pub speed: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(NVec3::zeros(), 10.0)
    }
}

impl CameraState {
    pub fn new(position: NVec3, speed: f64) -> Self {
        Self {
            position,
            orientation: Quat::identity(),
            basis: Basis::canonical(),
            pitch: 0.0,
            yaw: 0.0,
            speed,
        }
    }

    /// Back to identity orientation at `position`
    pub fn reset(&mut self, position: NVec3, speed: f64) {
        *self = Self::new(position, speed);
    }

    /// Accumulate pitch/yaw deltas (degrees) and rebuild the orientation
    pub fn rotate(&mut self, delta_pitch: f64, delta_yaw: f64) {
        // a NaN would stick in the accumulators for good
        let delta_pitch = if delta_pitch.is_finite() { delta_pitch } else { 0.0 };
        let delta_yaw = if delta_yaw.is_finite() { delta_yaw } else { 0.0 };

        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.yaw += delta_yaw;
        if self.yaw > YAW_WRAP {
            self.yaw -= YAW_WRAP;
        }
        if self.yaw < -YAW_WRAP {
            self.yaw += YAW_WRAP;
        }

        let pitch_q = Quat::from_unit_axis_angle(&NVec3::x_axis(), self.pitch);
        let yaw_q = Quat::from_unit_axis_angle(&NVec3::y_axis(), self.yaw);

        // yaw in world space, pitch in camera space
        self.orientation = (yaw_q * pitch_q).normalize();
        self.basis = Basis::rotated_by(&self.orientation);
    }

    pub fn move_forward(&mut self, amount: f64) {
        self.position += self.basis.forward * amount;
    }

    pub fn move_right(&mut self, amount: f64) {
        self.position += self.basis.right * amount;
    }

    pub fn move_up(&mut self, amount: f64) {
        self.position += self.basis.up * amount;
    }

    pub fn set_position(&mut self, position: NVec3) {
        self.position = position;
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }
}
