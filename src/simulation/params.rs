//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size and end time for headless runs,
//! - the largest frame delta the integrators are handed,
//! - constant gravity and the default collision damping

use crate::math::NVec3;

/// Longest headless run `t_end / h0` may ask for
pub const MAX_STEPS: f64 = 1.0e9;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end (headless)
    pub h0: f64, // fixed step size
    pub max_dt: f64, // frame delta clamp
    pub gravity: NVec3, // constant acceleration
    pub damping: f64, // default collision damping
}

impl Parameters {
    /// Frame delta as handed to the integrators: non-finite or negative
    /// deltas become 0, large ones are capped at `max_dt`
    pub fn clamp_dt(&self, frame_dt: f64) -> f64 {
        if !frame_dt.is_finite() {
            return 0.0;
        }
        frame_dt.clamp(0.0, self.max_dt)
    }

    /// Number of fixed `h0` steps needed to reach `t_end`
    pub fn steps_to_end(&self) -> usize {
        (self.t_end / self.h0).ceil().max(0.0) as usize
    }
}
