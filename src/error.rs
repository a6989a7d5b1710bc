//! Error types for the particle sandbox
//!
//! Only two things can go wrong: a geometric input with no direction
//! (zero axis, zero-norm quaternion) or a physical parameter that makes
//! the body undefined (non-positive mass or radius, damping out of range).

use thiserror::Error;

/// Errors raised by the math and simulation layers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Input has (near) zero length and cannot define a direction or rotation
    #[error("degenerate input: {what}")]
    DegenerateInput {
        /// What was degenerate (e.g. "rotation axis")
        what: &'static str,
    },

    /// Construction parameter outside its valid range
    #[error("invalid parameter `{name}`: {value} ({expected})")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Human readable constraint
        expected: &'static str,
    },
}

impl SimError {
    pub(crate) fn degenerate(what: &'static str) -> Self {
        SimError::DegenerateInput { what }
    }

    pub(crate) fn invalid(name: &'static str, value: f64, expected: &'static str) -> Self {
        SimError::InvalidParameter { name, value, expected }
    }
}

/// Reject values that are not strictly positive and finite
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value, "must be finite and > 0"))
    }
}

/// Reject values that are negative or not finite
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value, "must be finite and >= 0"))
    }
}

/// Reject NaN and infinities
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value, "must be finite"))
    }
}
