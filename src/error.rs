//! Error type shared by every calculation entry point.
//!
//! Inputs are checked at the boundary: a NaN or infinite argument is rejected
//! with [`PhysicsError::NonFiniteInput`], and any output that is not a finite
//! number is reported as [`PhysicsError::NonFiniteResult`] instead of being
//! passed on to the caller.

use thiserror::Error;

use crate::rounding::{round_to_decimal, DEFAULT_PRECISION};

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("{name} must be a finite number, got {value}")]
    NonFiniteInput { name: &'static str, value: f64 },

    #[error("{name} evaluated to a non-finite value")]
    NonFiniteResult { name: &'static str },

    #[error("coefficient of restitution must lie in [0, 1], got {0}")]
    InvalidRestitution(f64),

    #[error("time step must be finite and at least 1e-6 s, got {0}")]
    InvalidTimeStep(f64),

    #[error("ball still airborne after {max_time} s of simulated flight")]
    FlightTimeExceeded { max_time: f64 },

    #[error("target distance {target} m is out of reach (maximum {max_range:.2} m)")]
    TargetOutOfReach { target: f64, max_range: f64 },

    #[error("invalid physics constants: {0}")]
    InvalidConstants(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("failed to read constants file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse constants: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Rejects NaN and infinite arguments.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> PhysicsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::NonFiniteInput { name, value })
    }
}

/// Rounds a computed quantity to display precision, failing if it is not finite.
pub(crate) fn finite_output(name: &'static str, value: f64) -> PhysicsResult<f64> {
    let rounded = round_to_decimal(value, DEFAULT_PRECISION);
    if rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(PhysicsError::NonFiniteResult { name })
    }
}
