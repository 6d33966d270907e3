//! Physical constants used in baseball calculations

use std::f64::consts::PI;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, PhysicsResult};

/// Gravitational acceleration in m/s²
///
/// Rounded to 9.81 to match the figures used throughout the course material.
pub const GRAVITY_MPS2: f64 = 9.81;

/// Air density at sea level (kg/m³)
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225;

/// Regulation baseball mass (kg), 5.125 oz
pub const BASEBALL_MASS_KG: f64 = 0.145;

/// Baseball radius (m), 2.9 inch diameter
pub const BASEBALL_RADIUS_M: f64 = 0.0366;

/// Baseball circumference (m), 9 inches
pub const BASEBALL_CIRCUMFERENCE_M: f64 = 0.229;

/// Drag coefficient typical for a baseball in the 30-45 m/s regime
pub const BASEBALL_DRAG_COEFFICIENT: f64 = 0.3;

/// Magnus (lift) coefficient typical for a spinning baseball
pub const BASEBALL_MAGNUS_COEFFICIENT: f64 = 0.1;

/// Reference flight time used for Magnus deflection estimates (s)
///
/// Roughly the flight of a fly ball or a slow pitch; the deflection is a
/// constant-acceleration estimate over this window, not an integrated path.
pub const REFERENCE_FLIGHT_TIME_S: f64 = 2.0;

/// Default integration time step (s)
pub const DEFAULT_TIME_STEP_S: f64 = 0.01;

/// Smallest accepted integration time step (s)
pub const MIN_TIME_STEP_S: f64 = 1e-6;

/// Most trajectory points a single solve will record
pub const MAX_RECORDED_POINTS: usize = 1_000_000;

/// Upper bound on simulated flight time before integration gives up (s)
pub const MAX_FLIGHT_TIME_S: f64 = 600.0;

// Numerical stability constants
/// Minimum speed below which drag is treated as zero (m/s)
pub const MIN_VELOCITY_THRESHOLD: f64 = 1e-6;

/// Tolerance for angle searches (degrees)
pub const ANGLE_SEARCH_TOLERANCE_DEG: f64 = 1e-4;

/// Allowed relative mismatch between circumference and 2πr
pub const CIRCUMFERENCE_TOLERANCE: f64 = 0.01;

// Unit conversions
/// Conversion factor: meters per second to miles per hour
pub const MPS_TO_MPH: f64 = 2.236_936;

/// Conversion factor: meters to feet
pub const METERS_TO_FEET: f64 = 3.28084;

/// Immutable table of the parameters every model reads.
///
/// [`PhysicsConstants::BASEBALL`] is the canonical instance. Alternate tables
/// (thin mountain air, a heavier training ball) can be loaded from JSON; any
/// field left out falls back to the baseball value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConstants {
    pub gravity: f64,          // m/s²
    pub air_density: f64,      // kg/m³
    pub ball_mass: f64,        // kg
    pub ball_radius: f64,      // m
    pub ball_circumference: f64, // m
    pub drag_coefficient: f64,
    pub magnus_coefficient: f64,
}

impl PhysicsConstants {
    pub const BASEBALL: PhysicsConstants = PhysicsConstants {
        gravity: GRAVITY_MPS2,
        air_density: AIR_DENSITY_SEA_LEVEL,
        ball_mass: BASEBALL_MASS_KG,
        ball_radius: BASEBALL_RADIUS_M,
        ball_circumference: BASEBALL_CIRCUMFERENCE_M,
        drag_coefficient: BASEBALL_DRAG_COEFFICIENT,
        magnus_coefficient: BASEBALL_MAGNUS_COEFFICIENT,
    };

    /// Cross-sectional area πr² (m²)
    pub fn cross_section_area(&self) -> f64 {
        PI * self.ball_radius * self.ball_radius
    }

    /// Whether the stated circumference agrees with 2πr to within 1 %.
    pub fn circumference_is_consistent(&self) -> bool {
        if self.ball_circumference <= 0.0 {
            return false;
        }
        let expected = 2.0 * PI * self.ball_radius;
        ((self.ball_circumference - expected) / self.ball_circumference).abs() <= CIRCUMFERENCE_TOLERANCE
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        let positive = [
            ("gravity", self.gravity),
            ("air_density", self.air_density),
            ("ball_mass", self.ball_mass),
            ("ball_radius", self.ball_radius),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PhysicsError::InvalidConstants(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("ball_circumference", self.ball_circumference),
            ("drag_coefficient", self.drag_coefficient),
            ("magnus_coefficient", self.magnus_coefficient),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidConstants(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Parse and validate a constants table from JSON.
    pub fn from_json_str(json: &str) -> PhysicsResult<Self> {
        let constants: PhysicsConstants = serde_json::from_str(json)?;
        constants.validate()?;
        if !constants.circumference_is_consistent() {
            warn!(
                "ball circumference {} m disagrees with 2πr = {:.4} m",
                constants.ball_circumference,
                2.0 * PI * constants.ball_radius
            );
        }
        Ok(constants)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PhysicsResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let constants = Self::from_json_str(&contents)?;
        info!("loaded physics constants from {}", path.display());
        Ok(constants)
    }
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self::BASEBALL
    }
}
