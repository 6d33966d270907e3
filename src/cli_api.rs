// CLI API module - unit handling for the command-line tool
use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::constants::{METERS_TO_FEET, MPS_TO_MPH};
use crate::rounding::{round_to_decimal, DEFAULT_PRECISION};
use crate::trajectory_solver::TrajectoryResult;

// Unit system for input/output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial, // mph and feet
}

impl UnitSystem {
    /// User-facing speed to m/s
    pub fn velocity_to_metric(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => value / MPS_TO_MPH,
        }
    }

    /// m/s to user-facing speed
    pub fn velocity_from_metric(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => value * MPS_TO_MPH,
        }
    }

    pub fn distance_to_metric(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => value / METERS_TO_FEET,
        }
    }

    pub fn distance_from_metric(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => value * METERS_TO_FEET,
        }
    }

    pub fn velocity_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }

    pub fn distance_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }

    /// Summary figures of `result` in this unit system, re-rounded.
    ///
    /// Recorded points are dropped; they stay in SI for sampling.
    pub fn convert_trajectory(self, result: &TrajectoryResult) -> TrajectoryResult {
        let round = |value: f64| round_to_decimal(value, DEFAULT_PRECISION);
        TrajectoryResult {
            time_of_flight: result.time_of_flight,
            max_height: round(self.distance_from_metric(result.max_height)),
            range: round(self.distance_from_metric(result.range)),
            impact_velocity: round(self.velocity_from_metric(result.impact_velocity)),
            points: Vec::new(),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}
