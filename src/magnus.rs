//! Magnus (spin) force on a pitched or batted ball.
//!
//! Force magnitude uses the full lift form
//!
//! ```text
//! F = C_M · ρ · π r² · v · ω
//! ```
//!
//! split along the spin axis: 0° is pure backspin (all lift), 90° pure
//! sidespin. Deflections assume the force stays constant over a reference
//! flight time; they are a quick estimate, not a coupled simulation.

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

use crate::constants::{PhysicsConstants, REFERENCE_FLIGHT_TIME_S};
use crate::error::{ensure_finite, finite_output, PhysicsResult};

/// Half-width of the axis windows used to name a pitch (degrees)
const PITCH_AXIS_WINDOW_DEG: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnusResult {
    pub magnus_force: f64,          // N
    pub vertical_force: f64,        // N, positive is lift
    pub horizontal_force: f64,      // N
    pub acceleration: f64,          // m/s², F/m
    pub vertical_deflection: f64,   // m over the flight time
    pub horizontal_deflection: f64, // m over the flight time
}

/// Qualitative pitch family implied by the spin axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PitchType {
    Fastball,
    Slider,
    Curveball,
    Cutter,
    Mixed,
}

impl PitchType {
    pub fn from_spin_axis(axis_degrees: f64) -> Self {
        let axis = axis_degrees.rem_euclid(360.0);
        let near = |center: f64| (axis - center).abs() <= PITCH_AXIS_WINDOW_DEG;

        if near(0.0) || near(360.0) {
            PitchType::Fastball
        } else if near(90.0) {
            PitchType::Slider
        } else if near(180.0) {
            PitchType::Curveball
        } else if near(270.0) {
            PitchType::Cutter
        } else {
            PitchType::Mixed
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PitchType::Fastball => "Fastball (Backspin)",
            PitchType::Slider => "Slider (Sidespin)",
            PitchType::Curveball => "Curveball (Topspin)",
            PitchType::Cutter => "Cutter (Sidespin)",
            PitchType::Mixed => "Mixed Spin",
        }
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// RPM to rad/s
pub fn rpm_to_rad_per_sec(rpm: f64) -> f64 {
    rpm * 2.0 * PI / 60.0
}

/// Speed of the ball's surface relative to its centre, ω·r (m/s)
pub fn spin_surface_speed(spin_rate_rpm: f64, radius: f64) -> PhysicsResult<f64> {
    let spin_rate_rpm = ensure_finite("spin rate", spin_rate_rpm)?;
    let radius = ensure_finite("radius", radius)?;
    finite_output("surface speed", rpm_to_rad_per_sec(spin_rate_rpm) * radius)
}

/// Magnus force and deflection over the 2 s reference flight.
pub fn calculate_magnus_effect(
    velocity: f64,
    spin_rate_rpm: f64,
    spin_axis_degrees: f64,
) -> PhysicsResult<MagnusResult> {
    calculate_magnus_effect_over(
        &PhysicsConstants::BASEBALL,
        velocity,
        spin_rate_rpm,
        spin_axis_degrees,
        REFERENCE_FLIGHT_TIME_S,
    )
}

pub fn calculate_magnus_effect_over(
    constants: &PhysicsConstants,
    velocity: f64,
    spin_rate_rpm: f64,
    spin_axis_degrees: f64,
    flight_time: f64,
) -> PhysicsResult<MagnusResult> {
    let velocity = ensure_finite("velocity", velocity)?;
    let spin_rate_rpm = ensure_finite("spin rate", spin_rate_rpm)?;
    let axis_rad = ensure_finite("spin axis", spin_axis_degrees)?.to_radians();
    let flight_time = ensure_finite("flight time", flight_time)?;

    let omega = rpm_to_rad_per_sec(spin_rate_rpm);
    let magnus_force = constants.magnus_coefficient
        * constants.air_density
        * constants.cross_section_area()
        * velocity
        * omega;

    let vertical_force = magnus_force * axis_rad.cos();
    let horizontal_force = magnus_force * axis_rad.sin();

    // Constant-acceleration displacement ½·(F/m)·T²
    let deflection = |force: f64| 0.5 * (force / constants.ball_mass) * flight_time * flight_time;

    Ok(MagnusResult {
        magnus_force: finite_output("magnus force", magnus_force)?,
        vertical_force: finite_output("vertical force", vertical_force)?,
        horizontal_force: finite_output("horizontal force", horizontal_force)?,
        acceleration: finite_output("magnus acceleration", magnus_force / constants.ball_mass)?,
        vertical_deflection: finite_output("vertical deflection", deflection(vertical_force))?,
        horizontal_deflection: finite_output("horizontal deflection", deflection(horizontal_force))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhysicsError;

    fn expected_force(velocity: f64, rpm: f64) -> f64 {
        let c = PhysicsConstants::BASEBALL;
        c.magnus_coefficient * c.air_density * PI * c.ball_radius * c.ball_radius * velocity * rpm * 2.0 * PI / 60.0
    }

    #[test]
    fn test_pure_backspin_is_all_lift() {
        let result = calculate_magnus_effect(40.0, 2000.0, 0.0).unwrap();
        let force = expected_force(40.0, 2000.0);
        assert!((result.magnus_force - force).abs() < 0.005);
        assert_eq!(result.vertical_force, result.magnus_force);
        assert_eq!(result.horizontal_force, 0.0);
        assert_eq!(result.horizontal_deflection, 0.0);

        let deflection = 0.5 * force / 0.145 * 4.0;
        assert!((result.vertical_deflection - deflection).abs() < 0.005);
    }

    #[test]
    fn test_pure_sidespin_is_all_lateral() {
        let result = calculate_magnus_effect(40.0, 2000.0, 90.0).unwrap();
        assert_eq!(result.horizontal_force, result.magnus_force);
        assert_eq!(result.vertical_force, 0.0);
    }

    #[test]
    fn test_topspin_pushes_down() {
        let result = calculate_magnus_effect(35.0, 2500.0, 180.0).unwrap();
        assert!(result.vertical_force < 0.0);
        assert_eq!(result.vertical_force, -result.magnus_force);
        assert!(result.vertical_deflection < 0.0);
    }

    #[test]
    fn test_no_spin_no_force() {
        let result = calculate_magnus_effect(40.0, 0.0, 45.0).unwrap();
        assert_eq!(result.magnus_force, 0.0);
        assert_eq!(result.vertical_deflection, 0.0);
    }

    #[test]
    fn test_force_is_proportional_to_speed_and_spin() {
        let constants = PhysicsConstants::BASEBALL;
        let base = calculate_magnus_effect_over(&constants, 20.0, 1000.0, 0.0, 1.0).unwrap();
        let double_speed = calculate_magnus_effect_over(&constants, 40.0, 1000.0, 0.0, 1.0).unwrap();
        let double_spin = calculate_magnus_effect_over(&constants, 20.0, 2000.0, 0.0, 1.0).unwrap();
        assert!((double_speed.magnus_force - 2.0 * base.magnus_force).abs() <= 0.02);
        assert!((double_spin.magnus_force - 2.0 * base.magnus_force).abs() <= 0.02);
    }

    #[test]
    fn test_deflection_scales_with_square_of_time() {
        let constants = PhysicsConstants::BASEBALL;
        let one = calculate_magnus_effect_over(&constants, 40.0, 2400.0, 0.0, 0.5).unwrap();
        let two = calculate_magnus_effect_over(&constants, 40.0, 2400.0, 0.0, 1.0).unwrap();
        assert!((two.vertical_deflection - 4.0 * one.vertical_deflection).abs() < 0.03);
    }

    #[test]
    fn test_non_finite_inputs() {
        assert!(matches!(
            calculate_magnus_effect(40.0, f64::NAN, 0.0),
            Err(PhysicsError::NonFiniteInput { name: "spin rate", .. })
        ));
        assert!(calculate_magnus_effect(40.0, 2000.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_pitch_classification() {
        assert_eq!(PitchType::from_spin_axis(0.0), PitchType::Fastball);
        assert_eq!(PitchType::from_spin_axis(-10.0), PitchType::Fastball);
        assert_eq!(PitchType::from_spin_axis(350.0), PitchType::Fastball);
        assert_eq!(PitchType::from_spin_axis(95.0), PitchType::Slider);
        assert_eq!(PitchType::from_spin_axis(180.0), PitchType::Curveball);
        assert_eq!(PitchType::from_spin_axis(270.0), PitchType::Cutter);
        assert_eq!(PitchType::from_spin_axis(45.0), PitchType::Mixed);
        assert_eq!(PitchType::from_spin_axis(540.0), PitchType::Curveball);
        assert_eq!(PitchType::Curveball.to_string(), "Curveball (Topspin)");
    }

    #[test]
    fn test_spin_surface_speed() {
        // 1800 rpm on a 3.7 cm ball
        assert_eq!(spin_surface_speed(1800.0, 0.037).unwrap(), 6.97);
    }

    #[test]
    fn test_rpm_conversion() {
        assert!((rpm_to_rad_per_sec(60.0) - 2.0 * PI).abs() < 1e-12);
    }
}
