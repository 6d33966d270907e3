//! Work and mechanical energy.
//!
//! Work is reported next to the stored energy but never added to the total:
//! it is energy transferred in from outside, not energy the ball holds.

use serde::Serialize;

use crate::constants::PhysicsConstants;
use crate::error::{ensure_finite, finite_output, PhysicsResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyResult {
    pub kinetic_energy: f64,   // J
    pub potential_energy: f64, // J, relative to the ground
    pub work_done: f64,        // J
    pub total_energy: f64,     // J, kinetic + potential
}

pub(crate) fn kinetic_energy(mass: f64, velocity: f64) -> f64 {
    0.5 * mass * velocity * velocity
}

pub(crate) fn potential_energy(constants: &PhysicsConstants, mass: f64, height: f64) -> f64 {
    mass * constants.gravity * height
}

/// ½mv²
pub fn calculate_kinetic_energy(mass: f64, velocity: f64) -> PhysicsResult<f64> {
    let mass = ensure_finite("mass", mass)?;
    let velocity = ensure_finite("velocity", velocity)?;
    finite_output("kinetic energy", kinetic_energy(mass, velocity))
}

/// mgh, negative below the reference height
pub fn calculate_potential_energy(mass: f64, height: f64) -> PhysicsResult<f64> {
    calculate_potential_energy_with(&PhysicsConstants::BASEBALL, mass, height)
}

pub fn calculate_potential_energy_with(
    constants: &PhysicsConstants,
    mass: f64,
    height: f64,
) -> PhysicsResult<f64> {
    let mass = ensure_finite("mass", mass)?;
    let height = ensure_finite("height", height)?;
    finite_output("potential energy", potential_energy(constants, mass, height))
}

/// F·d for a force acting along the displacement
pub fn calculate_work(force: f64, distance: f64) -> PhysicsResult<f64> {
    let force = ensure_finite("force", force)?;
    let distance = ensure_finite("distance", distance)?;
    finite_output("work", force * distance)
}

pub fn calculate_energy(
    mass: f64,
    velocity: f64,
    height: f64,
    force: f64,
    distance: f64,
) -> PhysicsResult<EnergyResult> {
    calculate_energy_with(&PhysicsConstants::BASEBALL, mass, velocity, height, force, distance)
}

pub fn calculate_energy_with(
    constants: &PhysicsConstants,
    mass: f64,
    velocity: f64,
    height: f64,
    force: f64,
    distance: f64,
) -> PhysicsResult<EnergyResult> {
    let mass = ensure_finite("mass", mass)?;
    let velocity = ensure_finite("velocity", velocity)?;
    let height = ensure_finite("height", height)?;
    let force = ensure_finite("force", force)?;
    let distance = ensure_finite("distance", distance)?;

    let kinetic = kinetic_energy(mass, velocity);
    let potential = potential_energy(constants, mass, height);

    Ok(EnergyResult {
        kinetic_energy: finite_output("kinetic energy", kinetic)?,
        potential_energy: finite_output("potential energy", potential)?,
        work_done: finite_output("work", force * distance)?,
        total_energy: finite_output("total energy", kinetic + potential)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhysicsError;

    #[test]
    fn test_kinetic_energy_of_a_pitch() {
        assert_eq!(calculate_kinetic_energy(0.145, 40.0).unwrap(), 116.0);
    }

    #[test]
    fn test_kinetic_energy_scales_with_square_of_speed() {
        let slow = kinetic_energy(0.145, 20.0);
        let fast = kinetic_energy(0.145, 40.0);
        assert!((fast - 4.0 * slow).abs() < 1e-9);
    }

    #[test]
    fn test_potential_energy() {
        assert_eq!(calculate_potential_energy(0.145, 2.0).unwrap(), 2.84);
        assert_eq!(calculate_potential_energy(0.145, -2.0).unwrap(), -2.84);
        assert_eq!(calculate_potential_energy(0.145, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_potential_energy_is_linear_in_height() {
        let constants = PhysicsConstants::BASEBALL;
        let one = potential_energy(&constants, 0.145, 1.0);
        for h in [2.0, 5.0, 10.0] {
            assert!((potential_energy(&constants, 0.145, h) - h * one).abs() < 1e-9);
        }
    }

    #[test]
    fn test_work_sign_follows_inputs() {
        assert_eq!(calculate_work(50.0, 0.5).unwrap(), 25.0);
        assert_eq!(calculate_work(-50.0, 0.5).unwrap(), -25.0);
        assert_eq!(calculate_work(-50.0, -0.5).unwrap(), 25.0);
    }

    #[test]
    fn test_total_excludes_work() {
        let result = calculate_energy(0.145, 40.0, 2.0, 50.0, 0.5).unwrap();
        assert_eq!(result.kinetic_energy, 116.0);
        assert_eq!(result.potential_energy, 2.84);
        assert_eq!(result.work_done, 25.0);
        assert_eq!(result.total_energy, 118.84);
    }

    #[test]
    fn test_non_finite_inputs() {
        assert!(matches!(
            calculate_energy(0.145, f64::NAN, 2.0, 50.0, 0.5),
            Err(PhysicsError::NonFiniteInput { name: "velocity", .. })
        ));
        assert!(calculate_kinetic_energy(f64::INFINITY, 1.0).is_err());
        assert!(calculate_work(1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(matches!(
            calculate_kinetic_energy(1.0, 1e200),
            Err(PhysicsError::NonFiniteResult { name: "kinetic energy" })
        ));
    }
}
