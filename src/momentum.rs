//! Momentum and one-dimensional bat/ball collisions.
//!
//! Collisions use the restitution model
//!
//! ```text
//! v1' = ((m1 − e·m2)·v1 + (1 + e)·m2·v2) / (m1 + m2)
//! v2' = ((m2 − e·m1)·v2 + (1 + e)·m1·v1) / (m1 + m2)
//! ```
//!
//! which conserves momentum for every `e` in [0, 1]. `e = 1` is the perfectly
//! elastic exchange, `e = 0` leaves both bodies moving together.

use serde::Serialize;

use crate::energy::kinetic_energy;
use crate::error::{ensure_finite, finite_output, PhysicsError, PhysicsResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MomentumResult {
    pub momentum1: f64,       // kg·m/s
    pub momentum2: f64,       // kg·m/s
    pub total_momentum: f64,  // before the collision
    pub final_velocity1: f64, // m/s
    pub final_velocity2: f64, // m/s
    pub energy_loss: f64,     // J, zero for an elastic collision
}

/// Post-collision velocities, unrounded.
pub(crate) fn collision_velocities(m1: f64, v1: f64, m2: f64, v2: f64, restitution: f64) -> (f64, f64) {
    let total_mass = m1 + m2;
    let v1_final = ((m1 - restitution * m2) * v1 + (1.0 + restitution) * m2 * v2) / total_mass;
    let v2_final = ((m2 - restitution * m1) * v2 + (1.0 + restitution) * m1 * v1) / total_mass;
    (v1_final, v2_final)
}

/// p = mv
pub fn calculate_momentum(mass: f64, velocity: f64) -> PhysicsResult<f64> {
    let mass = ensure_finite("mass", mass)?;
    let velocity = ensure_finite("velocity", velocity)?;
    finite_output("momentum", mass * velocity)
}

/// Head-on collision of two bodies with coefficient of restitution `restitution`.
pub fn calculate_collision(
    mass1: f64,
    velocity1: f64,
    mass2: f64,
    velocity2: f64,
    restitution: f64,
) -> PhysicsResult<MomentumResult> {
    let m1 = ensure_finite("mass1", mass1)?;
    let v1 = ensure_finite("velocity1", velocity1)?;
    let m2 = ensure_finite("mass2", mass2)?;
    let v2 = ensure_finite("velocity2", velocity2)?;
    if !(0.0..=1.0).contains(&restitution) {
        return Err(PhysicsError::InvalidRestitution(restitution));
    }

    let p1 = m1 * v1;
    let p2 = m2 * v2;
    let (v1_final, v2_final) = collision_velocities(m1, v1, m2, v2, restitution);

    let energy_before = kinetic_energy(m1, v1) + kinetic_energy(m2, v2);
    let energy_after = kinetic_energy(m1, v1_final) + kinetic_energy(m2, v2_final);

    Ok(MomentumResult {
        momentum1: finite_output("momentum1", p1)?,
        momentum2: finite_output("momentum2", p2)?,
        total_momentum: finite_output("total momentum", p1 + p2)?,
        final_velocity1: finite_output("final velocity1", v1_final)?,
        final_velocity2: finite_output("final velocity2", v2_final)?,
        energy_loss: finite_output("energy loss", energy_before - energy_after)?,
    })
}

/// Perfectly elastic collision (`e = 1`)
pub fn calculate_elastic_collision(
    mass1: f64,
    velocity1: f64,
    mass2: f64,
    velocity2: f64,
) -> PhysicsResult<MomentumResult> {
    calculate_collision(mass1, velocity1, mass2, velocity2, 1.0)
}

/// Average force m·Δv/Δt over a contact of `contact_time` seconds.
pub fn calculate_impulse_force(
    mass: f64,
    initial_velocity: f64,
    final_velocity: f64,
    contact_time: f64,
) -> PhysicsResult<f64> {
    let mass = ensure_finite("mass", mass)?;
    let initial_velocity = ensure_finite("initial velocity", initial_velocity)?;
    let final_velocity = ensure_finite("final velocity", final_velocity)?;
    let contact_time = ensure_finite("contact time", contact_time)?;
    finite_output(
        "average force",
        mass * (final_velocity - initial_velocity) / contact_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALL: f64 = 0.145;
    const BAT: f64 = 0.9;

    #[test]
    fn test_momentum_of_a_throw() {
        assert_eq!(calculate_momentum(0.145, 30.0).unwrap(), 4.35);
        assert_eq!(calculate_momentum(0.145, -30.0).unwrap(), -4.35);
    }

    #[test]
    fn test_elastic_bat_ball_collision_conserves_momentum() {
        let result = calculate_collision(BALL, 40.0, BAT, -25.0, 1.0).unwrap();
        let before = BALL * 40.0 + BAT * -25.0;
        let after = BALL * result.final_velocity1 + BAT * result.final_velocity2;
        assert!((before - after).abs() < 0.1);
        assert_eq!(result.total_momentum, -16.70);
    }

    #[test]
    fn test_momentum_conserved_for_any_restitution() {
        for e in [0.0, 0.25, 0.5, 0.75, 1.0] {
            for (v1, v2) in [(40.0, -25.0), (-38.0, 30.0), (0.0, 35.0), (12.0, 12.0)] {
                let (v1f, v2f) = collision_velocities(BALL, v1, BAT, v2, e);
                let before = BALL * v1 + BAT * v2;
                let after = BALL * v1f + BAT * v2f;
                assert!((before - after).abs() < 1e-9, "e = {e}, v1 = {v1}, v2 = {v2}");
            }
        }
    }

    #[test]
    fn test_elastic_collision_conserves_kinetic_energy() {
        let (v1f, v2f) = collision_velocities(BALL, 40.0, BAT, -25.0, 1.0);
        let before = kinetic_energy(BALL, 40.0) + kinetic_energy(BAT, -25.0);
        let after = kinetic_energy(BALL, v1f) + kinetic_energy(BAT, v2f);
        assert!((before - after).abs() < 1e-9);

        let result = calculate_elastic_collision(BALL, 40.0, BAT, -25.0).unwrap();
        assert!(result.energy_loss.abs() <= 0.01);
    }

    #[test]
    fn test_elastic_matches_exchange_formula() {
        let (v1f, v2f) = collision_velocities(BALL, 40.0, BAT, -25.0, 1.0);
        let total = BALL + BAT;
        let v1_expected = ((BALL - BAT) * 40.0 + 2.0 * BAT * -25.0) / total;
        let v2_expected = ((BAT - BALL) * -25.0 + 2.0 * BALL * 40.0) / total;
        assert!((v1f - v1_expected).abs() < 1e-9);
        assert!((v2f - v2_expected).abs() < 1e-9);
    }

    #[test]
    fn test_perfectly_inelastic_bodies_move_together() {
        let result = calculate_collision(BALL, 40.0, BAT, -25.0, 0.0).unwrap();
        assert_eq!(result.final_velocity1, result.final_velocity2);
        assert!(result.energy_loss > 0.0);
    }

    #[test]
    fn test_partial_restitution_loses_energy() {
        let elastic = calculate_collision(BALL, 40.0, BAT, -25.0, 1.0).unwrap();
        let lively = calculate_collision(BALL, 40.0, BAT, -25.0, 0.5).unwrap();
        let dead = calculate_collision(BALL, 40.0, BAT, -25.0, 0.2).unwrap();
        assert!(elastic.energy_loss < lively.energy_loss);
        assert!(lively.energy_loss < dead.energy_loss);
    }

    #[test]
    fn test_invalid_restitution() {
        for e in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                calculate_collision(BALL, 40.0, BAT, -25.0, e),
                Err(PhysicsError::InvalidRestitution(_))
            ));
        }
    }

    #[test]
    fn test_zero_total_mass_is_rejected() {
        assert!(matches!(
            calculate_collision(0.0, 40.0, 0.0, -25.0, 0.5),
            Err(PhysicsError::NonFiniteResult { .. })
        ));
    }

    #[test]
    fn test_impulse_force_of_a_pitch() {
        // 0 to 38 m/s over 0.15 s
        let force = calculate_impulse_force(0.145, 0.0, 38.0, 0.15).unwrap();
        assert_eq!(force, 36.73);
        assert!(calculate_impulse_force(0.145, 0.0, 38.0, 0.0).is_err());
    }
}
