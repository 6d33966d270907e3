//! # Baseball Physics
//!
//! Calculation engine behind the Physics of Baseball course: projectile motion
//! with and without air resistance, energy and work, momentum and bat/ball
//! collisions, and the Magnus force on a spinning ball.
//!
//! Every entry point validates its inputs, returns a [`PhysicsResult`], and
//! rounds reported figures to two decimal places. Functions suffixed `_with`
//! take an explicit [`PhysicsConstants`] table; the others use
//! [`PhysicsConstants::BASEBALL`].

// Re-export the main types and functions
pub use angle_calculations::{
    calculate_launch_angle_for_range, find_optimal_launch_angle, sweep_launch_angles, AngleResult,
    SweepRow,
};
pub use cli_api::UnitSystem;
pub use constants::PhysicsConstants;
pub use energy::{
    calculate_energy, calculate_energy_with, calculate_kinetic_energy, calculate_potential_energy,
    calculate_potential_energy_with, calculate_work, EnergyResult,
};
pub use error::{PhysicsError, PhysicsResult};
pub use magnus::{
    calculate_magnus_effect, calculate_magnus_effect_over, spin_surface_speed, MagnusResult,
    PitchType,
};
pub use momentum::{
    calculate_collision, calculate_elastic_collision, calculate_impulse_force, calculate_momentum,
    MomentumResult,
};
pub use monte_carlo::{run_monte_carlo, FieldStatistics, MonteCarloParams, MonteCarloResults};
pub use rounding::{round_to_decimal, DEFAULT_PRECISION};
pub use trajectory_sampling::{
    fence_clearance, height_at_distance, position_at_fraction, sample_at_fraction,
    sample_trajectory, TrajectoryFlag, TrajectorySample,
};
pub use trajectory_solver::{
    calculate_projectile_motion, calculate_projectile_motion_with, IntegrationMethod,
    LaunchConditions, TrajectoryPoint, TrajectoryResult, TrajectorySolver,
};

// Module declarations
pub mod angle_calculations;
pub mod cli_api;
pub mod constants;
pub mod energy;
mod error;
pub mod logging;
pub mod magnus;
pub mod momentum;
pub mod monte_carlo;
mod rounding;
pub mod trajectory_sampling;
pub mod trajectory_solver;

#[cfg(feature = "wasm")]
pub mod wasm;
