//! Batted-ball dispersion by Monte Carlo sampling.
//!
//! Launch speed, angle and height are drawn from normal distributions centred
//! on a base launch. Samples are drawn sequentially from one seeded generator,
//! so a fixed seed reproduces a run exactly; the trajectories themselves are
//! then solved in parallel.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::Serialize;

use crate::constants::PhysicsConstants;
use crate::error::{ensure_finite, PhysicsError, PhysicsResult};
use crate::rounding::{round_to_decimal, DEFAULT_PRECISION};
use crate::trajectory_solver::{LaunchConditions, TrajectoryResult, TrajectorySolver};

// Monte Carlo parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonteCarloParams {
    pub num_simulations: usize,
    pub velocity_std_dev: f64, // m/s
    pub angle_std_dev: f64,    // degrees
    pub height_std_dev: f64,   // m
    /// Fixed seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for MonteCarloParams {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            velocity_std_dev: 1.0,
            angle_std_dev: 2.0,
            height_std_dev: 0.05,
            seed: None,
        }
    }
}

/// Statistics for a single output field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStatistics {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl FieldStatistics {
    /// Population statistics; `None` for an empty slice.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean: round_to_decimal(mean, DEFAULT_PRECISION),
            std_dev: round_to_decimal(variance.sqrt(), DEFAULT_PRECISION),
            min,
            max,
        })
    }
}

// Monte Carlo results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloResults {
    pub ranges: Vec<f64>,
    pub max_heights: Vec<f64>,
    pub impact_velocities: Vec<f64>,
    pub range_stats: FieldStatistics,
    pub max_height_stats: FieldStatistics,
    pub impact_velocity_stats: FieldStatistics,
    pub valid_runs: usize,
    pub failed_runs: usize,
}

fn distribution(name: &str, mean: f64, std_dev: f64) -> PhysicsResult<Normal<f64>> {
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(PhysicsError::InvalidParameters(format!(
            "{name} standard deviation must be finite and non-negative, got {std_dev}"
        )));
    }
    Normal::new(mean, std_dev)
        .map_err(|e| PhysicsError::InvalidParameters(format!("invalid {name} distribution: {e}")))
}

/// Perturb `base` `params.num_simulations` times and solve every sample.
///
/// Samples whose trajectory cannot be solved are counted in `failed_runs` and
/// left out of the statistics; the run only fails if none succeed.
pub fn run_monte_carlo(
    base: &LaunchConditions,
    params: &MonteCarloParams,
    constants: &PhysicsConstants,
) -> PhysicsResult<MonteCarloResults> {
    if params.num_simulations == 0 {
        return Err(PhysicsError::InvalidParameters(
            "number of simulations must be greater than 0".to_string(),
        ));
    }

    ensure_finite("velocity", base.velocity)?;
    ensure_finite("angle", base.angle_degrees)?;
    ensure_finite("initial height", base.initial_height)?;

    let velocity_dist = distribution("velocity", base.velocity, params.velocity_std_dev)?;
    let angle_dist = distribution("angle", base.angle_degrees, params.angle_std_dev)?;
    let height_dist = distribution("height", base.initial_height, params.height_std_dev)?;

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let samples: Vec<LaunchConditions> = (0..params.num_simulations)
        .map(|_| LaunchConditions {
            velocity: velocity_dist.sample(&mut rng).max(0.0),
            angle_degrees: angle_dist.sample(&mut rng),
            initial_height: height_dist.sample(&mut rng).max(0.0),
            air_resistance: base.air_resistance,
        })
        .collect();

    let outcomes: Vec<PhysicsResult<TrajectoryResult>> = samples
        .par_iter()
        .map(|launch| TrajectorySolver::new(*launch, *constants).solve())
        .collect();

    let mut ranges = Vec::with_capacity(outcomes.len());
    let mut max_heights = Vec::with_capacity(outcomes.len());
    let mut impact_velocities = Vec::with_capacity(outcomes.len());
    let mut failed_runs = 0;

    for (launch, outcome) in samples.iter().zip(outcomes) {
        match outcome {
            Ok(result) => {
                ranges.push(result.range);
                max_heights.push(result.max_height);
                impact_velocities.push(result.impact_velocity);
            }
            Err(e) => {
                warn!(
                    "skipping sample v = {:.2} m/s, angle = {:.2}°: {e}",
                    launch.velocity, launch.angle_degrees
                );
                failed_runs += 1;
            }
        }
    }

    let (range_stats, max_height_stats, impact_velocity_stats) = match (
        FieldStatistics::from_samples(&ranges),
        FieldStatistics::from_samples(&max_heights),
        FieldStatistics::from_samples(&impact_velocities),
    ) {
        (Some(r), Some(h), Some(v)) => (r, h, v),
        _ => {
            return Err(PhysicsError::InvalidParameters(
                "no successful simulations".to_string(),
            ))
        }
    };

    debug!(
        "monte carlo: {} valid, {failed_runs} failed, mean range {:.2} m",
        ranges.len(),
        range_stats.mean
    );

    Ok(MonteCarloResults {
        valid_runs: ranges.len(),
        failed_runs,
        ranges,
        max_heights,
        impact_velocities,
        range_stats,
        max_height_stats,
        impact_velocity_stats,
    })
}
