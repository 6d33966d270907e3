use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::constants::{PhysicsConstants, ANGLE_SEARCH_TOLERANCE_DEG};
use crate::error::{ensure_finite, finite_output, PhysicsError, PhysicsResult};
use crate::trajectory_solver::{LaunchConditions, TrajectoryResult, TrajectorySolver};

const MAX_SEARCH_ITERATIONS: usize = 100;
const INV_GOLDEN_RATIO: f64 = 0.618_033_988_749_894_8;

// Search bounds (degrees)
const STEEPEST_DOWN_DEG: f64 = -90.0;
const STEEPEST_UP_DEG: f64 = 90.0;

/// Result of a launch angle search
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleResult {
    pub angle_degrees: f64,
    pub range: f64, // m reached at that angle
    pub iterations_used: usize,
    pub converged: bool,
}

/// One row of a launch angle sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub angle_degrees: f64,
    #[serde(flatten)]
    pub trajectory: TrajectoryResult,
}

/// Bracketed root of a scalar function
#[derive(Debug, Clone, Copy)]
pub(crate) struct Root {
    pub x: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Brent's method: inverse quadratic interpolation with bisection fallback.
pub(crate) fn brent_root_find<F>(
    mut f: F,
    a: f64,
    b: f64,
    tolerance: f64,
    max_iterations: usize,
) -> PhysicsResult<Root>
where
    F: FnMut(f64) -> PhysicsResult<f64>,
{
    let (mut a, mut b) = (a, b);
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    if fa * fb > 0.0 {
        return Err(PhysicsError::InvalidParameters(format!(
            "root not bracketed: f({a}) = {fa}, f({b}) = {fb}"
        )));
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 1..=max_iterations {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        // Keep b as the best estimate
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tolerance_scaled = 2.0 * f64::EPSILON * b.abs() + 0.5 * tolerance;
        let m = 0.5 * (c - b);

        if m.abs() <= tolerance_scaled || fb == 0.0 {
            return Ok(Root {
                x: b,
                iterations: iteration,
                converged: true,
            });
        }

        if e.abs() >= tolerance_scaled && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant step
                (2.0 * m * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * m * q - (tolerance_scaled * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = d;
            }
        } else {
            d = m;
            e = d;
        }

        a = b;
        fa = fb;

        if d.abs() > tolerance_scaled {
            b += d;
        } else {
            b += tolerance_scaled.copysign(m);
        }

        fb = f(b)?;
    }

    Ok(Root {
        x: b,
        iterations: max_iterations,
        converged: false,
    })
}

fn unrounded_range(base: &LaunchConditions, constants: &PhysicsConstants, angle: f64) -> PhysicsResult<f64> {
    let launch = LaunchConditions {
        angle_degrees: angle,
        ..*base
    };
    Ok(TrajectorySolver::new(launch, *constants).solve_summary()?.range)
}

/// Solve the same launch at each of `angles`, in parallel.
///
/// Rows come back in the order of `angles`. The first failing angle aborts the
/// sweep.
pub fn sweep_launch_angles(
    base: &LaunchConditions,
    angles: &[f64],
    constants: &PhysicsConstants,
) -> PhysicsResult<Vec<SweepRow>> {
    angles
        .par_iter()
        .map(|&angle| {
            let launch = LaunchConditions {
                angle_degrees: angle,
                ..*base
            };
            let trajectory = TrajectorySolver::new(launch, *constants).solve()?;
            Ok(SweepRow {
                angle_degrees: angle,
                trajectory,
            })
        })
        .collect()
}

/// Angle in [0°, 90°] giving the longest carry, by golden-section search.
pub fn find_optimal_launch_angle(
    base: &LaunchConditions,
    constants: &PhysicsConstants,
) -> PhysicsResult<AngleResult> {
    let (mut lo, mut hi) = (0.0, STEEPEST_UP_DEG);
    let mut x1 = hi - INV_GOLDEN_RATIO * (hi - lo);
    let mut x2 = lo + INV_GOLDEN_RATIO * (hi - lo);
    let mut f1 = unrounded_range(base, constants, x1)?;
    let mut f2 = unrounded_range(base, constants, x2)?;

    let mut iterations = 0;
    while hi - lo > ANGLE_SEARCH_TOLERANCE_DEG && iterations < MAX_SEARCH_ITERATIONS {
        iterations += 1;
        if f1 < f2 {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + INV_GOLDEN_RATIO * (hi - lo);
            f2 = unrounded_range(base, constants, x2)?;
        } else {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - INV_GOLDEN_RATIO * (hi - lo);
            f1 = unrounded_range(base, constants, x1)?;
        }
    }

    let angle = 0.5 * (lo + hi);
    let range = unrounded_range(base, constants, angle)?;
    debug!("optimal launch angle {angle:.4}° after {iterations} iterations, range {range:.3} m");

    Ok(AngleResult {
        angle_degrees: finite_output("optimal angle", angle)?,
        range: finite_output("range", range)?,
        iterations_used: iterations,
        converged: hi - lo <= ANGLE_SEARCH_TOLERANCE_DEG,
    })
}

/// Lowest launch angle that carries the ball `target_range` metres.
///
/// Searches between straight down and the optimal angle, so the answer is the
/// line-drive solution rather than the lofted one.
pub fn calculate_launch_angle_for_range(
    base: &LaunchConditions,
    target_range: f64,
    constants: &PhysicsConstants,
) -> PhysicsResult<AngleResult> {
    let target_range = ensure_finite("target range", target_range)?;
    if target_range <= 0.0 {
        return Err(PhysicsError::InvalidParameters(format!(
            "target range must be positive, got {target_range}"
        )));
    }

    let optimal = find_optimal_launch_angle(base, constants)?;
    let optimal_angle = optimal.angle_degrees;
    let max_range = unrounded_range(base, constants, optimal_angle)?;
    if target_range > max_range {
        return Err(PhysicsError::TargetOutOfReach {
            target: target_range,
            max_range,
        });
    }

    let root = brent_root_find(
        |angle| Ok(unrounded_range(base, constants, angle)? - target_range),
        STEEPEST_DOWN_DEG,
        optimal_angle,
        ANGLE_SEARCH_TOLERANCE_DEG,
        MAX_SEARCH_ITERATIONS,
    )?;
    debug!(
        "launch angle {:.4}° reaches {target_range} m ({} iterations)",
        root.x, root.iterations
    );

    Ok(AngleResult {
        angle_degrees: finite_output("launch angle", root.x)?,
        range: finite_output("range", unrounded_range(base, constants, root.x)?)?,
        iterations_used: root.iterations,
        converged: root.converged,
    })
}
