use nalgebra::Vector2;
use serde::Serialize;

use crate::error::{ensure_finite, PhysicsError, PhysicsResult};
use crate::trajectory_solver::{TrajectoryPoint, TrajectoryResult};

/// Trajectory flags for notable events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryFlag {
    Launch,
    Apex,
    Landing,
}

/// Single trajectory sample point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub distance_m: f64,
    pub height_m: f64,
    pub speed_mps: f64,
    pub flags: Vec<TrajectoryFlag>,
}

/// Recorded states split into per-field columns for interpolation
struct Columns {
    times: Vec<f64>,
    x_vals: Vec<f64>,
    y_vals: Vec<f64>,
    speeds: Vec<f64>,
}

impl Columns {
    fn new(points: &[TrajectoryPoint]) -> Self {
        Self {
            times: points.iter().map(|p| p.time).collect(),
            x_vals: points.iter().map(|p| p.position.x).collect(),
            y_vals: points.iter().map(|p| p.position.y).collect(),
            speeds: points.iter().map(TrajectoryPoint::speed).collect(),
        }
    }

    fn sample_at_time(&self, time: f64) -> TrajectorySample {
        TrajectorySample {
            time_s: time,
            distance_m: interpolate(&self.times, &self.x_vals, time),
            height_m: interpolate(&self.times, &self.y_vals, time),
            speed_mps: interpolate(&self.times, &self.speeds, time),
            flags: Vec::new(),
        }
    }
}

fn recorded_points(result: &TrajectoryResult) -> PhysicsResult<&[TrajectoryPoint]> {
    if result.points.is_empty() {
        return Err(PhysicsError::InvalidParameters(
            "trajectory has no recorded points; enable point recording on the solver".to_string(),
        ));
    }
    Ok(&result.points)
}

/// Ball state at `fraction` of the flight time (clamped to [0, 1]).
///
/// Drawing code uses this instead of re-deriving the equations of motion.
pub fn sample_at_fraction(result: &TrajectoryResult, fraction: f64) -> PhysicsResult<TrajectorySample> {
    let points = recorded_points(result)?;
    let fraction = ensure_finite("fraction", fraction)?.clamp(0.0, 1.0);

    let first = points[0].time;
    let last = points[points.len() - 1].time;
    Ok(Columns::new(points).sample_at_time(first + fraction * (last - first)))
}

/// `count` equal time intervals from launch to landing, `count + 1` samples.
pub fn sample_trajectory(result: &TrajectoryResult, count: usize) -> PhysicsResult<Vec<TrajectorySample>> {
    let points = recorded_points(result)?;
    if count == 0 {
        return Err(PhysicsError::InvalidParameters("sample count must be at least 1".to_string()));
    }

    let first = points[0].time;
    let last = points[points.len() - 1].time;
    let columns = Columns::new(points);
    let mut samples: Vec<TrajectorySample> = (0..=count)
        .map(|i| columns.sample_at_time(first + (last - first) * i as f64 / count as f64))
        .collect();

    add_trajectory_flags(&mut samples, points);
    Ok(samples)
}

/// Height of the ball as it passes `distance` metres downrange.
///
/// Returns `None` when the ball never gets that far.
pub fn height_at_distance(result: &TrajectoryResult, distance: f64) -> PhysicsResult<Option<f64>> {
    let points = recorded_points(result)?;
    let distance = ensure_finite("distance", distance)?;

    let x_vals: Vec<f64> = points.iter().map(|p| p.position.x).collect();
    let y_vals: Vec<f64> = points.iter().map(|p| p.position.y).collect();

    let reached = x_vals.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    if distance < x_vals[0] || distance > reached {
        return Ok(None);
    }

    Ok(Some(interpolate(&x_vals, &y_vals, distance)))
}

/// Margin by which the ball clears a wall of `fence_height` at `fence_distance`.
///
/// Positive clears, negative hits the wall, `None` lands short of it.
pub fn fence_clearance(
    result: &TrajectoryResult,
    fence_distance: f64,
    fence_height: f64,
) -> PhysicsResult<Option<f64>> {
    let fence_height = ensure_finite("fence height", fence_height)?;
    Ok(height_at_distance(result, fence_distance)?
        .filter(|height| *height >= 0.0)
        .map(|height| height - fence_height))
}

/// Linear interpolation over monotonically increasing `x_vals`
fn interpolate(x_vals: &[f64], y_vals: &[f64], x: f64) -> f64 {
    if x_vals.is_empty() || x_vals.len() != y_vals.len() {
        return 0.0;
    }

    if x <= x_vals[0] {
        return y_vals[0];
    }

    if x >= x_vals[x_vals.len() - 1] {
        return y_vals[y_vals.len() - 1];
    }

    // Binary search for the correct interval
    let mut left = 0;
    let mut right = x_vals.len() - 1;

    while right - left > 1 {
        let mid = (left + right) / 2;
        if x_vals[mid] <= x {
            left = mid;
        } else {
            right = mid;
        }
    }

    let x1 = x_vals[left];
    let x2 = x_vals[right];
    let y1 = y_vals[left];
    let y2 = y_vals[right];

    if (x2 - x1).abs() < f64::EPSILON {
        return y1;
    }

    y1 + (y2 - y1) * (x - x1) / (x2 - x1)
}

fn add_trajectory_flags(samples: &mut [TrajectorySample], points: &[TrajectoryPoint]) {
    if samples.is_empty() {
        return;
    }

    samples[0].flags.push(TrajectoryFlag::Launch);
    let last = samples.len() - 1;
    samples[last].flags.push(TrajectoryFlag::Landing);

    // Apex is taken from the raw states so it does not depend on sampling density
    let apex_time = points
        .iter()
        .fold((f64::NEG_INFINITY, 0.0), |(best_y, best_t), p| {
            if p.position.y > best_y {
                (p.position.y, p.time)
            } else {
                (best_y, best_t)
            }
        })
        .1;

    if let Some(idx) = find_closest_sample_index(samples, apex_time) {
        samples[idx].flags.push(TrajectoryFlag::Apex);
    }
}

/// Find the sample closest in time to `target_time`
fn find_closest_sample_index(samples: &[TrajectorySample], target_time: f64) -> Option<usize> {
    if samples.is_empty() {
        return None;
    }

    let mut left = 0;
    let mut right = samples.len();

    while left < right {
        let mid = (left + right) / 2;
        if samples[mid].time_s < target_time {
            left = mid + 1;
        } else {
            right = mid;
        }
    }

    // Closest is either left-1 or left
    let mut best_idx = left.min(samples.len() - 1);
    if left > 0 {
        let left_gap = (samples[left - 1].time_s - target_time).abs();
        let right_gap = (samples[best_idx].time_s - target_time).abs();
        if left_gap < right_gap {
            best_idx = left - 1;
        }
    }

    Some(best_idx)
}

/// Position at `fraction` of the flight, for callers that only need coordinates.
pub fn position_at_fraction(result: &TrajectoryResult, fraction: f64) -> PhysicsResult<Vector2<f64>> {
    let sample = sample_at_fraction(result, fraction)?;
    Ok(Vector2::new(sample.distance_m, sample.height_m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PhysicsConstants;
    use crate::trajectory_solver::{LaunchConditions, TrajectorySolver};

    fn recorded(launch: LaunchConditions) -> TrajectoryResult {
        let mut solver = TrajectorySolver::new(launch, PhysicsConstants::BASEBALL);
        solver.set_record_points(true);
        solver.solve().unwrap()
    }

    fn sample(time_s: f64) -> TrajectorySample {
        TrajectorySample {
            time_s,
            distance_m: 0.0,
            height_m: 0.0,
            speed_mps: 0.0,
            flags: Vec::new(),
        }
    }

    #[test]
    fn test_interpolate() {
        let x_vals = vec![0.0, 1.0, 2.0, 3.0];
        let y_vals = vec![0.0, 10.0, 20.0, 30.0];

        assert_eq!(interpolate(&x_vals, &y_vals, 0.5), 5.0);
        assert_eq!(interpolate(&x_vals, &y_vals, 1.5), 15.0);
        assert_eq!(interpolate(&x_vals, &y_vals, 2.5), 25.0);

        // Clamped outside the table
        assert_eq!(interpolate(&x_vals, &y_vals, -1.0), 0.0);
        assert_eq!(interpolate(&x_vals, &y_vals, 4.0), 30.0);
    }

    #[test]
    fn test_find_closest_sample_index() {
        let samples = vec![sample(0.0), sample(1.0), sample(2.0)];

        assert_eq!(find_closest_sample_index(&samples, 0.4), Some(0));
        assert_eq!(find_closest_sample_index(&samples, 1.2), Some(1));
        assert_eq!(find_closest_sample_index(&samples, 1.8), Some(2));
        assert_eq!(find_closest_sample_index(&samples, 9.0), Some(2));
        assert_eq!(find_closest_sample_index(&[], 1.0), None);
    }

    #[test]
    fn test_sample_at_fraction_matches_closed_form() {
        let result = recorded(LaunchConditions::new(30.0, 45.0, 0.0));
        let tof = result.points.last().unwrap().time;
        let v = 30.0 * 45f64.to_radians().cos();

        let midpoint = sample_at_fraction(&result, 0.5).unwrap();
        assert!((midpoint.time_s - tof / 2.0).abs() < 1e-9);
        assert!((midpoint.distance_m - v * tof / 2.0).abs() < 1e-6);
        assert!((midpoint.height_m - result.max_height).abs() < 0.01);

        let landing = sample_at_fraction(&result, 1.0).unwrap();
        assert!((landing.distance_m - result.range).abs() < 0.01);
        assert!(landing.height_m.abs() < 1e-9);
    }

    #[test]
    fn test_sample_at_fraction_clamps() {
        let result = recorded(LaunchConditions::new(30.0, 45.0, 1.5));
        let before = sample_at_fraction(&result, -0.5).unwrap();
        assert_eq!(before.time_s, 0.0);
        assert_eq!(before.height_m, 1.5);

        assert!(sample_at_fraction(&result, f64::NAN).is_err());
    }

    #[test]
    fn test_sampling_requires_points() {
        let result = TrajectorySolver::new(LaunchConditions::default(), PhysicsConstants::BASEBALL)
            .solve()
            .unwrap();
        assert!(matches!(
            sample_at_fraction(&result, 0.5),
            Err(PhysicsError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_sample_trajectory_flags() {
        let result = recorded(LaunchConditions::new(30.0, 45.0, 0.0));
        let samples = sample_trajectory(&result, 10).unwrap();

        assert_eq!(samples.len(), 11);
        assert!(samples[0].flags.contains(&TrajectoryFlag::Launch));
        assert!(samples[10].flags.contains(&TrajectoryFlag::Landing));
        // Symmetric flight: apex is at the midpoint sample
        assert!(samples[5].flags.contains(&TrajectoryFlag::Apex));
        assert!(samples.windows(2).all(|w| w[1].distance_m > w[0].distance_m));
    }

    #[test]
    fn test_sample_trajectory_agrees_with_fractions() {
        let result = recorded(LaunchConditions::new(38.0, 28.0, 1.2).with_air_resistance(true));
        let samples = sample_trajectory(&result, 8).unwrap();

        for (i, sample) in samples.iter().enumerate() {
            let single = sample_at_fraction(&result, i as f64 / 8.0).unwrap();
            assert!((sample.time_s - single.time_s).abs() < 1e-9);
            assert!((sample.distance_m - single.distance_m).abs() < 1e-9);
            assert!((sample.height_m - single.height_m).abs() < 1e-9);
            assert!((sample.speed_mps - single.speed_mps).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sample_trajectory_with_drag() {
        let result = recorded(LaunchConditions::new(40.0, 35.0, 1.0).with_air_resistance(true));
        let samples = sample_trajectory(&result, 20).unwrap();

        assert_eq!(samples.len(), 21);
        let apex = samples.iter().position(|s| s.flags.contains(&TrajectoryFlag::Apex)).unwrap();
        // Drag makes the descent steeper than the climb, apex sits past halfway in distance
        assert!(samples[apex].distance_m > result.range / 2.0);
        assert!(sample_trajectory(&result, 0).is_err());
    }

    #[test]
    fn test_fence_clearance() {
        // Fly ball: 44 m/s at 30°, from 1 m
        let result = recorded(LaunchConditions::new(44.0, 30.0, 1.0));

        let over = fence_clearance(&result, 100.0, 3.0).unwrap().unwrap();
        let expected_height = {
            let vx = 44.0 * 30f64.to_radians().cos();
            let vy = 44.0 * 30f64.to_radians().sin();
            let t = 100.0 / vx;
            1.0 + vy * t - 0.5 * 9.81 * t * t
        };
        assert!((over - (expected_height - 3.0)).abs() < 0.01);

        // Beyond the landing point
        assert_eq!(fence_clearance(&result, 500.0, 3.0).unwrap(), None);

        // A wall taller than the ball's height at that distance
        let short = fence_clearance(&result, 100.0, 100.0).unwrap().unwrap();
        assert!(short < 0.0);
    }

    #[test]
    fn test_position_at_fraction() {
        let result = recorded(LaunchConditions::new(25.0, 20.0, 1.0));
        let start = position_at_fraction(&result, 0.0).unwrap();
        assert_eq!(start, Vector2::new(0.0, 1.0));
    }
}
