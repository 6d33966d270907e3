//! Projectile motion for a batted or thrown ball.
//!
//! Two solution modes share one entry point:
//!
//! - **Vacuum** (no air resistance): closed-form kinematics.
//! - **Drag**: fixed-step integration of gravity plus quadratic drag,
//!   `F = ½ ρ C_d π r² v²`, always opposing the velocity. Forward Euler is the
//!   default; classical RK4 is available for higher fidelity.
//!
//! Summary figures are rounded to display precision. Recorded trajectory
//! points keep full precision so drawing and sampling code can interpolate.

use log::{debug, warn};
use nalgebra::Vector2;
use serde::Serialize;

use crate::constants::{
    PhysicsConstants, DEFAULT_TIME_STEP_S, MAX_FLIGHT_TIME_S, MAX_RECORDED_POINTS,
    MIN_TIME_STEP_S, MIN_VELOCITY_THRESHOLD,
};
use crate::error::{ensure_finite, finite_output, PhysicsError, PhysicsResult};

/// Numerical scheme used in drag mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum IntegrationMethod {
    #[default]
    Euler,
    RungeKutta4,
}

/// How the ball leaves the bat or hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaunchConditions {
    pub velocity: f64,       // m/s
    pub angle_degrees: f64,  // above horizontal
    pub initial_height: f64, // m above the ground
    pub air_resistance: bool,
}

impl Default for LaunchConditions {
    fn default() -> Self {
        Self {
            velocity: 30.0,
            angle_degrees: 25.0,
            initial_height: 1.8,
            air_resistance: false,
        }
    }
}

impl LaunchConditions {
    pub fn new(velocity: f64, angle_degrees: f64, initial_height: f64) -> Self {
        Self {
            velocity,
            angle_degrees,
            initial_height,
            air_resistance: false,
        }
    }

    pub fn with_air_resistance(mut self, air_resistance: bool) -> Self {
        self.air_resistance = air_resistance;
        self
    }

    /// Initial velocity split into horizontal and vertical components.
    pub fn initial_velocity(&self) -> Vector2<f64> {
        let angle_rad = self.angle_degrees.to_radians();
        Vector2::new(
            self.velocity * angle_rad.cos(),
            self.velocity * angle_rad.sin(),
        )
    }

    fn validate(&self) -> PhysicsResult<()> {
        ensure_finite("velocity", self.velocity)?;
        ensure_finite("angle", self.angle_degrees)?;
        ensure_finite("initial height", self.initial_height)?;
        Ok(())
    }
}

/// Full-precision state of the ball at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub position: Vector2<f64>, // x downrange, y height
    pub velocity: Vector2<f64>,
}

impl TrajectoryPoint {
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// Trajectory result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryResult {
    pub time_of_flight: f64,  // s
    pub max_height: f64,      // m
    pub range: f64,           // m
    pub impact_velocity: f64, // m/s
    /// Raw states, only present when point recording was requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<TrajectoryPoint>,
}

/// Unrounded flight figures, shared with the angle searches.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlightSummary {
    pub time_of_flight: f64,
    pub max_height: f64,
    pub range: f64,
    pub impact_velocity: f64,
}

impl FlightSummary {
    fn into_result(self, points: Vec<TrajectoryPoint>) -> PhysicsResult<TrajectoryResult> {
        Ok(TrajectoryResult {
            time_of_flight: finite_output("time of flight", self.time_of_flight)?,
            max_height: finite_output("max height", self.max_height)?,
            range: finite_output("range", self.range)?,
            impact_velocity: finite_output("impact velocity", self.impact_velocity)?,
            points,
        })
    }
}

// Trajectory solver
pub struct TrajectorySolver {
    launch: LaunchConditions,
    constants: PhysicsConstants,
    time_step: f64,
    method: IntegrationMethod,
    max_time: f64,
    record_points: bool,
}

impl TrajectorySolver {
    pub fn new(launch: LaunchConditions, constants: PhysicsConstants) -> Self {
        Self {
            launch,
            constants,
            time_step: DEFAULT_TIME_STEP_S,
            method: IntegrationMethod::default(),
            max_time: MAX_FLIGHT_TIME_S,
            record_points: false,
        }
    }

    pub fn set_time_step(&mut self, step: f64) {
        self.time_step = step;
    }

    pub fn set_method(&mut self, method: IntegrationMethod) {
        self.method = method;
    }

    pub fn set_max_time(&mut self, max_time: f64) {
        self.max_time = max_time;
    }

    pub fn set_record_points(&mut self, record: bool) {
        self.record_points = record;
    }

    pub fn launch(&self) -> &LaunchConditions {
        &self.launch
    }

    pub fn solve(&self) -> PhysicsResult<TrajectoryResult> {
        let (summary, points) = self.run(self.record_points)?;
        summary.into_result(points)
    }

    /// Unrounded summary without recording points.
    pub(crate) fn solve_summary(&self) -> PhysicsResult<FlightSummary> {
        let (summary, _) = self.run(false)?;
        for (name, value) in [
            ("time of flight", summary.time_of_flight),
            ("max height", summary.max_height),
            ("range", summary.range),
            ("impact velocity", summary.impact_velocity),
        ] {
            if !value.is_finite() {
                return Err(PhysicsError::NonFiniteResult { name });
            }
        }
        Ok(summary)
    }

    fn run(&self, record: bool) -> PhysicsResult<(FlightSummary, Vec<TrajectoryPoint>)> {
        self.launch.validate()?;
        self.constants.validate()?;
        if !self.time_step.is_finite() || self.time_step < MIN_TIME_STEP_S {
            return Err(PhysicsError::InvalidTimeStep(self.time_step));
        }

        if self.launch.air_resistance {
            self.solve_numerical(record)
        } else {
            self.solve_closed_form(record)
        }
    }

    fn solve_closed_form(&self, record: bool) -> PhysicsResult<(FlightSummary, Vec<TrajectoryPoint>)> {
        let g = self.constants.gravity;
        let h = self.launch.initial_height;
        let v0 = self.launch.initial_velocity();

        // Positive root of 0 = h + vy0·t − ½gt²
        let time_of_flight = (v0.y + (v0.y * v0.y + 2.0 * g * h).sqrt()) / g;
        // Below ground and heading down: the only root lies in the past
        if time_of_flight < 0.0 {
            return Err(PhysicsError::NonFiniteResult { name: "time of flight" });
        }
        if time_of_flight > self.max_time {
            warn!("closed-form flight of {time_of_flight:.1} s exceeds the {} s limit", self.max_time);
            return Err(PhysicsError::FlightTimeExceeded { max_time: self.max_time });
        }

        let max_height = h + v0.y * v0.y / (2.0 * g);
        let range = v0.x * time_of_flight;
        let impact_velocity = Vector2::new(v0.x, v0.y - g * time_of_flight).norm();

        let mut points = Vec::new();
        if record && time_of_flight.is_finite() {
            let grid = (time_of_flight / self.time_step).ceil();
            if grid >= MAX_RECORDED_POINTS as f64 {
                return Err(too_many_points());
            }
            let steps = grid as usize;
            points.reserve(steps + 1);
            for i in 0..steps {
                points.push(self.closed_form_point(i as f64 * self.time_step));
            }
            points.push(self.closed_form_point(time_of_flight));
        }

        Ok((
            FlightSummary {
                time_of_flight,
                max_height,
                range,
                impact_velocity,
            },
            points,
        ))
    }

    fn closed_form_point(&self, time: f64) -> TrajectoryPoint {
        let g = self.constants.gravity;
        let v0 = self.launch.initial_velocity();
        TrajectoryPoint {
            time,
            position: Vector2::new(
                v0.x * time,
                self.launch.initial_height + v0.y * time - 0.5 * g * time * time,
            ),
            velocity: Vector2::new(v0.x, v0.y - g * time),
        }
    }

    fn solve_numerical(&self, record: bool) -> PhysicsResult<(FlightSummary, Vec<TrajectoryPoint>)> {
        let dt = self.time_step;
        let mut time = 0.0;
        let mut position = Vector2::new(0.0, self.launch.initial_height);
        let mut velocity = self.launch.initial_velocity();
        let mut max_height = position.y;
        let mut steps = 0usize;

        let mut points = Vec::new();
        if record {
            points.push(TrajectoryPoint { time, position, velocity });
        }

        // Integrate until the ball has crossed ground level
        while position.y >= 0.0 {
            if time >= self.max_time {
                warn!(
                    "ball still at {:.2} m after {} s; aborting integration",
                    position.y, self.max_time
                );
                return Err(PhysicsError::FlightTimeExceeded { max_time: self.max_time });
            }

            match self.method {
                IntegrationMethod::Euler => {
                    let acceleration = self.acceleration(&velocity);
                    velocity += acceleration * dt;
                    position += velocity * dt;
                }
                IntegrationMethod::RungeKutta4 => {
                    let (dp, dv) = self.rk4_increment(&velocity);
                    position += dp;
                    velocity += dv;
                }
            }

            time += dt;
            steps += 1;
            if position.y > max_height {
                max_height = position.y;
            }
            if record {
                if points.len() >= MAX_RECORDED_POINTS {
                    return Err(too_many_points());
                }
                points.push(TrajectoryPoint { time, position, velocity });
            }
        }

        debug!(
            "{:?} integration finished after {steps} steps: t = {time:.3} s, x = {:.3} m",
            self.method, position.x
        );

        Ok((
            FlightSummary {
                time_of_flight: time,
                max_height,
                range: position.x,
                impact_velocity: velocity.norm(),
            },
            points,
        ))
    }

    /// Gravity plus drag opposing the direction of travel.
    fn acceleration(&self, velocity: &Vector2<f64>) -> Vector2<f64> {
        let gravity = Vector2::new(0.0, -self.constants.gravity);
        let speed = velocity.norm();
        if speed < MIN_VELOCITY_THRESHOLD {
            return gravity;
        }

        let drag = 0.5
            * self.constants.air_density
            * self.constants.drag_coefficient
            * self.constants.cross_section_area()
            * speed
            * speed;
        gravity - *velocity * (drag / (self.constants.ball_mass * speed))
    }

    /// Position and velocity change over one RK4 step.
    fn rk4_increment(&self, velocity: &Vector2<f64>) -> (Vector2<f64>, Vector2<f64>) {
        let dt = self.time_step;

        let k1_v = self.acceleration(velocity);
        let k1_p = *velocity;

        let k2_p = *velocity + k1_v * (dt / 2.0);
        let k2_v = self.acceleration(&k2_p);

        let k3_p = *velocity + k2_v * (dt / 2.0);
        let k3_v = self.acceleration(&k3_p);

        let k4_p = *velocity + k3_v * dt;
        let k4_v = self.acceleration(&k4_p);

        let dp = (k1_p + k2_p * 2.0 + k3_p * 2.0 + k4_p) * (dt / 6.0);
        let dv = (k1_v + k2_v * 2.0 + k3_v * 2.0 + k4_v) * (dt / 6.0);
        (dp, dv)
    }
}

fn too_many_points() -> PhysicsError {
    PhysicsError::InvalidParameters(format!(
        "recording would exceed {MAX_RECORDED_POINTS} trajectory points; use a larger time step"
    ))
}

/// Flight time, apex, range and impact speed for a ball launched at
/// `velocity` m/s and `angle_degrees` above horizontal from `initial_height` m.
pub fn calculate_projectile_motion(
    velocity: f64,
    angle_degrees: f64,
    initial_height: f64,
    use_air_resistance: bool,
) -> PhysicsResult<TrajectoryResult> {
    calculate_projectile_motion_with(
        &PhysicsConstants::BASEBALL,
        velocity,
        angle_degrees,
        initial_height,
        use_air_resistance,
    )
}

pub fn calculate_projectile_motion_with(
    constants: &PhysicsConstants,
    velocity: f64,
    angle_degrees: f64,
    initial_height: f64,
    use_air_resistance: bool,
) -> PhysicsResult<TrajectoryResult> {
    let launch = LaunchConditions::new(velocity, angle_degrees, initial_height)
        .with_air_resistance(use_air_resistance);
    TrajectorySolver::new(launch, *constants).solve()
}
