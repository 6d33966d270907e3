use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use baseball_physics::{
    calculate_collision, calculate_energy_with, calculate_launch_angle_for_range,
    calculate_magnus_effect_over, fence_clearance, find_optimal_launch_angle, logging,
    round_to_decimal, run_monte_carlo, sample_trajectory, spin_surface_speed, AngleResult,
    IntegrationMethod, LaunchConditions, MonteCarloParams, PhysicsConstants, PitchType,
    TrajectoryFlag, TrajectorySolver, UnitSystem, DEFAULT_PRECISION,
};

#[derive(Parser)]
#[command(name = "baseball-physics")]
#[command(version)]
#[command(about = "Physics of Baseball calculator: trajectories, energy, collisions and spin", long_about = None)]
struct Cli {
    /// JSON file overriding the physical constants (partial tables allowed)
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    /// Unit system for speeds and distances
    #[arg(short = 'u', long, global = true, default_value = "metric")]
    units: UnitSystem,

    /// Show debug logging on stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the flight of a batted or thrown ball
    Trajectory {
        /// Launch speed (m/s or mph)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Launch angle above horizontal (degrees)
        #[arg(short = 'a', long, default_value = "25.0", allow_hyphen_values = true)]
        angle: f64,

        /// Release height (m or ft)
        #[arg(long, default_value = "1.8", allow_hyphen_values = true)]
        height: f64,

        /// Include quadratic air drag
        #[arg(long)]
        drag: bool,

        /// Integrate drag with RK4 instead of Euler
        #[arg(long)]
        rk4: bool,

        /// Integration time step (seconds, at least 1e-6)
        #[arg(long, default_value = "0.01")]
        time_step: f64,

        /// Number of intervals in the sampled path
        #[arg(long, default_value = "10")]
        samples: usize,

        /// Distance to an outfield wall (m or ft)
        #[arg(long)]
        fence_distance: Option<f64>,

        /// Height of that wall (m or ft)
        #[arg(long, default_value = "3.0")]
        fence_height: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Kinetic and potential energy plus work done
    Energy {
        /// Mass (kg)
        #[arg(short = 'm', long, default_value = "0.145")]
        mass: f64,

        /// Speed (m/s or mph)
        #[arg(short = 'v', long, allow_hyphen_values = true)]
        velocity: f64,

        /// Height above the ground (m or ft)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        height: f64,

        /// Applied force (N)
        #[arg(short = 'f', long, default_value = "0.0", allow_hyphen_values = true)]
        force: f64,

        /// Distance the force acts over (m or ft)
        #[arg(short = 'd', long, default_value = "0.0", allow_hyphen_values = true)]
        distance: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Head-on bat/ball collision
    Collision {
        /// Ball mass (kg)
        #[arg(long, default_value = "0.145")]
        mass1: f64,

        /// Ball velocity (m/s or mph, signed)
        #[arg(long, allow_hyphen_values = true)]
        velocity1: f64,

        /// Bat mass (kg)
        #[arg(long, default_value = "0.9")]
        mass2: f64,

        /// Bat velocity (m/s or mph, signed)
        #[arg(long, allow_hyphen_values = true)]
        velocity2: f64,

        /// Coefficient of restitution, 1 is perfectly elastic
        #[arg(short = 'e', long, default_value = "1.0")]
        restitution: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Magnus force and deflection of a spinning ball
    Magnus {
        /// Ball speed (m/s or mph)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Spin rate (rpm)
        #[arg(short = 's', long)]
        spin: f64,

        /// Spin axis (degrees, 0 backspin, 90 sidespin, 180 topspin)
        #[arg(short = 'a', long, default_value = "0.0", allow_hyphen_values = true)]
        axis: f64,

        /// Flight time for the deflection estimate (seconds)
        #[arg(short = 't', long, default_value = "2.0")]
        flight_time: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Launch angle for maximum carry, or for a given distance
    OptimalAngle {
        /// Launch speed (m/s or mph)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Release height (m or ft)
        #[arg(long, default_value = "1.8", allow_hyphen_values = true)]
        height: f64,

        /// Include quadratic air drag
        #[arg(long)]
        drag: bool,

        /// Also solve for the line-drive angle reaching this distance (m or ft)
        #[arg(long)]
        target: Option<f64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Batted-ball dispersion by Monte Carlo simulation
    MonteCarlo {
        /// Base launch speed (m/s or mph)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Base launch angle (degrees)
        #[arg(short = 'a', long, default_value = "25.0", allow_hyphen_values = true)]
        angle: f64,

        /// Release height (m or ft)
        #[arg(long, default_value = "1.0")]
        height: f64,

        /// Include quadratic air drag
        #[arg(long)]
        drag: bool,

        /// Number of simulations
        #[arg(short = 'n', long, default_value = "1000")]
        num_sims: usize,

        /// Launch speed standard deviation (m/s or mph)
        #[arg(long, default_value = "1.0")]
        velocity_std: f64,

        /// Launch angle standard deviation (degrees)
        #[arg(long, default_value = "2.0")]
        angle_std: f64,

        /// Release height standard deviation (m or ft)
        #[arg(long, default_value = "0.05")]
        height_std: f64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display the constants in use
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
struct SampleRow {
    time: f64,
    distance: f64,
    height: f64,
    speed: f64,
    flags: Vec<TrajectoryFlag>,
}

#[derive(Debug, Serialize)]
struct TrajectoryReport {
    units: UnitSystem,
    time_of_flight: f64,
    max_height: f64,
    range: f64,
    impact_velocity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    fence_clearance: Option<f64>,
    samples: Vec<SampleRow>,
}

#[derive(Debug, Serialize)]
struct CollisionReport {
    units: UnitSystem,
    momentum1: f64,
    momentum2: f64,
    total_momentum: f64,
    final_velocity1: f64,
    final_velocity2: f64,
    energy_loss: f64,
}

#[derive(Debug, Serialize)]
struct MagnusReport {
    units: UnitSystem,
    magnus_force: f64,
    vertical_force: f64,
    horizontal_force: f64,
    acceleration: f64,
    vertical_deflection: f64,
    horizontal_deflection: f64,
    surface_speed: f64,
    pitch_type: PitchType,
}

#[derive(Debug, Serialize)]
struct AngleReport {
    units: UnitSystem,
    optimal_angle: f64,
    max_range: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_range: Option<f64>,
}

#[derive(Debug, Serialize)]
struct MonteCarloReport {
    units: UnitSystem,
    num_simulations: usize,
    valid_runs: usize,
    failed_runs: usize,
    mean_range: f64,
    std_range: f64,
    min_range: f64,
    max_range: f64,
    mean_max_height: f64,
    std_max_height: f64,
    mean_impact_velocity: f64,
    std_impact_velocity: f64,
}

fn round(value: f64) -> f64 {
    round_to_decimal(value, DEFAULT_PRECISION)
}

fn print_title(title: &str) {
    println!("║ {:^38} ║", title);
}

fn print_row(label: &str, value: f64, unit: &str) {
    println!("║ {:<18} {:>8.2} {:<10} ║", label, value, unit);
}

fn print_text(label: &str, value: &str) {
    println!("║ {:<18} {:<19} ║", label, value);
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let constants = match &cli.constants {
        Some(path) => PhysicsConstants::from_json_file(path)?,
        None => PhysicsConstants::BASEBALL,
    };
    let units = cli.units;

    match cli.command {
        Commands::Trajectory {
            velocity, angle, height, drag, rk4, time_step,
            samples, fence_distance, fence_height, output
        } => {
            let launch = LaunchConditions::new(
                units.velocity_to_metric(velocity),
                angle,
                units.distance_to_metric(height),
            )
            .with_air_resistance(drag);

            let mut solver = TrajectorySolver::new(launch, constants);
            solver.set_time_step(time_step);
            solver.set_record_points(true);
            if rk4 {
                solver.set_method(IntegrationMethod::RungeKutta4);
            }

            let result = solver.solve()?;
            let clearance = match fence_distance {
                Some(distance) => fence_clearance(
                    &result,
                    units.distance_to_metric(distance),
                    units.distance_to_metric(fence_height),
                )?,
                None => None,
            };

            let summary = units.convert_trajectory(&result);
            let report = TrajectoryReport {
                units,
                time_of_flight: summary.time_of_flight,
                max_height: summary.max_height,
                range: summary.range,
                impact_velocity: summary.impact_velocity,
                fence_clearance: clearance.map(|c| round(units.distance_from_metric(c))),
                samples: sample_trajectory(&result, samples)?
                    .into_iter()
                    .map(|s| SampleRow {
                        time: round(s.time_s),
                        distance: round(units.distance_from_metric(s.distance_m)),
                        height: round(units.distance_from_metric(s.height_m)),
                        speed: round(units.velocity_from_metric(s.speed_mps)),
                        flags: s.flags,
                    })
                    .collect(),
            };

            display_trajectory(&report, fence_distance.is_some(), output)?;
        },

        Commands::Energy { mass, velocity, height, force, distance, output } => {
            let result = calculate_energy_with(
                &constants,
                mass,
                units.velocity_to_metric(velocity),
                units.distance_to_metric(height),
                force,
                units.distance_to_metric(distance),
            )?;

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Csv => {
                    println!("metric,value");
                    println!("kinetic_energy,{:.2}", result.kinetic_energy);
                    println!("potential_energy,{:.2}", result.potential_energy);
                    println!("work_done,{:.2}", result.work_done);
                    println!("total_energy,{:.2}", result.total_energy);
                },
                OutputFormat::Table => {
                    println!("╔════════════════════════════════════════╗");
                    print_title("ENERGY AND WORK");
                    println!("╠════════════════════════════════════════╣");
                    print_row("Kinetic Energy:", result.kinetic_energy, "J");
                    print_row("Potential Energy:", result.potential_energy, "J");
                    print_row("Total Energy:", result.total_energy, "J");
                    print_row("Work Done:", result.work_done, "J");
                    println!("╚════════════════════════════════════════╝");
                },
            }
        },

        Commands::Collision { mass1, velocity1, mass2, velocity2, restitution, output } => {
            let result = calculate_collision(
                mass1,
                units.velocity_to_metric(velocity1),
                mass2,
                units.velocity_to_metric(velocity2),
                restitution,
            )?;
            let report = CollisionReport {
                units,
                momentum1: result.momentum1,
                momentum2: result.momentum2,
                total_momentum: result.total_momentum,
                final_velocity1: round(units.velocity_from_metric(result.final_velocity1)),
                final_velocity2: round(units.velocity_from_metric(result.final_velocity2)),
                energy_loss: result.energy_loss,
            };

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Csv => {
                    println!("metric,value");
                    println!("momentum1,{:.2}", report.momentum1);
                    println!("momentum2,{:.2}", report.momentum2);
                    println!("total_momentum,{:.2}", report.total_momentum);
                    println!("final_velocity1,{:.2}", report.final_velocity1);
                    println!("final_velocity2,{:.2}", report.final_velocity2);
                    println!("energy_loss,{:.2}", report.energy_loss);
                },
                OutputFormat::Table => {
                    let speed = units.velocity_label();
                    println!("╔════════════════════════════════════════╗");
                    print_title("COLLISION");
                    println!("╠════════════════════════════════════════╣");
                    print_row("Momentum 1:", report.momentum1, "kg·m/s");
                    print_row("Momentum 2:", report.momentum2, "kg·m/s");
                    print_row("Total Momentum:", report.total_momentum, "kg·m/s");
                    print_row("Final Velocity 1:", report.final_velocity1, speed);
                    print_row("Final Velocity 2:", report.final_velocity2, speed);
                    print_row("Energy Lost:", report.energy_loss, "J");
                    println!("╚════════════════════════════════════════╝");
                },
            }
        },

        Commands::Magnus { velocity, spin, axis, flight_time, output } => {
            let result = calculate_magnus_effect_over(
                &constants,
                units.velocity_to_metric(velocity),
                spin,
                axis,
                flight_time,
            )?;
            let report = MagnusReport {
                units,
                magnus_force: result.magnus_force,
                vertical_force: result.vertical_force,
                horizontal_force: result.horizontal_force,
                acceleration: result.acceleration,
                vertical_deflection: round(units.distance_from_metric(result.vertical_deflection)),
                horizontal_deflection: round(units.distance_from_metric(result.horizontal_deflection)),
                surface_speed: round(units.velocity_from_metric(spin_surface_speed(
                    spin,
                    constants.ball_radius,
                )?)),
                pitch_type: PitchType::from_spin_axis(axis),
            };

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Csv => {
                    println!("metric,value");
                    println!("magnus_force,{:.2}", report.magnus_force);
                    println!("vertical_force,{:.2}", report.vertical_force);
                    println!("horizontal_force,{:.2}", report.horizontal_force);
                    println!("acceleration,{:.2}", report.acceleration);
                    println!("vertical_deflection,{:.2}", report.vertical_deflection);
                    println!("horizontal_deflection,{:.2}", report.horizontal_deflection);
                    println!("surface_speed,{:.2}", report.surface_speed);
                },
                OutputFormat::Table => {
                    let length = units.distance_label();
                    println!("╔════════════════════════════════════════╗");
                    print_title("MAGNUS EFFECT");
                    println!("╠════════════════════════════════════════╣");
                    print_row("Magnus Force:", report.magnus_force, "N");
                    print_row("Vertical Force:", report.vertical_force, "N");
                    print_row("Horizontal Force:", report.horizontal_force, "N");
                    print_row("Acceleration:", report.acceleration, "m/s²");
                    print_row("Vertical Break:", report.vertical_deflection, length);
                    print_row("Horizontal Break:", report.horizontal_deflection, length);
                    print_row("Surface Speed:", report.surface_speed, units.velocity_label());
                    print_text("Pitch Type:", report.pitch_type.description());
                    println!("╚════════════════════════════════════════╝");
                },
            }
        },

        Commands::OptimalAngle { velocity, height, drag, target, output } => {
            let launch = LaunchConditions::new(
                units.velocity_to_metric(velocity),
                0.0,
                units.distance_to_metric(height),
            )
            .with_air_resistance(drag);

            let optimal = find_optimal_launch_angle(&launch, &constants)?;
            let for_target: Option<AngleResult> = match target {
                Some(distance) => Some(calculate_launch_angle_for_range(
                    &launch,
                    units.distance_to_metric(distance),
                    &constants,
                )?),
                None => None,
            };

            let report = AngleReport {
                units,
                optimal_angle: optimal.angle_degrees,
                max_range: round(units.distance_from_metric(optimal.range)),
                target_angle: for_target.map(|r| r.angle_degrees),
                target_range: for_target.map(|r| round(units.distance_from_metric(r.range))),
            };

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Csv => {
                    println!("metric,value");
                    println!("optimal_angle,{:.2}", report.optimal_angle);
                    println!("max_range,{:.2}", report.max_range);
                    if let (Some(angle), Some(range)) = (report.target_angle, report.target_range) {
                        println!("target_angle,{:.2}", angle);
                        println!("target_range,{:.2}", range);
                    }
                },
                OutputFormat::Table => {
                    let length = units.distance_label();
                    println!("╔════════════════════════════════════════╗");
                    print_title("LAUNCH ANGLE");
                    println!("╠════════════════════════════════════════╣");
                    print_row("Optimal Angle:", report.optimal_angle, "deg");
                    print_row("Max Range:", report.max_range, length);
                    if let (Some(angle), Some(range)) = (report.target_angle, report.target_range) {
                        println!("╠════════════════════════════════════════╣");
                        print_row("Angle for Target:", angle, "deg");
                        print_row("Range Reached:", range, length);
                    }
                    println!("╚════════════════════════════════════════╝");
                },
            }
        },

        Commands::MonteCarlo {
            velocity, angle, height, drag, num_sims,
            velocity_std, angle_std, height_std, seed, output
        } => {
            let base = LaunchConditions::new(
                units.velocity_to_metric(velocity),
                angle,
                units.distance_to_metric(height),
            )
            .with_air_resistance(drag);
            let params = MonteCarloParams {
                num_simulations: num_sims,
                velocity_std_dev: units.velocity_to_metric(velocity_std),
                angle_std_dev: angle_std,
                height_std_dev: units.distance_to_metric(height_std),
                seed,
            };

            let results = run_monte_carlo(&base, &params, &constants)?;
            let distance = |value: f64| round(units.distance_from_metric(value));
            let speed = |value: f64| round(units.velocity_from_metric(value));
            let report = MonteCarloReport {
                units,
                num_simulations: num_sims,
                valid_runs: results.valid_runs,
                failed_runs: results.failed_runs,
                mean_range: distance(results.range_stats.mean),
                std_range: distance(results.range_stats.std_dev),
                min_range: distance(results.range_stats.min),
                max_range: distance(results.range_stats.max),
                mean_max_height: distance(results.max_height_stats.mean),
                std_max_height: distance(results.max_height_stats.std_dev),
                mean_impact_velocity: speed(results.impact_velocity_stats.mean),
                std_impact_velocity: speed(results.impact_velocity_stats.std_dev),
            };

            display_monte_carlo(&report, output)?;
        },

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            print_title(&format!("BASEBALL PHYSICS v{}", env!("CARGO_PKG_VERSION")));
            println!("╠════════════════════════════════════════╣");
            print_row("Gravity:", constants.gravity, "m/s²");
            print_row("Air Density:", constants.air_density, "kg/m³");
            println!("║ {:<18} {:>8.3} {:<10} ║", "Ball Mass:", constants.ball_mass, "kg");
            println!("║ {:<18} {:>8.4} {:<10} ║", "Ball Radius:", constants.ball_radius, "m");
            println!("║ {:<18} {:>8.3} {:<10} ║", "Circumference:", constants.ball_circumference, "m");
            print_row("Drag Coeff.:", constants.drag_coefficient, "");
            print_row("Magnus Coeff.:", constants.magnus_coefficient, "");
            println!("╠════════════════════════════════════════╣");
            print_text("Units:", &units.to_string());
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_trajectory(
    report: &TrajectoryReport,
    show_fence: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let length = report.units.distance_label();
    let speed = report.units.velocity_label();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        },

        OutputFormat::Csv => {
            println!("time,distance,height,speed");
            for s in &report.samples {
                println!("{:.2},{:.2},{:.2},{:.2}", s.time, s.distance, s.height, s.speed);
            }
        },

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            print_title("TRAJECTORY RESULTS");
            println!("╠════════════════════════════════════════╣");
            print_row("Range:", report.range, length);
            print_row("Max Height:", report.max_height, length);
            print_row("Time of Flight:", report.time_of_flight, "s");
            print_row("Impact Velocity:", report.impact_velocity, speed);
            if show_fence {
                match report.fence_clearance {
                    Some(margin) if margin >= 0.0 => print_row("Clears Wall By:", margin, length),
                    Some(margin) => print_row("Short of Wall:", -margin, length),
                    None => print_text("Wall:", "lands short"),
                }
            }
            println!("╚════════════════════════════════════════╝");

            println!("\nSampled Path:");
            println!("┌──────────┬──────────┬──────────┬──────────┐");
            println!("│ Time (s) │ Dist {:<4}│ Hgt {:<5}│ Spd {:<5}│", length, length, speed);
            println!("├──────────┼──────────┼──────────┼──────────┤");
            for s in &report.samples {
                let marker = if s.flags.contains(&TrajectoryFlag::Apex) { " apex" } else { "" };
                println!("│ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │{}",
                    s.time, s.distance, s.height, s.speed, marker);
            }
            println!("└──────────┴──────────┴──────────┴──────────┘");
        },
    }

    Ok(())
}

fn display_monte_carlo(report: &MonteCarloReport, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    let length = report.units.distance_label();
    let speed = report.units.velocity_label();

    match format {
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            print_title("MONTE CARLO SIMULATION");
            print_title(&format!("{} simulations", report.num_simulations));
            println!("╠════════════════════════════════════════╣");
            print_title("RANGE");
            print_row("Mean:", report.mean_range, length);
            print_row("Std Dev:", report.std_range, length);
            print_row("Min:", report.min_range, length);
            print_row("Max:", report.max_range, length);
            println!("╠════════════════════════════════════════╣");
            print_title("MAX HEIGHT");
            print_row("Mean:", report.mean_max_height, length);
            print_row("Std Dev:", report.std_max_height, length);
            println!("╠════════════════════════════════════════╣");
            print_title("IMPACT VELOCITY");
            print_row("Mean:", report.mean_impact_velocity, speed);
            print_row("Std Dev:", report.std_impact_velocity, speed);
            if report.failed_runs > 0 {
                println!("╠════════════════════════════════════════╣");
                print_text("Failed Runs:", &report.failed_runs.to_string());
            }
            println!("╚════════════════════════════════════════╝");
        },

        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        },

        OutputFormat::Csv => {
            println!("metric,value");
            println!("num_simulations,{}", report.num_simulations);
            println!("valid_runs,{}", report.valid_runs);
            println!("mean_range,{:.2}", report.mean_range);
            println!("std_range,{:.2}", report.std_range);
            println!("min_range,{:.2}", report.min_range);
            println!("max_range,{:.2}", report.max_range);
            println!("mean_max_height,{:.2}", report.mean_max_height);
            println!("std_max_height,{:.2}", report.std_max_height);
            println!("mean_impact_velocity,{:.2}", report.mean_impact_velocity);
            println!("std_impact_velocity,{:.2}", report.std_impact_velocity);
        },
    }

    Ok(())
}
