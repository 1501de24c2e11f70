use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rs_planar_kinematics::kinematic_traits::{Joints, Target};
use rs_planar_kinematics::lspb::{JointState, TrajectorySample};
use rs_planar_kinematics::motion_planner::{plan_motion, MotionPlan, MotionRequest};
use rs_planar_kinematics::parameters::planar_arm::Parameters;
use rs_planar_kinematics::utils::{dump_trajectory, trajectory_header};

/// Plans the motion of the three link planar arm to the target position and prints
/// the goal joint angles followed by the sampled trajectory.
#[derive(Parser, Debug)]
#[command(name = "planar-arm", version, about)]
struct Args {
    /// YAML file with the complete motion request. Other options override its values.
    #[arg(long)]
    request: Option<PathBuf>,

    /// YAML file with link lengths (planar_arm_link_lengths section).
    #[arg(long)]
    parameters: Option<PathBuf>,

    /// Current joint angles, comma separated (radians unless --degrees).
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    angles: Option<Vec<f64>>,

    /// Target X of the end-effector.
    #[arg(long, allow_negative_numbers = true)]
    x: Option<f64>,

    /// Target Y of the end-effector.
    #[arg(long, allow_negative_numbers = true)]
    y: Option<f64>,

    /// Duration of the motion, seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Sampling interval, seconds.
    #[arg(long)]
    dt: Option<f64>,

    #[arg(long)]
    l1: Option<f64>,

    #[arg(long)]
    l2: Option<f64>,

    #[arg(long)]
    l3: Option<f64>,

    /// Accepted distance between the end-effector and the target.
    #[arg(long)]
    tolerance: Option<f64>,

    /// Iteration budget of the inverse kinematics.
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Read and print angles in degrees.
    #[arg(long)]
    degrees: bool,

    /// Print the trajectory as CSV.
    #[arg(long)]
    csv: bool,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let plan = plan(&args)?;

    let scale = if args.degrees { 180.0 / std::f64::consts::PI } else { 1.0 };
    print_goal(&plan.goal_angles, scale);
    let trajectory: Vec<TrajectorySample> = plan.trajectory.iter().map(|s| scaled(s, scale)).collect();
    if args.csv {
        print_csv(&trajectory);
    } else {
        dump_trajectory(&trajectory);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

/// Builds and validates the request, then plans it. Unreachable targets are errors.
fn plan(args: &Args) -> Result<MotionPlan> {
    let request = build_request(args)?;
    request.validate().context("Invalid motion request")?;
    info!(?request, "planning motion");
    Ok(plan_motion(&request)?)
}

fn build_request(args: &Args) -> Result<MotionRequest> {
    let mut request = match &args.request {
        Some(path) => MotionRequest::from_yaml_file(path)
            .with_context(|| format!("Failed to read the motion request from {}", path.display()))?,
        None => {
            let x = args.x.context("--x is required without --request")?;
            let y = args.y.context("--y is required without --request")?;
            MotionRequest::new([0.0; 3], Target::new(x, y))
        }
    };

    if let Some(angles) = &args.angles {
        request.current_angles = parse_angles(angles, args.degrees)?;
    }
    if let Some(x) = args.x {
        request.target.x = x;
    }
    if let Some(y) = args.y {
        request.target.y = y;
    }
    if let Some(duration) = args.duration {
        request.duration = duration;
    }
    if let Some(dt) = args.dt {
        request.dt = dt;
    }
    if let Some(path) = &args.parameters {
        request.parameters = Parameters::from_yaml_file(path)
            .with_context(|| format!("Failed to read link lengths from {}", path.display()))?;
    }
    request.parameters.l1 = args.l1.unwrap_or(request.parameters.l1);
    request.parameters.l2 = args.l2.unwrap_or(request.parameters.l2);
    request.parameters.l3 = args.l3.unwrap_or(request.parameters.l3);
    if let Some(tolerance) = args.tolerance {
        request.solver.tolerance = tolerance;
    }
    if let Some(max_iterations) = args.max_iterations {
        request.solver.max_iterations = max_iterations;
    }
    Ok(request)
}

fn parse_angles(angles: &[f64], degrees: bool) -> Result<Joints> {
    let [a, b, c] = angles else {
        bail!("--angles needs exactly 3 values, got {}", angles.len());
    };
    let joints = [*a, *b, *c];
    Ok(if degrees { joints.map(f64::to_radians) } else { joints })
}

fn scaled(sample: &TrajectorySample, scale: f64) -> TrajectorySample {
    TrajectorySample {
        time: sample.time,
        joints: sample.joints.map(|joint| JointState {
            position: joint.position * scale,
            velocity: joint.velocity * scale,
            acceleration: joint.acceleration * scale,
        }),
    }
}

fn print_goal(goal: &Joints, scale: f64) {
    let values: Vec<String> = goal.iter().map(|q| format!("{:.6}", q * scale)).collect();
    println!("goal_angles: [{}]", values.join(", "));
}

fn print_csv(samples: &[TrajectorySample]) {
    println!("{}", trajectory_header().join(","));
    for sample in samples {
        let row: Vec<String> = sample.to_row().iter().map(|v| v.to_string()).collect();
        println!("{}", row.join(","));
    }
}
