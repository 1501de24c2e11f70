//! Complete motion: inverse kinematics for the target, followed by the LSPB
//! trajectory from the current joints to the solved goal.

use tracing::debug;

use crate::convergence_error::ConvergenceError;
use crate::ik_solver::{solve_ik, SolverConfig};
use crate::kinematic_traits::{Joints, Target};
use crate::lspb::{generate_trajectory, TrajectorySample};
use crate::parameter_error::ParameterError;
use crate::parameters::planar_arm::Parameters;
use crate::utils::planar_arm::is_valid;

/// Everything needed to plan one motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRequest {
    /// Joint angles the arm is currently at, radians.
    pub current_angles: Joints,

    /// Where the end-effector should arrive.
    pub target: Target,

    /// Duration of the motion, seconds.
    pub duration: f64,

    /// Sampling interval of the trajectory, seconds.
    pub dt: f64,

    pub parameters: Parameters,

    pub solver: SolverConfig,
}

impl MotionRequest {
    /// Request with the usual duration (2.5 s), sampling (0.05 s) and the demo arm.
    pub fn new(current_angles: Joints, target: Target) -> Self {
        MotionRequest {
            current_angles,
            target,
            duration: 2.5,
            dt: 0.05,
            parameters: Parameters::demo_arm(),
            solver: SolverConfig::default(),
        }
    }

    /// Checks what the planner itself takes for granted: finite angles and target,
    /// positive duration, sampling interval, link lengths and solver settings.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !is_valid(&self.current_angles) {
            return Err(ParameterError::InvalidValue(format!(
                "current_angles must be finite (got {:?})", self.current_angles
            )));
        }
        if !(self.target.x.is_finite() && self.target.y.is_finite()) {
            return Err(ParameterError::InvalidValue(format!(
                "target must be finite (got {}, {})", self.target.x, self.target.y
            )));
        }
        positive("duration", self.duration)?;
        positive("dt", self.dt)?;
        for (name, length) in ["l1", "l2", "l3"].iter().zip(self.parameters.lengths()) {
            positive(name, length)?;
        }
        positive("tolerance", self.solver.tolerance)?;
        positive("gain", self.solver.gain)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidValue(format!("{} must be positive (got {})", name, value)))
    }
}

/// Outcome of the successful planning.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPlan {
    /// Joint angles at the end of the motion, closest to the current ones.
    pub goal_angles: Joints,

    /// Samples from the current angles to goal_angles, in time order.
    pub trajectory: Vec<TrajectorySample>,
}

/// Plans the motion. The trajectory starts exactly at the current angles of the request.
pub fn plan_motion(request: &MotionRequest) -> Result<MotionPlan, ConvergenceError> {
    let goal_angles = solve_ik(
        &request.current_angles,
        &request.target,
        &request.parameters,
        &request.solver,
    )?;

    let trajectory = generate_trajectory(
        &request.current_angles,
        &goal_angles,
        request.duration,
        request.dt,
    );
    debug!(?goal_angles, samples = trajectory.len(), "motion planned");

    Ok(MotionPlan { goal_angles, trajectory })
}

/// Plans all requests independently, in parallel. Results are in the order of requests.
#[cfg(feature = "parallel")]
pub fn plan_batch(requests: &[MotionRequest]) -> Vec<Result<MotionPlan, ConvergenceError>> {
    use rayon::prelude::*;
    requests.par_iter().map(plan_motion).collect()
}

/// Plans all requests independently. Results are in the order of requests.
#[cfg(not(feature = "parallel"))]
pub fn plan_batch(requests: &[MotionRequest]) -> Vec<Result<MotionPlan, ConvergenceError>> {
    requests.iter().map(plan_motion).collect()
}
