//! Iterative inverse kinematics with the pseudoinverse of the geometric Jacobian.
//!
//! Each iteration computes the end-effector position, and, unless it is already within
//! tolerance, moves the joints by a fixed fraction of the least-norm joint correction
//! `J⁺ · error`. The pseudoinverse is recomputed from scratch in every iteration, so the
//! solver also passes through configurations where the Jacobian loses rank.

use nalgebra::Vector2;
use tracing::{debug, trace, warn, Level};

use crate::convergence_error::ConvergenceError;
use crate::jacobian::{jacobian_from_snapshot, pseudo_inverse};
use crate::kinematic_traits::{Joints, Kinematics, Target};
use crate::kinematics_impl::PlanarKinematics;
use crate::parameters::planar_arm::Parameters;
use crate::utils::{closest_equivalent, joints_to_vector3, vector3_to_joints};

/// Settings of the iterative solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Distance between the end-effector and the target, in link length units,
    /// below which the solution is accepted.
    pub tolerance: f64,

    /// Upper bound of iterations before the solver gives up.
    pub max_iterations: usize,

    /// Fraction of the computed joint correction applied per iteration.
    pub gain: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.5,
            max_iterations: 150,
            gain: 0.5,
        }
    }
}

/// Solve the inverse kinematics for the arm with the given link lengths.
///
/// The returned joint values are re-expressed as closest to `current`, so no joint needs to
/// rotate more than half a turn to get there.
pub fn solve_ik(
    current: &Joints,
    target: &Target,
    parameters: &Parameters,
    config: &SolverConfig,
) -> Result<Joints, ConvergenceError> {
    solve_ik_with(&PlanarKinematics::new(*parameters), current, target, config)
}

/// Solve the inverse kinematics for the given robot, starting from `current`.
pub fn solve_ik_with(
    robot: &PlanarKinematics,
    current: &Joints,
    target: &Target,
    config: &SolverConfig,
) -> Result<Joints, ConvergenceError> {
    if tracing::enabled!(Level::DEBUG) {
        if let Some(singularity) = robot.kinematic_singularity(current) {
            debug!(?singularity, ?current, "starting inverse kinematics from a singular configuration");
        }
    }

    let mut q = joints_to_vector3(*current);
    let mut iterations = 0;

    while iterations < config.max_iterations {
        let qs = vector3_to_joints(q);
        let snapshot = robot.snapshot(&qs);
        let tip = snapshot.end_effector();
        let error = target - Vector2::new(tip.x, tip.y);
        let residual = error.norm();

        // Checked before stepping: the accepted solution is the last updated one
        if residual < config.tolerance {
            debug!(iterations, residual, "inverse kinematics converged");
            return Ok(closest_equivalent(&qs, current));
        }

        let Ok(jacobian_pseudoinverse) = pseudo_inverse(&jacobian_from_snapshot(&snapshot)) else {
            warn!(iterations, ?qs, "pseudoinverse of the Jacobian failed");
            break;
        };
        trace!(iterations, residual, ?qs, "inverse kinematics step");

        q += config.gain * (jacobian_pseudoinverse * error);
        iterations += 1;
    }

    let residual = (target - robot.end_effector(&vector3_to_joints(q))).norm();
    let error = failure(robot.parameters(), target, iterations, residual);
    warn!(%error, "inverse kinematics did not converge");
    Err(error)
}

fn failure(parameters: &Parameters, target: &Target, iterations: usize, residual: f64) -> ConvergenceError {
    if parameters.reachable(target) {
        ConvergenceError::IterationLimit {
            target: *target,
            iterations,
            residual,
        }
    } else {
        ConvergenceError::OutOfReach {
            target: *target,
            distance: target.norm(),
            min_reach: parameters.min_reach(),
            max_reach: parameters.max_reach(),
        }
    }
}
