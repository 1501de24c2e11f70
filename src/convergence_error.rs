//! Error reported when the inverse kinematics does not converge

use std::fmt;
use crate::kinematic_traits::Target;

/// The only failure of the numeric kernel. It is produced when the iteration budget
/// of the inverse kinematics solver is exhausted without bringing the end-effector
/// within tolerance of the target.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvergenceError {
    /// The target lies outside the annulus the arm can sweep with its links.
    OutOfReach {
        target: Target,
        distance: f64,
        min_reach: f64,
        max_reach: f64,
    },
    /// The target is inside the workspace but the iteration made no sufficient progress,
    /// most often because it got stuck near a configuration where the Jacobian is singular.
    IterationLimit {
        target: Target,
        iterations: usize,
        residual: f64,
    },
}

impl ConvergenceError {
    /// Target the solver was asked to reach.
    pub fn target(&self) -> &Target {
        match self {
            ConvergenceError::OutOfReach { target, .. } => target,
            ConvergenceError::IterationLimit { target, .. } => target,
        }
    }

    pub fn is_out_of_reach(&self) -> bool {
        matches!(self, ConvergenceError::OutOfReach { .. })
    }
}

impl fmt::Display for ConvergenceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConvergenceError::OutOfReach { ref target, distance, min_reach, max_reach } =>
                write!(f, "Target ({:.3}, {:.3}) is out of reach: distance {:.3} is outside [{:.3}, {:.3}]",
                       target.x, target.y, distance, min_reach, max_reach),
            ConvergenceError::IterationLimit { ref target, iterations, residual } =>
                write!(f, "Algorithm hit a singularity limit: target ({:.3}, {:.3}) not reached after {} iterations, residual {:.4}",
                       target.x, target.y, iterations, residual),
        }
    }
}

impl std::error::Error for ConvergenceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_distinguish_reason() {
        let unreachable = ConvergenceError::OutOfReach {
            target: Target::new(400.0, 0.0),
            distance: 400.0,
            min_reach: 0.0,
            max_reach: 240.0,
        };
        let stuck = ConvergenceError::IterationLimit {
            target: Target::new(100.0, 0.0),
            iterations: 150,
            residual: 3.5,
        };
        assert!(unreachable.to_string().contains("out of reach"));
        assert!(stuck.to_string().contains("singularity"));
        assert!(stuck.to_string().contains("150 iterations"));
        assert!(unreachable.is_out_of_reach());
        assert!(!stuck.is_out_of_reach());
        assert_eq!(stuck.target(), &Target::new(100.0, 0.0));
    }
}
