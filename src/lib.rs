//! Rust implementation of inverse kinematics and joint trajectory generation for a planar arm
//! with three revolute joints.
//!
//! Given the current joint angles and the desired end-effector position in the plane, the
//! crate finds the joint angles that reach the target and produces a sampled, smooth motion
//! towards them.
//!
//! # Features
//!
//! - Forward kinematics from planar Denavit-Hartenberg link transforms.
//! - Geometric Jacobian, built from the joint axes and frame origins by cross products.
//! - Iterative inverse kinematics with the SVD pseudoinverse of the Jacobian. The solver does
//!   not break down when the Jacobian loses rank (stretched or folded arm).
//! - The solved angles are the closest equivalents of the current ones, so the trajectory
//!   never turns a joint more than half a turn.
//! - Trajectories with linear segments and parabolic blends (trapezoidal velocity), continuous in
//!   position and velocity, sampled at fixed intervals.
//! - Link lengths and complete motion requests can be read from YAML files
//!   (feature `allow_filesystem`), independent requests can be planned in parallel
//!   (feature `parallel`).
//!
//! # Parameters
//!
//! The arm is described by three link lengths (_l1, l2, l3_). All joints rotate about the Z axis
//! of the base; at zero angles all links point along the base X axis. Only the X and Y position
//! of the end-effector is solved for, its orientation is free.
//!
//! ```
//! use rs_planar_kinematics::kinematic_traits::{Kinematics, Target};
//! use rs_planar_kinematics::kinematics_impl::PlanarKinematics;
//! use rs_planar_kinematics::lspb::generate_trajectory;
//! use rs_planar_kinematics::parameters::planar_arm::Parameters;
//!
//! let robot = PlanarKinematics::new(Parameters::demo_arm());
//! let current = [0.0, 0.0, 0.0];
//! let goal = robot.inverse_continuing(&Target::new(150.0, 100.0), &current)
//!     .expect("target is reachable");
//! let trajectory = generate_trajectory(&current, &goal, 2.5, 0.05);
//! assert_eq!(trajectory.len(), 51);
//! ```

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod jacobian;

pub mod ik_solver;

#[path = "path_plan/lspb.rs"]
pub mod lspb;

pub mod motion_planner;

pub mod convergence_error;
pub mod parameter_error;

#[cfg(test)]
mod tests;
