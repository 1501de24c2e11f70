//! Defines the types and the trait shared by the planar arm kinematics

extern crate nalgebra as na;

use na::{Isometry3, Vector2};
use crate::convergence_error::ConvergenceError;

/// Pose is used for the frames of the arm. The arm is planar, but frames are kept
/// three dimensional so that the joint rotation axis (Z) can be tracked.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(100.0, 0.0, 0.0);
/// let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5);
/// let frame = Pose::from_parts(translation, rotation);
/// assert!((frame.translation.vector.x - 100.0).abs() < 1e-12);
/// ```
pub type Pose = Isometry3<f64>;

/// Three joint angles in radians, one per revolute joint, counted from the base.
/// No joint limits are modelled, any finite value is valid.
pub type Joints = [f64; 3];

/// Desired end-effector position (x, y) in the base frame, same units as link lengths.
pub type Target = Vector2<f64>;

/// For providing the starting point when no better guess is known.
/// All links point along the base X axis in this configuration.
pub const JOINTS_AT_ZERO: Joints = [0.0; 3];

/// Defines the singularity a planar arm may have.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Singularity {
    /// The Jacobian lost rank: all links are aligned (stretched out or folded back),
    /// so the end-effector cannot move along the line of the arm.
    Aligned,
}

pub trait Kinematics: Send + Sync {
    /// Find the joint angles that place the end-effector at the target, starting the
    /// iterative search from the previous joint positions. The returned angles are the
    /// closest equivalents of the previous ones, so no joint rotates more than half a turn.
    fn inverse_continuing(&self, target: &Target, previous: &Joints) -> Result<Joints, ConvergenceError>;

    /// Find the pose of the end-effector frame for the given joint positions.
    fn forward(&self, qs: &Joints) -> Pose;

    /// Cumulative frames of all three links, from the frame after joint 1 to
    /// the end-effector frame.
    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 3];

    /// Detect the singularity. Returns None if there is no singularity for the given
    /// joint values.
    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity>;
}
