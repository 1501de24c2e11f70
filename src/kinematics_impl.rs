use crate::convergence_error::ConvergenceError;
use crate::ik_solver::{solve_ik_with, SolverConfig};
use crate::jacobian::Jacobian;
use crate::kinematic_traits::{Joints, Kinematics, Pose, Singularity, Target};
use crate::parameters::planar_arm::Parameters;
use nalgebra::{Translation3, UnitQuaternion, Vector3};

/// Ratio between the smallest and the largest singular value of the Jacobian
/// below which the arm is reported as singular.
const SINGULARITY_RATIO: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct PlanarKinematics {
    /// The parameters that were used to construct this solver.
    parameters: Parameters,
}

/// Positions of all frame origins and joint rotation axes, expressed in the base frame.
/// Derived entirely from the joint values and link lengths, never updated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicSnapshot {
    /// Base origin, joint 2, joint 3 and the end-effector.
    pub positions: [Vector3<f64>; 4],

    /// Rotation axes of joints 1, 2 and 3.
    pub axes: [Vector3<f64>; 3],
}

impl KinematicSnapshot {
    pub fn end_effector(&self) -> Vector3<f64> {
        self.positions[3]
    }
}

/// Transform of a single planar link: rotate by theta about Z, then move along the rotated X
/// by the link length.
pub fn dh_transform(theta: f64, a: f64) -> Pose {
    Pose::from_parts(
        Translation3::new(a * theta.cos(), a * theta.sin(), 0.0),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), theta),
    )
}

/// Computes the cumulative frames of the arm and extracts the frame origins and joint axes.
pub fn compute_kinematics(qs: &Joints, l1: f64, l2: f64, l3: f64) -> KinematicSnapshot {
    let t0_1 = dh_transform(qs[0], l1);
    let t0_2 = t0_1 * dh_transform(qs[1], l2);
    let t0_3 = t0_2 * dh_transform(qs[2], l3);

    let z = Vector3::z();
    KinematicSnapshot {
        positions: [
            Vector3::zeros(),
            t0_1.translation.vector,
            t0_2.translation.vector,
            t0_3.translation.vector,
        ],
        axes: [z, t0_1.rotation * z, t0_2.rotation * z],
    }
}

impl PlanarKinematics {
    /// Creates a new `PlanarKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        PlanarKinematics { parameters }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Frame origins and joint axes for the given joint values.
    pub fn snapshot(&self, qs: &Joints) -> KinematicSnapshot {
        let p = &self.parameters;
        compute_kinematics(qs, p.l1, p.l2, p.l3)
    }

    /// Planar (x, y) position of the end-effector.
    pub fn end_effector(&self, qs: &Joints) -> Target {
        let tip = self.snapshot(qs).end_effector();
        Target::new(tip.x, tip.y)
    }
}

impl Kinematics for PlanarKinematics {
    fn inverse_continuing(&self, target: &Target, previous: &Joints) -> Result<Joints, ConvergenceError> {
        solve_ik_with(self, previous, target, &SolverConfig::default())
    }

    fn forward(&self, qs: &Joints) -> Pose {
        let [_, _, tip] = self.forward_with_joint_poses(qs);
        tip
    }

    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 3] {
        let p = &self.parameters;
        let t0_1 = dh_transform(qs[0], p.l1);
        let t0_2 = t0_1 * dh_transform(qs[1], p.l2);
        let t0_3 = t0_2 * dh_transform(qs[2], p.l3);
        [t0_1, t0_2, t0_3]
    }

    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity> {
        let singular_values = Jacobian::new(self, qs).singular_values();
        let largest = singular_values.max();
        let smallest = singular_values.min();
        if largest <= 0.0 || smallest <= SINGULARITY_RATIO * largest {
            Some(Singularity::Aligned)
        } else {
            None
        }
    }
}
