extern crate nalgebra as na;

use na::{Matrix2x3, Matrix3x2, Vector2};
use na::linalg::SVD;
use crate::kinematic_traits::Joints;
use crate::kinematics_impl::{compute_kinematics, KinematicSnapshot, PlanarKinematics};
use crate::utils::vector3_to_joints;

/// Singular values below this fraction of the largest one are treated as zero
/// when computing the pseudoinverse.
pub const PINV_RCOND: f64 = 1e-12;

/// Struct representing the planar position Jacobian
pub struct Jacobian {
    /// A 2x3 matrix representing the Jacobian
    ///
    /// The Jacobian matrix maps the joint velocities to the end-effector velocity in the plane.
    /// Each column corresponds to a joint, the rows are the X and Y components of the
    /// end-effector linear velocity.
    matrix: Matrix2x3<f64>,
}

impl Jacobian {
    /// Constructs a new Jacobian struct by computing the Jacobian matrix for the given robot and joint configuration
    ///
    /// # Arguments
    ///
    /// * `robot` - The planar arm
    /// * `qs` - A reference to the joint configuration
    ///
    /// # Returns
    ///
    /// A new instance of `Jacobian`
    pub fn new(robot: &PlanarKinematics, qs: &Joints) -> Self {
        let matrix = jacobian_from_snapshot(&robot.snapshot(qs));
        Self { matrix }
    }

    pub fn matrix(&self) -> &Matrix2x3<f64> {
        &self.matrix
    }

    /// Singular values of the Jacobian.
    pub fn singular_values(&self) -> Vector2<f64> {
        self.matrix.singular_values()
    }

    /// Moore-Penrose pseudoinverse, computed by SVD. Unlike the direct inverse, this
    /// also exists when the Jacobian loses rank at the workspace boundary or in a singularity.
    pub fn pseudo_inverse(&self) -> Result<Matrix3x2<f64>, &'static str> {
        pseudo_inverse(&self.matrix)
    }

    /// Computes the joint velocities required to achieve a desired end-effector velocity
    ///
    /// # Arguments
    ///
    /// * `desired_end_effector_velocity` - planar linear velocity of the end-effector
    ///
    /// # Returns
    ///
    /// `Result<Joints, &'static str>` - Joint values, representing joint velocities rather than angles,
    /// or an error message if the computation fails. As the arm is redundant, this is the
    /// least norm solution.
    pub fn velocities(&self, desired_end_effector_velocity: &Vector2<f64>) -> Result<Joints, &'static str> {
        let jacobian_pseudoinverse = self.pseudo_inverse()?;
        Ok(vector3_to_joints(jacobian_pseudoinverse * desired_end_effector_velocity))
    }
}

/// Pseudoinverse of the 2x3 matrix with the relative cut-off PINV_RCOND.
pub fn pseudo_inverse(matrix: &Matrix2x3<f64>) -> Result<Matrix3x2<f64>, &'static str> {
    let svd = SVD::new(*matrix, true, true);
    let cutoff = PINV_RCOND * svd.singular_values.max();
    svd.pseudo_inverse(cutoff)
        .map_err(|_| "Unable to compute the pseudoinverse of the Jacobian matrix")
}

/// Function to compute the geometric Jacobian for a given joint configuration
///
/// # Arguments
///
/// * `qs` - A reference to the joint configuration
/// * `l1`, `l2`, `l3` - link lengths
///
/// # Returns
///
/// A 2x3 matrix, column i being the planar velocity of the end-effector
/// when only joint i rotates at unit speed.
pub fn geometric_jacobian(qs: &Joints, l1: f64, l2: f64, l3: f64) -> Matrix2x3<f64> {
    jacobian_from_snapshot(&compute_kinematics(qs, l1, l2, l3))
}

/// Builds the Jacobian columns z(i-1) x (p3 - p(i-1)) and keeps only the X and Y rows.
pub fn jacobian_from_snapshot(snapshot: &KinematicSnapshot) -> Matrix2x3<f64> {
    let tip = snapshot.end_effector();
    let columns: [Vector2<f64>; 3] = std::array::from_fn(|i| {
        let jv = snapshot.axes[i].cross(&(tip - snapshot.positions[i]));
        Vector2::new(jv.x, jv.y)
    });
    Matrix2x3::from_columns(&columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematic_traits::Kinematics;
    use crate::parameters::planar_arm::Parameters;

    const EPSILON: f64 = 1e-6;

    fn assert_matrix_approx_eq(left: &Matrix2x3<f64>, right: &Matrix2x3<f64>, epsilon: f64) {
        for i in 0..2 {
            for j in 0..3 {
                assert!((left[(i, j)] - right[(i, j)]).abs() < epsilon, "left[{0},{1}] = {2} is not approximately equal to right[{0},{1}] = {3}", i, j, left[(i, j)], right[(i, j)]);
            }
        }
    }

    #[test]
    fn test_stretched_arm_jacobian() {
        let jacobian = geometric_jacobian(&[0.0; 3], 100.0, 80.0, 60.0);
        let expected = Matrix2x3::new(
            0.0, 0.0, 0.0,
            240.0, 140.0, 60.0,
        );
        assert_matrix_approx_eq(&jacobian, &expected, EPSILON);
    }

    #[test]
    fn test_matches_numeric_derivative() {
        let robot = PlanarKinematics::new(Parameters::demo_arm());
        let qs = [0.4, -1.1, 0.7];
        let analytic = Jacobian::new(&robot, &qs);
        let step = 1e-7;

        let base = robot.forward(&qs).translation.vector;
        let mut numeric = Matrix2x3::zeros();
        for i in 0..3 {
            let mut perturbed = qs;
            perturbed[i] += step;
            let delta = (robot.forward(&perturbed).translation.vector - base) / step;
            numeric[(0, i)] = delta.x;
            numeric[(1, i)] = delta.y;
        }
        // Derivative of a 240 unit long arm, finite difference is accurate to about 1e-4
        assert_matrix_approx_eq(analytic.matrix(), &numeric, 1e-3);
    }

    #[test]
    fn test_pseudo_inverse_of_full_rank() {
        let robot = PlanarKinematics::new(Parameters::demo_arm());
        let jacobian = Jacobian::new(&robot, &[0.2, 0.9, -0.6]);
        let pinv = jacobian.pseudo_inverse().expect("pseudoinverse must exist");
        let identity = jacobian.matrix() * pinv;
        assert!((identity - na::Matrix2::identity()).norm() < EPSILON);
    }

    #[test]
    fn test_pseudo_inverse_of_singular() {
        // Stretched arm: the Jacobian has rank one, the pseudoinverse must still exist
        // and only move the arm sideways.
        let robot = PlanarKinematics::new(Parameters::demo_arm());
        let jacobian = Jacobian::new(&robot, &[0.0; 3]);
        let pinv = jacobian.pseudo_inverse().expect("pseudoinverse of singular matrix");
        assert!(pinv.iter().all(|v| v.is_finite()));

        let along = pinv * Vector2::new(1.0, 0.0);
        assert!(along.norm() < EPSILON, "No joint motion moves the stretched arm along itself");

        let sideways = pinv * Vector2::new(0.0, 1.0);
        let row = Matrix2x3::new(0.0, 0.0, 0.0, 240.0, 140.0, 60.0);
        let produced = row * sideways;
        assert!((produced - Vector2::new(0.0, 1.0)).norm() < EPSILON);
    }

    #[test]
    fn test_velocities() {
        let robot = PlanarKinematics::new(Parameters::unit_arm());
        let qs = [0.3, 0.8, -0.5];
        let jacobian = Jacobian::new(&robot, &qs);
        let desired = Vector2::new(0.25, -0.5);
        let joint_velocities = jacobian.velocities(&desired).expect("velocities");

        let achieved = jacobian.matrix() * crate::utils::joints_to_vector3(joint_velocities);
        assert!((achieved - desired).norm() < EPSILON);
    }
}
