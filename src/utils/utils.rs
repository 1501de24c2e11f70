//! Helper functions

use std::f64::consts::PI;
use crate::kinematic_traits::Joints;
use crate::lspb::TrajectorySample;
use nalgebra::Vector3;

/// Checks the joint values for validity.
pub(crate) mod planar_arm {
    use crate::kinematic_traits::Joints;

    /// Checks if all elements in the array are finite
    pub fn is_valid(qs: &Joints) -> bool {
        qs.iter().all(|&q| q.is_finite())
    }
}

/// Signed difference between two angles, reduced modulo full turn into (-PI, PI].
pub fn shortest_rotation(from: f64, to: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let wrapped = (to - from + PI).rem_euclid(two_pi) - PI;
    // rem_euclid leaves [-PI, PI), the lower end is the same rotation as PI
    if wrapped <= -PI { PI } else { wrapped }
}

/// Re-express every angle as the equivalent closest to the corresponding reference angle,
/// so that moving from reference to the result never takes more than half a turn per joint.
pub fn closest_equivalent(angles: &Joints, reference: &Joints) -> Joints {
    std::array::from_fn(|i| reference[i] + shortest_rotation(reference[i], angles[i]))
}

/// Print the trajectory as table, one row per sample. Angles stay in radians.
pub fn dump_trajectory(samples: &[TrajectorySample]) {
    if samples.is_empty() {
        println!("No samples");
    }
    println!("{}", trajectory_header().join(" "));
    for sample in samples {
        let row_str: Vec<String> = sample.to_row().iter().map(|v| format!("{:9.4}", v)).collect();
        println!("{}", row_str.join(" "));
    }
}

/// Column names matching TrajectorySample::to_row
pub fn trajectory_header() -> [&'static str; 10] {
    ["time", "q1", "v1", "a1", "q2", "v2", "a2", "q3", "v3", "a3"]
}

/// Converts ```nalgebra::Vector3<f64>``` to Joints ([f64; 3])
pub fn vector3_to_joints(v: Vector3<f64>) -> Joints {
    [v[0], v[1], v[2]]
}

/// Converts ```Joints ([f64; 3])``` to a ```Vector3<f64>```
pub fn joints_to_vector3(j: Joints) -> Vector3<f64> {
    Vector3::new(j[0], j[1], j[2])
}

#[cfg(test)]
mod tests {
    use super::planar_arm::*;
    use super::*;

    #[test]
    fn test_is_valid_with_all_finite() {
        let qs = [0.0, 1.0, PI];
        assert!(is_valid(&qs));
    }

    #[test]
    fn test_is_valid_with_nan() {
        let qs = [0.0, f64::NAN, 1.0];
        assert!(!is_valid(&qs));
    }

    #[test]
    fn test_is_valid_with_infinity() {
        let qs = [0.0, f64::INFINITY, 1.0];
        assert!(!is_valid(&qs));
    }

    #[test]
    fn test_shortest_rotation_range() {
        for k in -40..=40 {
            let to = k as f64 * 0.37;
            let d = shortest_rotation(0.25, to);
            assert!(d > -PI && d <= PI, "{} out of range for {}", d, to);
            // Same direction modulo full turn
            let turns = (to - 0.25 - d) / (2.0 * PI);
            assert!((turns - turns.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_half_turn_is_positive() {
        assert!((shortest_rotation(0.0, PI) - PI).abs() < 1e-12);
        assert!((shortest_rotation(0.0, -PI) - PI).abs() < 1e-12);
        assert!((shortest_rotation(0.0, 3.0 * PI) - PI).abs() < 1e-9);
    }

    #[test]
    fn test_closest_equivalent() {
        let reference = [0.1, 4.0 * PI + 0.2, -0.3];
        let angles = [0.1 + 2.0 * PI, 0.3, -0.3 - 6.0 * PI + 0.5];
        let result = closest_equivalent(&angles, &reference);
        assert!((result[0] - 0.1).abs() < 1e-9);
        assert!((result[1] - (4.0 * PI + 0.3)).abs() < 1e-9);
        assert!((result[2] - 0.2).abs() < 1e-9);
    }
}
