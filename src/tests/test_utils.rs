use std::f64::consts::PI;

use anyhow::{ensure, Result};

use crate::kinematic_traits::{Joints, Target};
use crate::kinematics_impl::PlanarKinematics;
use crate::lspb::TrajectorySample;

/// Checks that the end-effector at the given joints is within tolerance of the target.
pub fn ensure_reaches(robot: &PlanarKinematics, joints: &Joints, target: &Target, tolerance: f64) -> Result<()> {
    let reached = robot.end_effector(joints);
    let distance = (reached - target).norm();
    ensure!(
        distance < tolerance,
        "joints {:?} reach ({:.4}, {:.4}), {:.4} away from the target ({:.4}, {:.4})",
        joints, reached.x, reached.y, distance, target.x, target.y
    );
    Ok(())
}

/// Checks that no joint rotates more than half a turn between the two configurations.
pub fn ensure_shortest_rotation(from: &Joints, to: &Joints) -> Result<()> {
    for i in 0..3 {
        let difference = to[i] - from[i];
        ensure!(
            difference > -PI && difference <= PI,
            "joint {} rotates by {:.4} rad from {:.4} to {:.4}",
            i + 1, difference, from[i], to[i]
        );
    }
    Ok(())
}

/// Checks sample times are increasing by dt, starting at zero.
pub fn ensure_time_ordered(samples: &[TrajectorySample], dt: f64) -> Result<()> {
    ensure!(!samples.is_empty(), "trajectory is empty");
    ensure!(samples[0].time == 0.0, "first sample at {}", samples[0].time);
    for pair in samples.windows(2) {
        let step = pair[1].time - pair[0].time;
        ensure!((step - dt).abs() < 1e-9, "step {} between {} and {}", step, pair[0].time, pair[1].time);
    }
    Ok(())
}
