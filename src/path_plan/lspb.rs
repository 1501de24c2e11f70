//! Joint space trajectories with linear segments and parabolic blends (LSPB).
//!
//! Every joint moves independently along a trapezoidal velocity profile: constant
//! acceleration for the first third of the time, constant velocity in the middle third and
//! constant deceleration in the last third. Position and velocity are continuous, the
//! acceleration jumps only at the two blend boundaries. All joints start and stop together.

use crate::kinematic_traits::Joints;

/// Joints whose start and goal differ less than this are kept still.
pub const STATIONARY_TOLERANCE: f64 = 1e-5;

/// Position, velocity and acceleration of a single joint at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointState {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

/// One row of the sampled trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    /// Time since the start of the motion, seconds.
    pub time: f64,

    /// State of each of the three joints.
    pub joints: [JointState; 3],
}

impl TrajectorySample {
    /// Joint positions only.
    pub fn positions(&self) -> Joints {
        self.joints.map(|joint| joint.position)
    }

    /// Flattens into time followed by position, velocity and acceleration of every joint.
    pub fn to_row(&self) -> [f64; 10] {
        let mut row = [0.0; 10];
        row[0] = self.time;
        for (i, joint) in self.joints.iter().enumerate() {
            row[1 + 3 * i] = joint.position;
            row[2 + 3 * i] = joint.velocity;
            row[3 + 3 * i] = joint.acceleration;
        }
        row
    }
}

/// Part of the profile the joint is in at the given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start and goal are the same, the joint does not move.
    Stationary,
    Accelerating,
    Cruising,
    Decelerating,
}

/// LSPB profile of a single joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LspbProfile {
    start: f64,
    goal: f64,
    total_time: f64,
    blend_time: f64,
    acceleration: f64,
    stationary: bool,
}

impl LspbProfile {
    /// Profile moving from start to goal in total_time, blend phases taking a third of it each.
    pub fn new(start: f64, goal: f64, total_time: f64) -> Self {
        let blend_time = total_time / 3.0;
        let stationary = (goal - start).abs() <= STATIONARY_TOLERANCE;
        let acceleration = if stationary {
            0.0
        } else {
            (goal - start) / (blend_time * (total_time - blend_time))
        };
        LspbProfile {
            start,
            goal,
            total_time,
            blend_time,
            acceleration,
            stationary,
        }
    }

    pub fn blend_time(&self) -> f64 {
        self.blend_time
    }

    /// Signed constant acceleration of the first blend (zero if stationary).
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Signed velocity of the cruising phase (zero if stationary).
    pub fn peak_velocity(&self) -> f64 {
        self.acceleration * self.blend_time
    }

    pub fn phase(&self, t: f64) -> Phase {
        if self.stationary {
            Phase::Stationary
        } else if t <= self.blend_time {
            Phase::Accelerating
        } else if t <= self.total_time - self.blend_time {
            Phase::Cruising
        } else {
            Phase::Decelerating
        }
    }

    /// Evaluates the profile at time t. Times past total_time continue the
    /// deceleration parabola.
    pub fn sample(&self, t: f64) -> JointState {
        let a = self.acceleration;
        let tb = self.blend_time;
        match self.phase(t) {
            Phase::Stationary => JointState {
                position: self.start,
                velocity: 0.0,
                acceleration: 0.0,
            },
            Phase::Accelerating => JointState {
                position: self.start + 0.5 * a * t * t,
                velocity: a * t,
                acceleration: a,
            },
            Phase::Cruising => JointState {
                position: self.start + a * tb * (t - tb / 2.0),
                velocity: self.peak_velocity(),
                acceleration: 0.0,
            },
            Phase::Decelerating => {
                let remaining = self.total_time - t;
                JointState {
                    position: self.goal - 0.5 * a * remaining * remaining,
                    velocity: a * remaining,
                    acceleration: -a,
                }
            }
        }
    }
}

/// Sampling instants 0, dt, 2dt, ... up to the first one not below total_time
/// (that may exceed total_time by less than dt).
pub fn sample_times(total_time: f64, dt: f64) -> Vec<f64> {
    let count = ((total_time + dt) / dt).ceil().max(0.0) as usize;
    (0..count).map(|k| k as f64 * dt).collect()
}

/// Generates the sampled trajectory from start to goal. Each joint follows its own LSPB
/// profile, all profiles share total_time. total_time and dt must be positive.
pub fn generate_trajectory(start: &Joints, goal: &Joints, total_time: f64, dt: f64) -> Vec<TrajectorySample> {
    let profiles: [LspbProfile; 3] =
        std::array::from_fn(|i| LspbProfile::new(start[i], goal[i], total_time));

    sample_times(total_time, dt)
        .into_iter()
        .map(|time| TrajectorySample {
            time,
            joints: profiles.map(|profile| profile.sample(time)),
        })
        .collect()
}
