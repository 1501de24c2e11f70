//! Defines the planar arm parameter data structure

pub mod planar_arm {
    use crate::kinematic_traits::Target;

    /// Link lengths of the planar arm with three revolute joints.
    /// See [`Parameters::demo_arm`] and [`Parameters::unit_arm`] for presets.
    /// ```
    /// use rs_planar_kinematics::parameters::planar_arm::Parameters;
    ///
    /// let arm = Parameters { l2: 50.0, ..Parameters::demo_arm() };
    /// assert_eq!(arm.lengths(), [100.0, 50.0, 60.0]);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// The length of the first link (from the base joint to joint 2).
        pub l1: f64,

        /// The length of the second link (from joint 2 to joint 3).
        pub l2: f64,

        /// The length of the third link (from joint 3 to the end-effector).
        pub l3: f64,
    }

    impl Parameters {
        /// Link lengths as array, indexed the same way as joints.
        pub fn lengths(&self) -> [f64; 3] {
            [self.l1, self.l2, self.l3]
        }

        /// Distance to the end-effector when the arm is fully stretched.
        pub fn max_reach(&self) -> f64 {
            self.l1 + self.l2 + self.l3
        }

        /// Radius of the inner hole of the workspace. It is only non-zero if one link
        /// is longer than the two others together.
        pub fn min_reach(&self) -> f64 {
            let longest = self.l1.max(self.l2).max(self.l3);
            (2.0 * longest - self.max_reach()).max(0.0)
        }

        /// Checks if the target is within the annulus the end-effector can sweep.
        pub fn reachable(&self, target: &Target) -> bool {
            let distance = target.norm();
            distance <= self.max_reach() && distance >= self.min_reach()
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            format!(
                "planar_arm_link_lengths:\n  \
              l1: {}\n  \
              l2: {}\n  \
              l3: {}\n",
                self.l1, self.l2, self.l3
            )
        }
    }
}
