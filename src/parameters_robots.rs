//! Hardcoded parameters for a few arms

pub mod planar_arm {
    use crate::parameters::planar_arm::Parameters;

    impl Parameters {
        /// The arm the web planner was drawing by default, lengths in display units.
        pub fn demo_arm() -> Self {
            Parameters {
                l1: 100.0,
                l2: 80.0,
                l3: 60.0,
            }
        }

        /// All links of the same unit length.
        pub fn unit_arm() -> Self {
            Parameters {
                l1: 1.0,
                l2: 1.0,
                l3: 1.0,
            }
        }
    }

    impl Default for Parameters {
        fn default() -> Self {
            Self::demo_arm()
        }
    }
}
