// Licensed under the EUPL-1.2-or-later

//! Contains the per-cycle servo components.
//!
//! One control-loop tick consumes them in sequence: the frame transform
//! re-expresses the incoming twist in the planning frame, the caller maps the
//! twist through the Jacobian's pseudo-inverse into a joint delta, the
//! singularity guard scales the commanded motion, and the joint update
//! produces the next joint state. The Cartesian delta conversion is an
//! independent, stateless utility for callers that command pose deltas
//! instead of twists.

pub mod cartesian_delta;
pub mod frame_transform;
pub mod joint_update;
pub mod singularity;
pub mod smoothing;

#[cfg(test)]
mod tests {
    use crate::config::ServoConfig;
    use crate::control_types::{JointStateSnapshot, ServoStatus, TwistCommand};
    use crate::diagnostics::{ThrottledWarnings, DEFAULT_THROTTLE_PERIOD};
    use crate::kinematics::test_state::{SyntheticState, GROUP};
    use crate::kinematics::KinematicState;
    use crate::servo::frame_transform::transform_twist_to_planning_frame;
    use crate::servo::joint_update::apply_joint_update;
    use crate::servo::singularity::{
        velocity_scaling_factor_for_singularity, JacobianDecomposition,
    };
    use crate::servo::smoothing::{LowPassSmoother, SmoothingFilter, DEFAULT_CUTOFF_FREQUENCY};
    use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
    use std::f64::consts::FRAC_PI_2;

    const PLANNING_FRAME: &str = "base_link";

    #[test]
    fn full_cycle_near_singularity() {
        let config = ServoConfig {
            lower_singularity_threshold: 10.,
            hard_stop_singularity_threshold: 20.,
            leaving_singularity_threshold_multiplier: 2.,
            publish_period: 0.034,
        };
        config.validate().unwrap();

        // Condition number 15 sits halfway into the deceleration band.
        let state = SyntheticState::with_condition_number(15.)
            .with_transform(PLANNING_FRAME, Isometry3::identity())
            .with_transform(
                "tool0",
                Isometry3::from_parts(
                    Translation3::new(0.3, 0., 0.5),
                    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
                ),
            );

        // The command rotates about z in the tool frame, which keeps its
        // angular part aligned with the synthetic singular direction.
        let mut cmd = TwistCommand::new(
            Vector3::zeros(),
            Vector3::new(0., 0., 1.),
            Some("tool0".to_string()),
        );
        let mut warnings = ThrottledWarnings::new(DEFAULT_THROTTLE_PERIOD);
        transform_twist_to_planning_frame(&mut cmd, PLANNING_FRAME, &state, &mut warnings)
            .unwrap();
        assert_eq!(cmd.frame.as_deref(), Some(PLANNING_FRAME));

        let decomposition = JacobianDecomposition::new(&state.jacobian(GROUP).unwrap());
        let (scale, status) = velocity_scaling_factor_for_singularity(
            GROUP,
            &cmd.to_vector(),
            &decomposition,
            &config,
            &mut warnings,
            &state,
        )
        .unwrap();
        assert_eq!(status, ServoStatus::DecelerateForApproachingSingularity);
        assert!((scale - 0.5).abs() < 1e-6);

        let delta_theta =
            decomposition.pseudo_inverse() * (cmd.to_vector() * scale * config.publish_period);
        let previous = JointStateSnapshot::zeros(6);
        let mut next = previous.clone();
        let mut smoother = LowPassSmoother::new(config.publish_period, DEFAULT_CUTOFF_FREQUENCY);
        smoother.reset(&previous.position);

        apply_joint_update(
            &delta_theta,
            &previous,
            &mut next,
            &mut smoother,
            config.publish_period,
        )
        .unwrap();

        // Only the last joint moves for this twist, scaled down by the guard.
        for i in 0..5 {
            assert!(next.position[i].abs() < 1e-12);
        }
        assert!(next.position[5] > 0.);
        assert!(next.velocity[5] > 0.);
    }
}
