// Licensed under the EUPL-1.2-or-later

//! # cartesian-servo-rs
//! cartesian-servo-rs is the real-time core of a Cartesian-velocity servo for
//! articulated robot arms. It converts a continuous stream of end-effector
//! velocity commands (twists) into safe joint-space motion increments inside
//! a fixed-period control loop, reacting to kinematic singularities by
//! scaling the commanded motion down to a full halt rather than failing loud.
//!
//! ## Design
//! The library is divided into four main modules:
//! * [kinematics](`crate::kinematics`) - the seam to the robot's kinematic
//!   model (joint positions, Jacobian, forward-kinematics transforms).
//! * [servo](`crate::servo`) - the per-cycle components: frame resolution,
//!   singularity guarding, joint-state integration, Cartesian delta
//!   conversion and command smoothing.
//! * [config](`crate::config`) - the session-immutable threshold
//!   configuration.
//! * [diagnostics](`crate::diagnostics`) - rate-limited warning emission.
//!
//! Each control-loop tick runs single-threaded and synchronous:
//! re-express the twist in the planning frame, map it through the Jacobian's
//! pseudo-inverse into a joint delta (done by the caller), scale it by the
//! singularity guard, and integrate it into the next joint state. The
//! kinematic state and the smoothing filter are the only data that persist
//! across cycles, and both are exclusively owned by the control loop.
//!
//! # Example:
//! ```
//! use nalgebra::DVector;
//! use servo::{
//!     apply_joint_update, JointStateSnapshot, LowPassSmoother, ServoResult, SmoothingFilter,
//! };
//!
//! fn main() -> ServoResult<()> {
//!     let publish_period = 0.034;
//!     let previous = JointStateSnapshot::zeros(6);
//!     let mut next = previous.clone();
//!     let mut smoother = LowPassSmoother::new(publish_period, 100.0);
//!     smoother.reset(&previous.position);
//!
//!     let delta_theta = DVector::from_element(6, 0.01);
//!     apply_joint_update(
//!         &delta_theta,
//!         &previous,
//!         &mut next,
//!         &mut smoother,
//!         publish_period,
//!     )?;
//!     assert!(next.velocity.iter().all(|v| *v > 0.));
//!     Ok(())
//! }
//! ```
//!
//! The singularity guard needs live kinematics, so its caller implements
//! [`KinematicState`](`crate::kinematics::KinematicState`) on top of the
//! robot model and passes the Jacobian wrapped in a
//! [`JacobianDecomposition`](`crate::servo::singularity::JacobianDecomposition`).
//! The returned scaling factor multiplies the commanded motion before it
//! reaches [`apply_joint_update`](`crate::servo::joint_update::apply_joint_update`);
//! a factor of zero suppresses the motion for this cycle while the loop keeps
//! running.

pub mod config;
pub mod control_types;
pub mod diagnostics;
pub mod exception;
pub mod kinematics;
pub mod servo;

pub use config::ServoConfig;
pub use control_types::{JointStateSnapshot, ServoStatus, TwistCommand};
pub use diagnostics::{Clock, MonotonicClock, ThrottledWarnings, DEFAULT_THROTTLE_PERIOD};
pub use exception::{ServoException, ServoResult};
pub use kinematics::KinematicState;
pub use servo::cartesian_delta::pose_from_cartesian_delta;
pub use servo::frame_transform::transform_twist_to_planning_frame;
pub use servo::joint_update::apply_joint_update;
pub use servo::singularity::{velocity_scaling_factor_for_singularity, JacobianDecomposition};
pub use servo::smoothing::{
    LowPassSmoother, SmoothingFilter, DEFAULT_CUTOFF_FREQUENCY, MAX_CUTOFF_FREQUENCY,
};
