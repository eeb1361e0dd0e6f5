// Licensed under the EUPL-1.2-or-later

//! Contains the command and state types exchanged with the servo core.

use nalgebra::{Vector3, Vector6};
use std::fmt;

/// Commanded end-effector velocity, expressed in a named reference frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TwistCommand {
    /// Linear velocity in m/s.
    pub linear: Vector3<f64>,
    /// Angular velocity in rad/s.
    pub angular: Vector3<f64>,
    /// Reference frame of the command. `None` means unspecified; the frame
    /// resolver substitutes the planning frame and warns.
    pub frame: Option<String>,
}

impl TwistCommand {
    pub fn new(linear: Vector3<f64>, angular: Vector3<f64>, frame: Option<String>) -> Self {
        TwistCommand {
            linear,
            angular,
            frame,
        }
    }

    /// Stacks the command into a 6-vector, linear components first.
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.linear.x,
            self.linear.y,
            self.linear.z,
            self.angular.x,
            self.angular.y,
            self.angular.z,
        )
    }
}

/// Ordered joint positions and velocities, one entry per controlled joint,
/// indexed consistently with the kinematic state's joint ordering.
///
/// The control loop keeps two snapshots per cycle: the previous one (one full
/// cycle behind) and the next one being produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JointStateSnapshot {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
}

impl JointStateSnapshot {
    /// Creates a snapshot with all positions and velocities set to zero.
    pub fn zeros(len: usize) -> Self {
        JointStateSnapshot {
            position: vec![0.; len],
            velocity: vec![0.; len],
        }
    }
}

/// Outcome of the singularity guard for one cycle.
///
/// Produced fresh each cycle; it carries no history across cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServoStatus {
    NoWarning,
    DecelerateForApproachingSingularity,
    DecelerateForLeavingSingularity,
    HaltForSingularity,
}

impl fmt::Display for ServoStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServoStatus::NoWarning => {
                write!(f, "No warnings")
            }
            ServoStatus::DecelerateForApproachingSingularity => {
                write!(f, "Moving closer to a singularity, decelerating")
            }
            ServoStatus::DecelerateForLeavingSingularity => {
                write!(f, "Moving away from a singularity, decelerating")
            }
            ServoStatus::HaltForSingularity => {
                write!(f, "Very close to a singularity, emergency stop")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twist_to_vector_stacks_linear_then_angular() {
        let cmd = TwistCommand::new(
            Vector3::new(1., 2., 3.),
            Vector3::new(4., 5., 6.),
            Some("base_link".to_string()),
        );
        let v = cmd.to_vector();
        assert_eq!(v.as_slice(), &[1., 2., 3., 4., 5., 6.]);
    }

    #[test]
    fn status_messages() {
        assert_eq!(
            ServoStatus::HaltForSingularity.to_string(),
            "Very close to a singularity, emergency stop"
        );
        assert_eq!(
            ServoStatus::DecelerateForApproachingSingularity.to_string(),
            "Moving closer to a singularity, decelerating"
        );
    }
}
