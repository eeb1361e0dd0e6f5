// Licensed under the EUPL-1.2-or-later

//! Contains the seam between the servo core and the robot's kinematic model.

use crate::exception::ServoResult;
use nalgebra::{DMatrix, DVector, Isometry3};

/// Access to the robot's current kinematic configuration.
///
/// The control loop owns exactly one implementation and hands it to the servo
/// components by reference for the duration of a cycle; it must stay valid
/// (and not be mutated elsewhere) until the cycle completes. The singularity
/// guard additionally needs a disposable copy for its look-ahead probe,
/// obtained through [`probe_copy`](`KinematicState::probe_copy`), so the probe
/// can never leak a perturbed state back into the control loop.
pub trait KinematicState {
    /// Current joint positions of the given group, in the group's joint order.
    fn joint_positions(&self, group: &str) -> ServoResult<DVector<f64>>;

    /// Overwrites the joint positions of the given group.
    fn set_joint_positions(&mut self, group: &str, positions: &DVector<f64>) -> ServoResult<()>;

    /// Jacobian of the given group at the current joint positions, with one
    /// row per twist dimension and one column per joint.
    fn jacobian(&self, group: &str) -> ServoResult<DMatrix<f64>>;

    /// Rigid transform from the base frame to the named frame, derived from
    /// current forward kinematics.
    fn global_link_transform(&self, frame: &str) -> ServoResult<Isometry3<f64>>;

    /// An isolated, independently owned copy of this state. Mutations of the
    /// copy are never visible through `self`.
    fn probe_copy(&self) -> Box<dyn KinematicState>;
}
