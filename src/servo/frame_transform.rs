// Licensed under the EUPL-1.2-or-later

//! Contains the re-expression of twist commands in the planning frame.

use crate::control_types::TwistCommand;
use crate::diagnostics::ThrottledWarnings;
use crate::exception::ServoResult;
use crate::kinematics::KinematicState;

/// Re-expresses `cmd` in the planning frame.
///
/// A command without a frame is taken to be in the planning frame already; a
/// throttled warning is emitted instead of failing. Otherwise the transform
/// `(base -> planning)^-1 * (base -> cmd.frame)` is computed from current
/// forward kinematics and its rotational part is applied to both velocity
/// vectors (`v' = R * v`, `w' = R * w`; translation does not affect velocity
/// direction). The command's frame field is rewritten to the planning frame.
///
/// # Errors
/// * UnknownFrame if the command names a frame the kinematic state cannot
///   resolve.
pub fn transform_twist_to_planning_frame(
    cmd: &mut TwistCommand,
    planning_frame: &str,
    current_state: &dyn KinematicState,
    warnings: &mut ThrottledWarnings,
) -> ServoResult<()> {
    let frame = match &cmd.frame {
        Some(frame) => frame.clone(),
        None => {
            warnings.warn("No frame specified for command, will use planning frame");
            cmd.frame = Some(planning_frame.to_string());
            return Ok(());
        }
    };

    let tf_planning_to_cmd_frame = current_state
        .global_link_transform(planning_frame)?
        .inverse()
        * current_state.global_link_transform(&frame)?;

    let rotation = tf_planning_to_cmd_frame.rotation;
    cmd.linear = rotation * cmd.linear;
    cmd.angular = rotation * cmd.angular;
    cmd.frame = Some(planning_frame.to_string());
    Ok(())
}
