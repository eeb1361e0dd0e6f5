// Licensed under the EUPL-1.2-or-later

//! Contains the integration of joint-space deltas into the next joint state.

use crate::control_types::JointStateSnapshot;
use crate::exception::{ServoException, ServoResult};
use crate::servo::smoothing::SmoothingFilter;
use nalgebra::DVector;

/// Applies `delta_theta` to `next_state`, smooths the resulting positions and
/// recomputes the velocities by central difference against `previous_state`.
///
/// `previous_state` must be one full cycle behind `next_state`, i.e. velocity
/// is `(q(t + dt) - q(t - dt)) / (2 * dt)` with `dt = publish_period`. The
/// smoothing filter is invoked exactly once, on the whole position vector;
/// this is the only place jerk and noise suppression happens.
///
/// # Errors
/// * LengthMismatch if the vector sizes do not agree; `next_state` is left
///   untouched in that case.
pub fn apply_joint_update(
    delta_theta: &DVector<f64>,
    previous_state: &JointStateSnapshot,
    next_state: &mut JointStateSnapshot,
    smoother: &mut dyn SmoothingFilter,
    publish_period: f64,
) -> ServoResult<()> {
    // All the sizes must match before anything is mutated.
    if next_state.position.len() != delta_theta.len()
        || next_state.velocity.len() != next_state.position.len()
        || previous_state.position.len() != next_state.position.len()
    {
        return Err(ServoException::LengthMismatch {
            expected: next_state.position.len(),
            actual: delta_theta.len(),
        });
    }

    for (position, delta) in next_state.position.iter_mut().zip(delta_theta.iter()) {
        *position += delta;
    }

    smoother.smooth(&mut next_state.position);

    for i in 0..next_state.position.len() {
        next_state.velocity[i] =
            (next_state.position[i] - previous_state.position[i]) / (2. * publish_period);
    }

    Ok(())
}
