// Licensed under the EUPL-1.2-or-later

//! Contains the conversion of Cartesian deltas into end-effector poses.

use crate::exception::{ServoException, ServoResult};
use nalgebra::{DVector, Isometry3, Translation3, UnitQuaternion, Vector3};

/// Computes the tip pose reached by applying a Cartesian delta to
/// `base_to_tip`.
///
/// `delta` holds 3 translation components in the base frame followed by 3
/// rotation components, applied as successive axis rotations (X, then Y, then
/// Z) composed into one rotation. The rotation acts about the translated
/// tip's own origin rather than the base origin, so the pose is assembled as
/// `T(p) * R * T(-p) * (translation * base_to_tip)` where `p` is the
/// translated tip position. Applying the rotation without re-centering on the
/// tip would produce a different pose whenever `p != 0`.
///
/// # Errors
/// * MalformedDelta if `delta` does not have exactly 6 entries.
pub fn pose_from_cartesian_delta(
    delta: &DVector<f64>,
    base_to_tip: &Isometry3<f64>,
) -> ServoResult<Isometry3<f64>> {
    if delta.len() != 6 {
        return Err(ServoException::MalformedDelta { len: delta.len() });
    }

    let translation_delta = Translation3::new(delta[0], delta[1], delta[2]);
    let rotation_delta = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), delta[3])
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), delta[4])
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), delta[5]);

    // Tip pose after the translation, before the new rotation.
    let tf_no_new_rot = translation_delta * *base_to_tip;

    let tip = Translation3::from(tf_no_new_rot.translation.vector);
    let tip_inverse = Translation3::from(-tf_no_new_rot.translation.vector);
    Ok(tip * rotation_delta * tip_inverse * tf_no_new_rot)
}
