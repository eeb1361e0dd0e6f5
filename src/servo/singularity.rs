// Licensed under the EUPL-1.2-or-later

//! Contains the singularity guard: condition-number monitoring of the live
//! Jacobian and the velocity scaling derived from it.

use crate::config::ServoConfig;
use crate::control_types::ServoStatus;
use crate::diagnostics::ThrottledWarnings;
use crate::exception::ServoResult;
use crate::kinematics::KinematicState;
use nalgebra::{DMatrix, DVector, Vector6, SVD};

/// Singular values below this are treated as zero when inverting.
static PSEUDO_INVERSE_EPS: f64 = 1e-10;
/// The look-ahead probe steps along the singular direction scaled down by
/// this divisor.
static LOOKAHEAD_STEP_DIVISOR: f64 = 100.0;

/// Singular value decomposition of a Jacobian together with its
/// Moore-Penrose pseudo-inverse.
///
/// The decomposition always carries the left singular vectors, so the
/// singularity guard can read the singular direction without a fallible
/// lookup.
pub struct JacobianDecomposition {
    u: DMatrix<f64>,
    singular_values: DVector<f64>,
    pseudo_inverse: DMatrix<f64>,
}

impl JacobianDecomposition {
    pub fn new(jacobian: &DMatrix<f64>) -> Self {
        let svd = SVD::new(jacobian.clone(), true, true);
        let u = svd.u.expect("SVD requested with U");
        let v_t = svd.v_t.expect("SVD requested with V");
        let singular_values = svd.singular_values;
        let mut sigma_inverse = DMatrix::zeros(singular_values.len(), singular_values.len());
        for (i, &sigma) in singular_values.iter().enumerate() {
            if sigma > PSEUDO_INVERSE_EPS {
                sigma_inverse[(i, i)] = 1.0 / sigma;
            }
        }
        let pseudo_inverse = v_t.transpose() * sigma_inverse * u.transpose();
        JacobianDecomposition {
            u,
            singular_values,
            pseudo_inverse,
        }
    }

    /// Left singular vectors, one column per singular value, largest first.
    pub fn u(&self) -> &DMatrix<f64> {
        &self.u
    }

    pub fn pseudo_inverse(&self) -> &DMatrix<f64> {
        &self.pseudo_inverse
    }

    /// Ratio of largest to smallest singular value. A (near-)zero smallest
    /// singular value yields +inf, which the guard handles through its normal
    /// halt branch; it is not an error.
    pub fn condition_number(&self) -> f64 {
        let sigma_min = self.singular_values[self.singular_values.len() - 1];
        if sigma_min <= 0. {
            return f64::INFINITY;
        }
        self.singular_values[0] / sigma_min
    }
}

/// Calculates a velocity scaling factor from the proximity of the current
/// Jacobian to a singularity and the direction of the commanded motion.
///
/// The scaling is piecewise in the condition number `c`: full speed up to
/// `lower_singularity_threshold`, a linear ramp down to zero between that and
/// the branch-dependent upper threshold, and a full halt at or beyond it.
/// Motion away from the singularity is granted a wider band (the
/// threshold gap scaled by the leaving multiplier) so the arm can escape
/// faster than it is allowed to approach.
///
/// The probe state obtained from `current_state` is discarded after use; the
/// caller-visible state is never mutated. A throttled warning is emitted
/// whenever the returned status is not [`ServoStatus::NoWarning`].
///
/// # Errors
/// * UnknownGroup if `group` is not known to the kinematic state.
pub fn velocity_scaling_factor_for_singularity(
    group: &str,
    commanded_twist: &Vector6<f64>,
    decomposition: &JacobianDecomposition,
    config: &ServoConfig,
    warnings: &mut ThrottledWarnings,
    current_state: &dyn KinematicState,
) -> ServoResult<(f64, ServoStatus)> {
    // The last column of U points directly toward or away from the nearest
    // singularity. Its sign can flip between evaluations (R. Bro, "Resolving
    // the Sign Ambiguity in the Singular Value Decomposition"), so look ahead
    // along the candidate direction and keep the sign under which the
    // Jacobian's condition worsens.
    let u = decomposition.u();
    let mut vector_toward_singularity = u.column(u.ncols() - 1).into_owned();
    let ini_condition = decomposition.condition_number();

    let delta_x = &vector_toward_singularity / LOOKAHEAD_STEP_DIVISOR;
    let mut probe_state = current_state.probe_copy();
    let mut new_theta = probe_state.joint_positions(group)?;
    new_theta += decomposition.pseudo_inverse() * delta_x;
    probe_state.set_joint_positions(group, &new_theta)?;
    let new_condition =
        JacobianDecomposition::new(&probe_state.jacobian(group)?).condition_number();
    if ini_condition >= new_condition {
        vector_toward_singularity.neg_mut();
    }

    // Positive dot product: the commanded motion approaches the singularity.
    let approaching = vector_toward_singularity.dot(commanded_twist) > 0.;
    let lower_threshold = config.lower_singularity_threshold;
    let upper_threshold = if approaching {
        config.hard_stop_singularity_threshold
    } else {
        (config.hard_stop_singularity_threshold - lower_threshold)
            * config.leaving_singularity_threshold_multiplier
            + lower_threshold
    };

    let mut velocity_scale = 1.;
    let mut status = ServoStatus::NoWarning;
    if ini_condition > lower_threshold && ini_condition < upper_threshold {
        velocity_scale =
            1. - (ini_condition - lower_threshold) / (upper_threshold - lower_threshold);
        status = if approaching {
            ServoStatus::DecelerateForApproachingSingularity
        } else {
            ServoStatus::DecelerateForLeavingSingularity
        };
        warnings.warn(&status.to_string());
    } else if ini_condition >= upper_threshold {
        velocity_scale = 0.;
        status = ServoStatus::HaltForSingularity;
        warnings.warn(&status.to_string());
    }

    Ok((velocity_scale, status))
}
