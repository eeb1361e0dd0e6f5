// Licensed under the EUPL-1.2-or-later

//! Contains the session configuration of the servo core.

use crate::exception::{ServoException, ServoResult};
use serde::{Deserialize, Serialize};

/// Numeric thresholds of the servo core, supplied once per session and
/// immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServoConfig {
    /// Start decelerating when the Jacobian condition number exceeds this.
    pub lower_singularity_threshold: f64,
    /// Halt when the Jacobian condition number reaches this while approaching
    /// a singularity.
    pub hard_stop_singularity_threshold: f64,
    /// Widens the deceleration band for motion away from a singularity. The
    /// multiplier scales the gap between the two thresholds; the lower edge of
    /// the band always stays at `lower_singularity_threshold`.
    pub leaving_singularity_threshold_multiplier: f64,
    /// Control-cycle period in seconds.
    pub publish_period: f64,
}

impl Default for ServoConfig {
    fn default() -> Self {
        ServoConfig {
            lower_singularity_threshold: 17.0,
            hard_stop_singularity_threshold: 30.0,
            leaving_singularity_threshold_multiplier: 2.0,
            publish_period: 0.034,
        }
    }
}

impl ServoConfig {
    /// Checks the threshold ordering and signs.
    ///
    /// # Errors
    /// * InvalidConfiguration if `lower_singularity_threshold` is negative or
    ///   not below `hard_stop_singularity_threshold`, if the leaving
    ///   multiplier is below 1, or if the publish period is not positive and
    ///   finite.
    pub fn validate(&self) -> ServoResult<()> {
        if !(self.lower_singularity_threshold >= 0.
            && self.lower_singularity_threshold < self.hard_stop_singularity_threshold)
        {
            return Err(ServoException::InvalidConfiguration {
                message: format!(
                    "singularity thresholds must satisfy 0 <= lower < hard stop, got lower = {}, hard stop = {}",
                    self.lower_singularity_threshold, self.hard_stop_singularity_threshold
                ),
            });
        }
        if !(self.leaving_singularity_threshold_multiplier >= 1.) {
            return Err(ServoException::InvalidConfiguration {
                message: format!(
                    "leaving-singularity multiplier must be >= 1, got {}",
                    self.leaving_singularity_threshold_multiplier
                ),
            });
        }
        if !(self.publish_period > 0. && self.publish_period.is_finite()) {
            return Err(ServoException::InvalidConfiguration {
                message: format!("publish period must be positive, got {}", self.publish_period),
            });
        }
        Ok(())
    }
}
