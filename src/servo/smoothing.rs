// Licensed under the EUPL-1.2-or-later

//! Contains signal smoothing for joint position commands.

use std::f64::consts::PI;

/// Maximum cutoff frequency: 1000 Hz
pub static MAX_CUTOFF_FREQUENCY: f64 = 1000.0;
///  Default cutoff frequency: 100 Hz
pub static DEFAULT_CUTOFF_FREQUENCY: f64 = 100.0;

/// Jerk and noise suppression for joint position commands.
///
/// Implementations are stateful across cycles and owned by the control loop.
/// The integrator calls [`smooth`](`SmoothingFilter::smooth`) exactly once per
/// cycle with the full position vector; implementations must preserve the
/// vector length. Alternative smoothing strategies can be substituted without
/// touching the rest of the core.
pub trait SmoothingFilter {
    /// Filters the position vector in place.
    fn smooth(&mut self, positions: &mut [f64]);

    /// Resets the internal filter state to the given positions, e.g. after a
    /// pause in servoing.
    fn reset(&mut self, positions: &[f64]);
}

/// First-order low-pass filter applied per joint.
///
/// The first call after construction (or after the vector length changes)
/// passes the signal through unchanged and only records it as filter state.
pub struct LowPassSmoother {
    gain: f64,
    last_positions: Option<Vec<f64>>,
}

impl LowPassSmoother {
    /// Creates a filter for the given sample time and cutoff frequency.
    ///
    /// # Panics
    /// This function panics if:
    /// * sample_time is zero, negative, infinite or NaN.
    /// * cutoff_frequency is zero, negative, infinite or NaN.
    pub fn new(sample_time: f64, cutoff_frequency: f64) -> Self {
        assert!(sample_time > 0. && sample_time.is_finite());
        assert!(cutoff_frequency > 0. && cutoff_frequency.is_finite());
        let gain = sample_time / (sample_time + (1.0 / (2.0 * PI * cutoff_frequency)));
        LowPassSmoother {
            gain,
            last_positions: None,
        }
    }
}

impl SmoothingFilter for LowPassSmoother {
    fn smooth(&mut self, positions: &mut [f64]) {
        match &mut self.last_positions {
            Some(last) if last.len() == positions.len() => {
                for (position, last) in positions.iter_mut().zip(last.iter_mut()) {
                    *position = self.gain * *position + (1. - self.gain) * *last;
                    *last = *position;
                }
            }
            _ => self.last_positions = Some(positions.to_vec()),
        }
    }

    fn reset(&mut self, positions: &[f64]) {
        self.last_positions = Some(positions.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_step(cutoff_frequency: f64, last: f64, current: f64) -> f64 {
        let mut smoother = LowPassSmoother::new(0.001, cutoff_frequency);
        smoother.reset(&[last]);
        let mut positions = [current];
        smoother.smooth(&mut positions);
        positions[0]
    }

    #[test]
    fn low_pass_gain() {
        assert!(f64::abs(filter_step(100.0, 1.0, 1.0) - 1.) < 0.000001);
        assert!(f64::abs(filter_step(500.0, 1.0, 1.0) - 1.) < 0.000001);
        assert!(f64::abs(filter_step(1000.0, 1.0, 1.0) - 1.) < 0.000001);
        assert!(f64::abs(filter_step(100.0, 0.0, 1.0) - 0.3859) < 0.0001);
        assert!(f64::abs(filter_step(500.0, 0.0, 1.0) - 0.7585) < 0.0001);
        assert!(f64::abs(filter_step(900.0, 0.0, 1.0) - 0.8497) < 0.0001);
    }

    #[test]
    fn first_call_passes_through() {
        let mut smoother = LowPassSmoother::new(0.001, DEFAULT_CUTOFF_FREQUENCY);
        let mut positions = [0.5, -0.5, 1.0];
        smoother.smooth(&mut positions);
        assert_eq!(positions, [0.5, -0.5, 1.0]);
    }

    #[test]
    fn preserves_vector_length() {
        let mut smoother = LowPassSmoother::new(0.001, DEFAULT_CUTOFF_FREQUENCY);
        let mut positions = vec![0.; 7];
        smoother.smooth(&mut positions);
        smoother.smooth(&mut positions);
        assert_eq!(positions.len(), 7);
    }

    #[test]
    fn reset_discards_history() {
        let mut smoother = LowPassSmoother::new(0.001, DEFAULT_CUTOFF_FREQUENCY);
        smoother.reset(&[0.0]);
        let mut positions = [1.0];
        smoother.smooth(&mut positions);
        assert!(positions[0] < 1.0);

        smoother.reset(&[1.0]);
        let mut positions = [1.0];
        smoother.smooth(&mut positions);
        assert!(f64::abs(positions[0] - 1.0) < 1e-12);
    }
}
