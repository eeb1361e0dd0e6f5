// Licensed under the EUPL-1.2-or-later

//! Contains error and Result definitions
use thiserror::Error;

/// Represents all errors which can occur inside the servo core.
///
/// Every variant is local and recoverable: the caller can skip the current
/// cycle, hold position, or retry with corrected input. Singularity proximity
/// is deliberately not an error; it is reported through
/// [`ServoStatus`](`crate::control_types::ServoStatus`) while the cycle still
/// produces a (scaled or zeroed) output.
#[derive(Error, Debug)]
pub enum ServoException {
    /// LengthMismatch is returned when the joint-space vectors handed to the
    /// integrator do not agree in size. The output state is left untouched.
    #[error("Lengths of output and increments do not match: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// MalformedDelta is returned when a Cartesian delta does not have exactly
    /// 6 entries (3 translation, 3 rotation).
    #[error("Cartesian delta must have exactly 6 entries, got {len}")]
    MalformedDelta { len: usize },

    /// UnknownFrame is returned by the kinematic state provider when a named
    /// reference frame cannot be resolved.
    #[error("Unknown reference frame: {frame:?}")]
    UnknownFrame { frame: String },

    /// UnknownGroup is returned by the kinematic state provider when a named
    /// joint group does not exist.
    #[error("Unknown joint group: {group:?}")]
    UnknownGroup { group: String },

    /// InvalidConfiguration is returned when the session configuration is
    /// rejected during validation.
    #[error("{message:?}")]
    InvalidConfiguration { message: String },
}

/// Result type which can have ServoException as Error
pub type ServoResult<T> = Result<T, ServoException>;
