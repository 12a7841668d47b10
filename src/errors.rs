//! Shared error types used across submodules.
//!
//! Every error is raised eagerly at the first invalid input and carries the
//! offending wavelength or layer index; no computation ever defers a failure
//! into a NaN that silently propagates downstream.

use thiserror::Error;

use crate::materials::MaterialError;
use crate::math::Scalar;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum ThinFilmError {
    /// Raised when the stack or wavelength grid is malformed.
    #[error("configuration error: {reason}")]
    Configuration {
        /// What was wrong with the configuration.
        reason: String,
    },
    /// Raised when a polarization value is not `s` or `p`.
    #[error("unsupported polarization {found:?}: expected \"s\" or \"p\"")]
    InvalidPolarization {
        /// The rejected polarization value.
        found: String,
    },
    /// Raised when the composed transfer matrix is not invertible at some wavelength.
    /// The whole spectrum computation fails; spectra are never partially populated.
    #[error("singular transfer matrix at wavelength index {wavelength_index} ({wavelength_m:.6e} m)")]
    SingularTransferMatrix {
        /// Index of the offending wavelength in the grid.
        wavelength_index: usize,
        /// The offending wavelength in meters.
        wavelength_m: Scalar,
    },
    /// Wraps refractive-index model errors.
    #[error(transparent)]
    Material(#[from] MaterialError),
}

impl ThinFilmError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration { reason: reason.into() }
    }
}
