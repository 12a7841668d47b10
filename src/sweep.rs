//! Wavelength grid builders and validation.
//!
//! Every spectral quantity in the crate is indexed 1:1 against a strictly
//! increasing wavelength grid in meters.

use crate::errors::ThinFilmError;
use crate::math::Scalar;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates a strictly increasing wavelength grid of `n` samples in
/// [start_m, stop_m] (meters).
///
/// # Errors
/// Returns [`ThinFilmError::Configuration`] when fewer than 2 samples are
/// requested, when either bound is non-positive, or when `stop_m <= start_m`.
pub fn wavelength_linspace(
    start_m: Scalar,
    stop_m: Scalar,
    n: usize,
) -> Result<Vec<Scalar>, ThinFilmError> {
    if n < 2 {
        return Err(ThinFilmError::configuration(format!(
            "a wavelength grid needs at least 2 samples (requested {n})"
        )));
    }
    if !(start_m > 0.0 && stop_m > 0.0) {
        return Err(ThinFilmError::configuration(format!(
            "wavelength bounds must be positive (got [{start_m:.4e}, {stop_m:.4e}] m)"
        )));
    }
    if stop_m <= start_m {
        return Err(ThinFilmError::configuration(format!(
            "wavelength grid must be increasing (got [{start_m:.4e}, {stop_m:.4e}] m)"
        )));
    }
    Ok(linspace(start_m, stop_m, n))
}

/// Checks that a wavelength grid is usable: at least 2 samples, every value
/// finite and positive, strictly increasing.
///
/// # Errors
/// Returns [`ThinFilmError::Configuration`] naming the offending sample index.
pub fn validate_wavelength_grid(wavelengths_m: &[Scalar]) -> Result<(), ThinFilmError> {
    if wavelengths_m.len() < 2 {
        return Err(ThinFilmError::configuration(format!(
            "a wavelength grid needs at least 2 samples (got {})",
            wavelengths_m.len()
        )));
    }
    for (i, &w) in wavelengths_m.iter().enumerate() {
        if !(w.is_finite() && w > 0.0) {
            return Err(ThinFilmError::configuration(format!(
                "wavelength sample {i} is not a positive finite length ({w:.4e} m)"
            )));
        }
        if i > 0 && w <= wavelengths_m[i - 1] {
            return Err(ThinFilmError::configuration(format!(
                "wavelength grid is not strictly increasing at sample {i} \
                 ({:.4e} m followed by {w:.4e} m)",
                wavelengths_m[i - 1]
            )));
        }
    }
    Ok(())
}
