//! Transfer-matrix optics engine.
//!
//! The pipeline runs strictly downward: wavevector resolution per layer,
//! interface/propagation matrix construction, composition into one global
//! 2×2 transfer matrix per wavelength, extraction of reflectivity,
//! transmissivity and emissivity, and analytic differentiation of all three
//! with respect to any interior layer's thickness.

/// Per-layer wavevector and refraction-cosine resolution.
pub mod wavevector;
/// Interface (dynamical) and propagation matrix construction.
pub mod matrix;
/// Global transfer-matrix composition and spectrum extraction.
pub mod composer;
/// Analytic differentiation of spectra with respect to layer thickness.
pub mod gradient;

pub use composer::{Spectrum, TmmSolver};
pub use gradient::SpectrumGradient;
pub use wavevector::WavevectorSet;
