#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants used throughout the library.
pub mod constants;
/// Shared numerical primitives (scalar aliases, complex 2×2 matrices, quadrature).
pub mod math;
/// Error types shared between submodules.
pub mod errors;
/// Wavelength grid builders and validation.
pub mod sweep;
/// Refractive-index models (constant, Drude, Lorentz-Drude, tabulated).
pub mod materials;
/// Planar multilayer stack description and polarization states.
pub mod stack;
/// Transfer-matrix optics engine: wavevectors, matrices, spectra, gradients.
pub mod tmm;
/// Thermal and radiative figures of merit derived from emissivity spectra.
pub mod therml;

/// Common exports for downstream crates.
pub mod prelude;
