//! Convenience re-exports for building multilayer optics analyses.

pub use crate::constants::*;
pub use crate::errors::ThinFilmError;
pub use crate::materials::{
    ConstantIndex, DrudeModel, LorentzDrudeModel, LorentzOscillator, MaterialError,
    RefractiveIndexModel, TabulatedIndex,
};
pub use crate::math::{magnitude_squared_derivative, trapezoid, CMatrix2, CScalar, Scalar};
pub use crate::stack::{Layer, Polarization, Stack};
pub use crate::sweep::{linspace, validate_wavelength_grid, wavelength_linspace};
pub use crate::therml::{
    atmospheric_absorbed_power, blackbody_power_density, blackbody_spectral_radiance,
    blackbody_spectrum, cooling_gradient, cooling_report, emitted_power_density,
    luminous_efficiency, photopic_luminosity, solar_absorbed_power, stefan_boltzmann_power,
    stpv_gradient, stpv_power_density, stpv_report, stpv_spectral_efficiency,
    thermal_emission, thermal_radiated_power, CoolingGradient, CoolingReport, StpvGradient,
    StpvReport,
};
pub use crate::tmm::{Spectrum, SpectrumGradient, TmmSolver, WavevectorSet};
