//! Refractive-index models for stack materials.
//!
//! The optics engine consumes a complex refractive index ñ = n + ik per
//! (layer, wavelength) pair and does not care where it came from. The models
//! here cover the common cases: non-dispersive dielectrics, Drude and
//! Drude-Lorentz metals, and tabulated data with range-checked
//! interpolation. Out-of-range lookups fail; nothing is ever extrapolated.

use num_complex::Complex;
use thiserror::Error;

use crate::constants::angular_frequency_from_wavelength;
use crate::math::{CScalar, Scalar};

/// Errors from refractive-index models.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// Requested wavelength lies outside the model's defined range.
    #[error(
        "wavelength {wavelength_m:.4e} m is outside the data range \
         [{min_m:.4e}, {max_m:.4e}] m for {material}"
    )]
    OutOfRange {
        /// Material name.
        material: String,
        /// The rejected wavelength in meters.
        wavelength_m: Scalar,
        /// Lower bound of the defined range in meters.
        min_m: Scalar,
        /// Upper bound of the defined range in meters.
        max_m: Scalar,
    },
    /// Tabulated data is malformed.
    #[error("tabulated data for {material} is malformed: {reason}")]
    Data {
        /// Material name.
        material: String,
        /// What was wrong with the table.
        reason: String,
    },
}

/// Wavelength-dependent complex refractive index ñ(λ) = n + ik.
pub trait RefractiveIndexModel {
    /// Human-readable name of this material.
    fn name(&self) -> &str;

    /// Wavelength range over which the model is defined (meters).
    fn wavelength_range(&self) -> (Scalar, Scalar);

    /// Complex refractive index at a vacuum wavelength in meters.
    ///
    /// # Errors
    /// Returns [`MaterialError::OutOfRange`] outside [`Self::wavelength_range`].
    fn refractive_index(&self, wavelength_m: Scalar) -> Result<CScalar, MaterialError>;

    /// Evaluates the model onto a wavelength grid, one value per sample.
    ///
    /// # Errors
    /// Fails on the first out-of-range sample.
    fn sample(&self, wavelengths_m: &[Scalar]) -> Result<Vec<CScalar>, MaterialError> {
        wavelengths_m.iter().map(|&w| self.refractive_index(w)).collect()
    }
}

fn out_of_range(model: &dyn RefractiveIndexModel, wavelength_m: Scalar) -> MaterialError {
    let (min_m, max_m) = model.wavelength_range();
    MaterialError::OutOfRange {
        material: model.name().to_string(),
        wavelength_m,
        min_m,
        max_m,
    }
}

/// Principal square root of a relative permittivity, forced onto the
/// passive branch Im(ñ) ≥ 0.
fn index_from_permittivity(epsilon: CScalar) -> CScalar {
    let n = epsilon.sqrt();
    if n.im < 0.0 { -n } else { n }
}

/// Non-dispersive material with a fixed complex refractive index.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct ConstantIndex {
    /// Material name.
    pub name: String,
    /// The fixed complex refractive index.
    pub index: CScalar,
}

impl ConstantIndex {
    /// Constant-index material from an explicit complex index.
    #[must_use]
    pub fn new(name: impl Into<String>, index: CScalar) -> Self {
        Self { name: name.into(), index }
    }

    /// Air, ñ = 1.
    #[must_use]
    pub fn air() -> Self {
        Self::new("Air", Complex::new(1.0, 0.0))
    }

    /// Fused silica at its nominal visible/near-IR value, ñ = 1.45.
    #[must_use]
    pub fn silica() -> Self {
        Self::new("SiO2", Complex::new(1.45, 0.0))
    }

    /// Hafnia at its nominal visible/near-IR value, ñ = 1.9.
    #[must_use]
    pub fn hafnia() -> Self {
        Self::new("HfO2", Complex::new(1.9, 0.0))
    }
}

impl RefractiveIndexModel for ConstantIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (Scalar, Scalar) {
        (0.0, Scalar::INFINITY)
    }

    fn refractive_index(&self, wavelength_m: Scalar) -> Result<CScalar, MaterialError> {
        if wavelength_m <= 0.0 {
            return Err(out_of_range(self, wavelength_m));
        }
        Ok(self.index)
    }
}

/// Free-electron (Drude) metal: ε(ω) = ε∞ − ωₚ²/(ω² + iγω).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct DrudeModel {
    /// Material name.
    pub name: String,
    /// Angular plasma frequency ωₚ (rad/s).
    pub plasma_frequency: Scalar,
    /// Collision frequency γ (rad/s).
    pub collision_frequency: Scalar,
    /// High-frequency permittivity limit ε∞.
    pub epsilon_infinity: Scalar,
}

impl DrudeModel {
    /// Silver. Drude fit to the Johnson & Christy data set
    /// (ħωₚ ≈ 9.15 eV, ħγ ≈ 0.021 eV, ε∞ ≈ 5).
    #[must_use]
    pub fn silver() -> Self {
        Self {
            name: "Ag".to_string(),
            plasma_frequency: 1.39e16,
            collision_frequency: 3.2e13,
            epsilon_infinity: 5.0,
        }
    }

    /// Tungsten. Coarse free-electron approximation, adequate for broadband
    /// thermal emitter demos; interband structure below ~1 µm is not modeled.
    #[must_use]
    pub fn tungsten() -> Self {
        Self {
            name: "W".to_string(),
            plasma_frequency: 9.75e15,
            collision_frequency: 1.0e14,
            epsilon_infinity: 1.0,
        }
    }

    /// Relative permittivity at angular frequency ω (rad/s).
    #[must_use]
    pub fn relative_permittivity(&self, omega: Scalar) -> CScalar {
        let j = Complex::new(0.0, 1.0);
        let omega_c = Complex::new(omega, 0.0);
        let numerator = Complex::new(self.plasma_frequency.powi(2), 0.0);
        let denominator = omega_c * (omega_c + j * self.collision_frequency);
        Complex::new(self.epsilon_infinity, 0.0) - numerator / denominator
    }
}

impl RefractiveIndexModel for DrudeModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (Scalar, Scalar) {
        (0.0, Scalar::INFINITY)
    }

    fn refractive_index(&self, wavelength_m: Scalar) -> Result<CScalar, MaterialError> {
        if wavelength_m <= 0.0 {
            return Err(out_of_range(self, wavelength_m));
        }
        let omega = angular_frequency_from_wavelength(wavelength_m);
        Ok(index_from_permittivity(self.relative_permittivity(omega)))
    }
}

/// One Lorentz oscillator term f·ω₀²/(ω₀² − ω² − iΓω).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct LorentzOscillator {
    /// Dimensionless oscillator strength f.
    pub strength: Scalar,
    /// Resonance angular frequency ω₀ (rad/s).
    pub resonance: Scalar,
    /// Damping rate Γ (rad/s).
    pub damping: Scalar,
}

/// Drude background plus Lorentz oscillators, for metals with interband
/// transitions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct LorentzDrudeModel {
    /// Material name.
    pub name: String,
    /// High-frequency permittivity limit ε∞.
    pub epsilon_infinity: Scalar,
    /// Angular plasma frequency ωₚ (rad/s).
    pub plasma_frequency: Scalar,
    /// Drude collision frequency γ (rad/s).
    pub collision_frequency: Scalar,
    /// Interband oscillator terms.
    pub oscillators: Vec<LorentzOscillator>,
}

impl LorentzDrudeModel {
    /// Titanium nitride. Drude-Lorentz fit after Naik et al., *Opt. Mater.
    /// Express* **2**, 478 (2012): ε∞ = 4.86, ħωₚ = 7.93 eV, ħγ = 0.18 eV,
    /// one interband oscillator at 4.22 eV.
    #[must_use]
    pub fn titanium_nitride() -> Self {
        Self {
            name: "TiN".to_string(),
            epsilon_infinity: 4.86,
            plasma_frequency: 1.2048e16,
            collision_frequency: 2.7347e14,
            oscillators: vec![LorentzOscillator {
                strength: 1.99,
                resonance: 6.4113e15,
                damping: 2.7043e15,
            }],
        }
    }

    /// Relative permittivity at angular frequency ω (rad/s).
    #[must_use]
    pub fn relative_permittivity(&self, omega: Scalar) -> CScalar {
        let j = Complex::new(0.0, 1.0);
        let omega_c = Complex::new(omega, 0.0);
        let drude = Complex::new(self.plasma_frequency.powi(2), 0.0)
            / (omega_c * (omega_c + j * self.collision_frequency));
        let mut epsilon = Complex::new(self.epsilon_infinity, 0.0) - drude;
        for osc in &self.oscillators {
            let w0_sq = Complex::new(osc.resonance.powi(2), 0.0);
            let denominator = w0_sq - omega_c * omega_c - j * osc.damping * omega;
            epsilon += Complex::new(osc.strength, 0.0) * w0_sq / denominator;
        }
        epsilon
    }
}

impl RefractiveIndexModel for LorentzDrudeModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (Scalar, Scalar) {
        (0.0, Scalar::INFINITY)
    }

    fn refractive_index(&self, wavelength_m: Scalar) -> Result<CScalar, MaterialError> {
        if wavelength_m <= 0.0 {
            return Err(out_of_range(self, wavelength_m));
        }
        let omega = angular_frequency_from_wavelength(wavelength_m);
        Ok(index_from_permittivity(self.relative_permittivity(omega)))
    }
}

/// Tabulated refractive index with linear interpolation between knots.
///
/// Lookups outside the tabulated range fail with
/// [`MaterialError::OutOfRange`] rather than extrapolate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TabulatedIndex {
    name: String,
    wavelengths_m: Vec<Scalar>,
    values: Vec<CScalar>,
}

impl TabulatedIndex {
    /// Builds a table from strictly increasing wavelengths (meters) and the
    /// matching complex indices.
    ///
    /// # Errors
    /// Returns [`MaterialError::Data`] on mismatched lengths, fewer than two
    /// knots, or non-increasing wavelengths.
    pub fn new(
        name: impl Into<String>,
        wavelengths_m: Vec<Scalar>,
        values: Vec<CScalar>,
    ) -> Result<Self, MaterialError> {
        let name = name.into();
        if wavelengths_m.len() != values.len() {
            return Err(MaterialError::Data {
                material: name,
                reason: format!(
                    "{} wavelengths but {} index values",
                    wavelengths_m.len(),
                    values.len()
                ),
            });
        }
        if wavelengths_m.len() < 2 {
            return Err(MaterialError::Data {
                material: name,
                reason: "need at least 2 knots".to_string(),
            });
        }
        for i in 1..wavelengths_m.len() {
            if wavelengths_m[i] <= wavelengths_m[i - 1] {
                return Err(MaterialError::Data {
                    material: name,
                    reason: format!("wavelengths not strictly increasing at knot {i}"),
                });
            }
        }
        Ok(Self { name, wavelengths_m, values })
    }
}

impl RefractiveIndexModel for TabulatedIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (Scalar, Scalar) {
        (self.wavelengths_m[0], *self.wavelengths_m.last().unwrap())
    }

    fn refractive_index(&self, wavelength_m: Scalar) -> Result<CScalar, MaterialError> {
        let (min_m, max_m) = self.wavelength_range();
        if !(min_m..=max_m).contains(&wavelength_m) {
            return Err(out_of_range(self, wavelength_m));
        }
        // Binary search for the enclosing interval.
        let mut lo = 0;
        let mut hi = self.wavelengths_m.len() - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.wavelengths_m[mid] > wavelength_m {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        let span = self.wavelengths_m[hi] - self.wavelengths_m[lo];
        let frac = (wavelength_m - self.wavelengths_m[lo]) / span;
        Ok(self.values[lo] + (self.values[hi] - self.values[lo]) * frac)
    }
}
