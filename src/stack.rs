//! Planar multilayer stack description.
//!
//! A stack is an ordered sequence of layers in physical propagation order:
//! a semi-infinite incident medium, zero or more finite films, and a
//! semi-infinite exit medium. Semi-infinite boundary layers carry a
//! thickness of `0.0`. Validation happens once, at construction; every
//! downstream computation can rely on the invariants.

use std::str::FromStr;

use crate::errors::ThinFilmError;
use crate::materials::RefractiveIndexModel;
use crate::math::{CScalar, Scalar};
use crate::sweep::validate_wavelength_grid;

/// Incident polarization state.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarization {
    /// Electric field perpendicular to the plane of incidence (TE).
    S,
    /// Electric field parallel to the plane of incidence (TM).
    P,
}

impl FromStr for Polarization {
    type Err = ThinFilmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" => Ok(Self::S),
            "p" => Ok(Self::P),
            _ => Err(ThinFilmError::InvalidPolarization { found: s.to_string() }),
        }
    }
}

/// One layer of the stack: material tag, thickness, and refractive index per
/// wavelength. A thickness of `0.0` marks a semi-infinite boundary layer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Layer {
    /// Material tag, e.g. `"Air"` or `"TiN"`.
    pub material: String,
    /// Thickness in meters; `0.0` for the semi-infinite boundary layers.
    pub thickness_m: Scalar,
    /// Complex refractive index, one value per wavelength grid sample.
    pub refractive_index: Vec<CScalar>,
}

impl Layer {
    /// Semi-infinite boundary layer (incident or exit medium).
    #[must_use]
    pub fn semi_infinite(material: impl Into<String>, refractive_index: Vec<CScalar>) -> Self {
        Self {
            material: material.into(),
            thickness_m: 0.0,
            refractive_index,
        }
    }

    /// Finite interior film of the given thickness in meters.
    #[must_use]
    pub fn film(
        material: impl Into<String>,
        thickness_m: Scalar,
        refractive_index: Vec<CScalar>,
    ) -> Self {
        Self {
            material: material.into(),
            thickness_m,
            refractive_index,
        }
    }
}

/// Validated multilayer stack over a shared wavelength grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Stack {
    wavelengths: Vec<Scalar>,
    layers: Vec<Layer>,
}

impl Stack {
    /// Assembles and validates a stack.
    ///
    /// # Errors
    /// Returns [`ThinFilmError::Configuration`] when the grid is not strictly
    /// increasing, fewer than two layers are given, the first or last layer is
    /// not semi-infinite, an interior layer has a non-positive thickness, or
    /// any index array is not aligned 1:1 with the grid.
    pub fn new(wavelengths: Vec<Scalar>, layers: Vec<Layer>) -> Result<Self, ThinFilmError> {
        validate_wavelength_grid(&wavelengths)?;
        if layers.len() < 2 {
            return Err(ThinFilmError::configuration(format!(
                "a stack needs at least incident and exit media (got {} layers)",
                layers.len()
            )));
        }
        let last = layers.len() - 1;
        for (i, layer) in layers.iter().enumerate() {
            let boundary = i == 0 || i == last;
            if boundary && layer.thickness_m != 0.0 {
                return Err(ThinFilmError::configuration(format!(
                    "boundary layer {i} ({}) must be semi-infinite (thickness 0, got {:.4e} m)",
                    layer.material, layer.thickness_m
                )));
            }
            if !boundary && !(layer.thickness_m.is_finite() && layer.thickness_m > 0.0) {
                return Err(ThinFilmError::configuration(format!(
                    "interior layer {i} ({}) must have a finite positive thickness \
                     (got {:.4e} m)",
                    layer.material, layer.thickness_m
                )));
            }
            if layer.refractive_index.len() != wavelengths.len() {
                return Err(ThinFilmError::configuration(format!(
                    "layer {i} ({}) has {} refractive-index samples for a grid of {}",
                    layer.material,
                    layer.refractive_index.len(),
                    wavelengths.len()
                )));
            }
        }
        Ok(Self { wavelengths, layers })
    }

    /// Builds a stack by sampling refractive-index models onto a grid.
    ///
    /// Each `(model, thickness_m)` pair becomes one layer; a thickness of
    /// `0.0` marks the semi-infinite boundary layers.
    ///
    /// # Errors
    /// Propagates material lookup failures and the validation errors of
    /// [`Stack::new`].
    pub fn from_materials(
        wavelengths: &[Scalar],
        layers: &[(&dyn RefractiveIndexModel, Scalar)],
    ) -> Result<Self, ThinFilmError> {
        let mut built = Vec::with_capacity(layers.len());
        for &(model, thickness_m) in layers {
            let refractive_index = model.sample(wavelengths)?;
            built.push(Layer {
                material: model.name().to_string(),
                thickness_m,
                refractive_index,
            });
        }
        Self::new(wavelengths.to_vec(), built)
    }

    /// The shared wavelength grid in meters.
    #[must_use]
    pub fn wavelengths(&self) -> &[Scalar] {
        &self.wavelengths
    }

    /// The layers in physical propagation order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers, boundary media included.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of wavelength grid samples.
    #[must_use]
    pub fn wavelength_count(&self) -> usize {
        self.wavelengths.len()
    }

    /// True when `layer_index` refers to a finite interior film.
    #[must_use]
    pub fn is_interior(&self, layer_index: usize) -> bool {
        layer_index > 0 && layer_index + 1 < self.layers.len()
    }

    /// Returns a copy of this stack with one interior layer's thickness
    /// replaced. The original is untouched; derived spectra must be
    /// recomputed from the returned stack.
    ///
    /// # Errors
    /// Returns [`ThinFilmError::Configuration`] for a boundary layer index or
    /// a non-positive thickness.
    pub fn with_thickness(
        &self,
        layer_index: usize,
        thickness_m: Scalar,
    ) -> Result<Self, ThinFilmError> {
        if !self.is_interior(layer_index) {
            return Err(ThinFilmError::configuration(format!(
                "layer {layer_index} is not a finite interior film ({} layers total)",
                self.layers.len()
            )));
        }
        if !(thickness_m.is_finite() && thickness_m > 0.0) {
            return Err(ThinFilmError::configuration(format!(
                "replacement thickness must be finite and positive (got {thickness_m:.4e} m)"
            )));
        }
        let mut stack = self.clone();
        stack.layers[layer_index].thickness_m = thickness_m;
        Ok(stack)
    }
}
