//! Global transfer-matrix composition and spectrum extraction.
//!
//! Per wavelength the global matrix is the ordered product
//! `M = D₀⁻¹ · ∏ (D_l · P_l · D_l⁻¹) · D_N` over the interior layers in
//! physical order; the product order is fixed because matrix multiplication
//! does not commute. Amplitudes follow from `r = M₁₀/M₀₀`, `t = 1/M₀₀`.

use crate::errors::ThinFilmError;
use crate::math::{CMatrix2, CScalar, Scalar};
use crate::stack::{Polarization, Stack};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::matrix::{interface_matrix, propagation_matrix};
use super::wavevector::WavevectorSet;

/// Pivot magnitude below which `M₀₀` is treated as numerically zero.
const MIN_PIVOT: Scalar = 1.0e-300;

/// Reflectivity, transmissivity and emissivity, aligned 1:1 with the
/// stack's wavelength grid. Always fully regenerated; never patched in
/// place.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// R = |r|² per wavelength.
    pub reflectivity: Vec<Scalar>,
    /// T = |t|²·Re(ñ_exit·cosθ_exit)/Re(ñ_inc·cosθ_inc) per wavelength.
    pub transmissivity: Vec<Scalar>,
    /// 1 − R − T per wavelength (Kirchhoff emissivity/absorptivity).
    pub emissivity: Vec<Scalar>,
}

/// Matrix factors of one interior layer at one wavelength.
pub(crate) struct LayerFactors {
    pub interface: CMatrix2,
    pub interface_inverse: CMatrix2,
    pub propagation: CMatrix2,
    pub kz: CScalar,
    pub thickness_m: Scalar,
}

impl LayerFactors {
    pub(crate) fn full(&self) -> CMatrix2 {
        self.interface * self.propagation * self.interface_inverse
    }
}

/// All matrix factors of the stack at one wavelength, in physical order.
pub(crate) struct WavelengthFactors {
    pub first_inverse: CMatrix2,
    pub interior: Vec<LayerFactors>,
    pub last: CMatrix2,
}

impl WavelengthFactors {
    /// Ordered product into the global transfer matrix.
    pub(crate) fn compose(&self) -> CMatrix2 {
        let mut m = self.first_inverse;
        for factors in &self.interior {
            m = m * factors.full();
        }
        m * self.last
    }
}

/// Transfer-matrix solver for one immutable stack/angle/polarization
/// configuration. Every public entry point reads the configuration and
/// regenerates its outputs in full; recomputing an unmodified configuration
/// yields bit-identical arrays.
#[derive(Debug, Clone)]
pub struct TmmSolver {
    stack: Stack,
    incident_angle: Scalar,
    polarization: Polarization,
}

impl TmmSolver {
    /// Creates a solver from a validated stack, an incident angle in radians
    /// from the stack normal, and a polarization state.
    #[must_use]
    pub fn new(stack: Stack, incident_angle: Scalar, polarization: Polarization) -> Self {
        Self { stack, incident_angle, polarization }
    }

    /// The stack under analysis.
    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Incident angle in radians from the stack normal.
    #[must_use]
    pub const fn incident_angle(&self) -> Scalar {
        self.incident_angle
    }

    /// Incident polarization.
    #[must_use]
    pub const fn polarization(&self) -> Polarization {
        self.polarization
    }

    /// Returns a solver for the same configuration with one interior layer's
    /// thickness replaced (the receiver is untouched).
    ///
    /// # Errors
    /// Propagates [`ThinFilmError::Configuration`] from the stack.
    pub fn with_thickness(
        &self,
        layer_index: usize,
        thickness_m: Scalar,
    ) -> Result<Self, ThinFilmError> {
        Ok(Self {
            stack: self.stack.with_thickness(layer_index, thickness_m)?,
            incident_angle: self.incident_angle,
            polarization: self.polarization,
        })
    }

    fn singular_at(&self, iw: usize) -> ThinFilmError {
        ThinFilmError::SingularTransferMatrix {
            wavelength_index: iw,
            wavelength_m: self.stack.wavelengths()[iw],
        }
    }

    /// Builds every matrix factor of the stack at wavelength index `iw`.
    pub(crate) fn factors_at(
        &self,
        wv: &WavevectorSet,
        iw: usize,
    ) -> Result<WavelengthFactors, ThinFilmError> {
        let layers = self.stack.layers();
        let last_index = layers.len() - 1;

        let first = interface_matrix(
            layers[0].refractive_index[iw],
            wv.cos_theta[0][iw],
            self.polarization,
        );
        let first_inverse = first.try_inverse().ok_or_else(|| self.singular_at(iw))?;

        let mut interior = Vec::with_capacity(last_index.saturating_sub(1));
        for l in 1..last_index {
            let interface = interface_matrix(
                layers[l].refractive_index[iw],
                wv.cos_theta[l][iw],
                self.polarization,
            );
            let interface_inverse =
                interface.try_inverse().ok_or_else(|| self.singular_at(iw))?;
            let kz = wv.kz[l][iw];
            let thickness_m = layers[l].thickness_m;
            interior.push(LayerFactors {
                interface,
                interface_inverse,
                propagation: propagation_matrix(kz, thickness_m),
                kz,
                thickness_m,
            });
        }

        let last = interface_matrix(
            layers[last_index].refractive_index[iw],
            wv.cos_theta[last_index][iw],
            self.polarization,
        );

        Ok(WavelengthFactors { first_inverse, interior, last })
    }

    /// Field amplitudes (r, t) from a composed transfer matrix.
    pub(crate) fn amplitudes_from(
        &self,
        m: &CMatrix2,
        iw: usize,
    ) -> Result<(CScalar, CScalar), ThinFilmError> {
        let m00 = m[(0, 0)];
        if m00.norm() < MIN_PIVOT {
            return Err(self.singular_at(iw));
        }
        Ok((m[(1, 0)] / m00, CScalar::new(1.0, 0.0) / m00))
    }

    /// Power-flow normalization Re(ñ_exit·cosθ_exit)/Re(ñ_inc·cosθ_inc).
    pub(crate) fn power_factor(&self, wv: &WavevectorSet, iw: usize) -> Scalar {
        let layers = self.stack.layers();
        let last = layers.len() - 1;
        let incident = (layers[0].refractive_index[iw] * wv.cos_theta[0][iw]).re;
        let exit = (layers[last].refractive_index[iw] * wv.cos_theta[last][iw]).re;
        exit / incident
    }

    fn reflection_transmission_at(
        &self,
        wv: &WavevectorSet,
        iw: usize,
    ) -> Result<(Scalar, Scalar), ThinFilmError> {
        let m = self.factors_at(wv, iw)?.compose();
        let (r, t) = self.amplitudes_from(&m, iw)?;
        Ok((r.norm_sqr(), t.norm_sqr() * self.power_factor(wv, iw)))
    }

    /// The composed global transfer matrix per wavelength.
    ///
    /// # Errors
    /// Fails with [`ThinFilmError::SingularTransferMatrix`] if any interface
    /// matrix is not invertible.
    pub fn transfer_matrices(&self) -> Result<Vec<CMatrix2>, ThinFilmError> {
        let wv = WavevectorSet::resolve(&self.stack, self.incident_angle);
        (0..self.stack.wavelength_count())
            .map(|iw| self.factors_at(&wv, iw).map(|f| f.compose()))
            .collect()
    }

    /// Computes the reflectivity/transmissivity/emissivity spectra for the
    /// current configuration.
    ///
    /// # Errors
    /// Fails with [`ThinFilmError::SingularTransferMatrix`] at the first
    /// wavelength whose composed matrix cannot be inverted; no partial
    /// spectra are returned.
    pub fn spectrum(&self) -> Result<Spectrum, ThinFilmError> {
        let wv = WavevectorSet::resolve(&self.stack, self.incident_angle);
        let samples = self.stack.wavelength_count();

        #[cfg(feature = "rayon")]
        let pairs: Vec<(Scalar, Scalar)> = (0..samples)
            .into_par_iter()
            .map(|iw| self.reflection_transmission_at(&wv, iw))
            .collect::<Result<_, _>>()?;
        #[cfg(not(feature = "rayon"))]
        let pairs: Vec<(Scalar, Scalar)> = (0..samples)
            .map(|iw| self.reflection_transmission_at(&wv, iw))
            .collect::<Result<_, _>>()?;

        let mut spectrum = Spectrum {
            reflectivity: Vec::with_capacity(samples),
            transmissivity: Vec::with_capacity(samples),
            emissivity: Vec::with_capacity(samples),
        };
        for (r, t) in pairs {
            spectrum.reflectivity.push(r);
            spectrum.transmissivity.push(t);
            spectrum.emissivity.push(1.0 - r - t);
        }
        Ok(spectrum)
    }
}
