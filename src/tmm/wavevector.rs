//! Wavevector resolution across the stack.
//!
//! The in-plane component `kx` is set by the incident medium and conserved
//! through every layer; the normal component `kz` is resolved per layer on
//! the branch with Im(kz) ≥ 0, so that fields decay into absorbing or
//! evanescent layers instead of growing.

use crate::constants::vacuum_wavenumber;
use crate::math::{CScalar, Scalar};
use crate::stack::Stack;

/// Resolved wavevector components for every (layer, wavelength) pair of one
/// stack/angle configuration. Derived data: rebuilt in full whenever the
/// stack or the incident angle changes, never mutated piecemeal.
#[derive(Debug, Clone)]
pub struct WavevectorSet {
    /// Vacuum wavenumber 2π/λ per wavelength.
    pub k0: Vec<Scalar>,
    /// Conserved in-plane wavevector per wavelength.
    pub kx: Vec<CScalar>,
    /// Normal wavevector, indexed `[layer][wavelength]`.
    pub kz: Vec<Vec<CScalar>>,
    /// Refraction-angle cosine kz/(ñ·k₀), indexed `[layer][wavelength]`.
    pub cos_theta: Vec<Vec<CScalar>>,
}

impl WavevectorSet {
    /// Resolves k₀, kx and the per-layer kz for an incident angle in radians
    /// measured from the stack normal. Normal incidence degenerates kx to
    /// zero without special-casing.
    #[must_use]
    pub fn resolve(stack: &Stack, incident_angle: Scalar) -> Self {
        let wavelengths = stack.wavelengths();
        let samples = wavelengths.len();
        let k0: Vec<Scalar> = wavelengths.iter().map(|&w| vacuum_wavenumber(w)).collect();

        let sin_theta = incident_angle.sin();
        let incident = &stack.layers()[0].refractive_index;
        let kx: Vec<CScalar> = (0..samples)
            .map(|iw| incident[iw] * (sin_theta * k0[iw]))
            .collect();

        let mut kz = Vec::with_capacity(stack.layer_count());
        let mut cos_theta = Vec::with_capacity(stack.layer_count());
        for layer in stack.layers() {
            let mut kz_layer = Vec::with_capacity(samples);
            let mut cos_layer = Vec::with_capacity(samples);
            for iw in 0..samples {
                let nk0 = layer.refractive_index[iw] * k0[iw];
                let mut v = (nk0 * nk0 - kx[iw] * kx[iw]).sqrt();
                if v.im < 0.0 {
                    v = -v;
                }
                kz_layer.push(v);
                cos_layer.push(v / nk0);
            }
            kz.push(kz_layer);
            cos_theta.push(cos_layer);
        }

        Self { k0, kx, kz, cos_theta }
    }
}
