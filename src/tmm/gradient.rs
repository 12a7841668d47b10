//! Analytic differentiation of spectra with respect to layer thickness.
//!
//! Only the designated layer's propagation matrix depends on its own
//! thickness, so the matrix product rule reduces to substituting
//! diag(∓i·kz·e^{∓i·kz·d}) at that one position and leaving every other
//! factor untouched. No finite differences anywhere; the centered
//! finite-difference check in the tests is the ground truth the analytic
//! result must match.

use crate::errors::ThinFilmError;
use crate::math::{magnitude_squared_derivative, Scalar};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::composer::TmmSolver;
use super::matrix::propagation_matrix_derivative;
use super::wavevector::WavevectorSet;

/// Per-wavelength derivatives of R, T and emissivity with respect to one
/// interior layer's thickness, in 1/m. Aligned 1:1 with the spectra they
/// derive from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumGradient {
    /// Stack index of the differentiated layer.
    pub layer_index: usize,
    /// dR/dd per wavelength.
    pub reflectivity: Vec<Scalar>,
    /// dT/dd per wavelength.
    pub transmissivity: Vec<Scalar>,
    /// d(emissivity)/dd = −dR/dd − dT/dd per wavelength.
    pub emissivity: Vec<Scalar>,
}

impl TmmSolver {
    /// Differentiates R, T and emissivity with respect to the thickness of
    /// the interior layer at `layer_index`, for every wavelength.
    ///
    /// Multi-layer gradients are the sum of independent single-layer calls.
    ///
    /// # Errors
    /// Returns [`ThinFilmError::Configuration`] when `layer_index` refers to
    /// a semi-infinite boundary layer, and
    /// [`ThinFilmError::SingularTransferMatrix`] if any wavelength's matrix
    /// cannot be inverted.
    pub fn spectrum_gradient(
        &self,
        layer_index: usize,
    ) -> Result<SpectrumGradient, ThinFilmError> {
        if !self.stack().is_interior(layer_index) {
            return Err(ThinFilmError::configuration(format!(
                "cannot differentiate with respect to layer {layer_index}: \
                 only finite interior layers have a thickness"
            )));
        }
        let wv = WavevectorSet::resolve(self.stack(), self.incident_angle());
        let samples = self.stack().wavelength_count();

        #[cfg(feature = "rayon")]
        let triples: Vec<(Scalar, Scalar, Scalar)> = (0..samples)
            .into_par_iter()
            .map(|iw| self.gradient_at(&wv, iw, layer_index))
            .collect::<Result<_, _>>()?;
        #[cfg(not(feature = "rayon"))]
        let triples: Vec<(Scalar, Scalar, Scalar)> = (0..samples)
            .map(|iw| self.gradient_at(&wv, iw, layer_index))
            .collect::<Result<_, _>>()?;

        let mut gradient = SpectrumGradient {
            layer_index,
            reflectivity: Vec::with_capacity(samples),
            transmissivity: Vec::with_capacity(samples),
            emissivity: Vec::with_capacity(samples),
        };
        for (dr, dt, de) in triples {
            gradient.reflectivity.push(dr);
            gradient.transmissivity.push(dt);
            gradient.emissivity.push(de);
        }
        Ok(gradient)
    }

    fn gradient_at(
        &self,
        wv: &WavevectorSet,
        iw: usize,
        layer_index: usize,
    ) -> Result<(Scalar, Scalar, Scalar), ThinFilmError> {
        let factors = self.factors_at(wv, iw)?;
        let m = factors.compose();
        let (r, t) = self.amplitudes_from(&m, iw)?;

        // Product rule: everything left of the designated layer, the
        // differentiated propagation factor, everything to its right.
        let position = layer_index - 1;
        let mut dm = factors.first_inverse;
        for layer in &factors.interior[..position] {
            dm = dm * layer.full();
        }
        let target = &factors.interior[position];
        dm = dm
            * target.interface
            * propagation_matrix_derivative(target.kz, target.thickness_m)
            * target.interface_inverse;
        for layer in &factors.interior[position + 1..] {
            dm = dm * layer.full();
        }
        dm = dm * factors.last;

        let m00 = m[(0, 0)];
        let dm00 = dm[(0, 0)];
        let dr_amplitude = (dm[(1, 0)] * m00 - m[(1, 0)] * dm00) / (m00 * m00);
        let dt_amplitude = -dm00 / (m00 * m00);

        let d_reflectivity = magnitude_squared_derivative(r, dr_amplitude);
        let d_transmissivity =
            magnitude_squared_derivative(t, dt_amplitude) * self.power_factor(wv, iw);
        Ok((d_reflectivity, d_transmissivity, -d_reflectivity - d_transmissivity))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::materials::{ConstantIndex, LorentzDrudeModel, RefractiveIndexModel};
    use crate::stack::{Polarization, Stack};
    use crate::sweep::wavelength_linspace;
    use crate::tmm::Spectrum;

    const DELTA: Scalar = 1.0e-9;

    fn centered_difference(
        solver: &TmmSolver,
        layer_index: usize,
        extract: impl Fn(&Spectrum) -> Vec<Scalar>,
    ) -> Vec<Scalar> {
        let d = solver.stack().layers()[layer_index].thickness_m;
        let forward = solver.with_thickness(layer_index, d + DELTA).unwrap();
        let backward = solver.with_thickness(layer_index, d - DELTA).unwrap();
        let f = extract(&forward.spectrum().unwrap());
        let b = extract(&backward.spectrum().unwrap());
        f.iter().zip(&b).map(|(fi, bi)| (fi - bi) / (2.0 * DELTA)).collect()
    }

    fn assert_gradient_matches(analytic: &[Scalar], numeric: &[Scalar]) {
        let scale = numeric.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        for (a, n) in analytic.iter().zip(numeric) {
            assert_relative_eq!(*a, *n, max_relative = 0.01, epsilon = 1.0e-3 * scale);
        }
    }

    fn absorbing_solver(polarization: Polarization, angle: Scalar) -> TmmSolver {
        let grid = wavelength_linspace(450.0e-9, 900.0e-9, 7).unwrap();
        let air = ConstantIndex::air();
        let silica = ConstantIndex::silica();
        let tin = LorentzDrudeModel::titanium_nitride();
        let layers: &[(&dyn RefractiveIndexModel, Scalar)] = &[
            (&air, 0.0),
            (&silica, 120.0e-9),
            (&tin, 60.0e-9),
            (&air, 0.0),
        ];
        let stack = Stack::from_materials(&grid, layers).unwrap();
        TmmSolver::new(stack, angle, polarization)
    }

    #[test]
    fn analytic_gradient_matches_centered_differences_for_an_absorbing_stack() {
        for pol in [Polarization::S, Polarization::P] {
            let solver = absorbing_solver(pol, 0.5);
            for layer_index in [1, 2] {
                let gradient = solver.spectrum_gradient(layer_index).unwrap();
                let dr = centered_difference(&solver, layer_index, |s| s.reflectivity.clone());
                let dt = centered_difference(&solver, layer_index, |s| s.transmissivity.clone());
                let de = centered_difference(&solver, layer_index, |s| s.emissivity.clone());
                assert_gradient_matches(&gradient.reflectivity, &dr);
                assert_gradient_matches(&gradient.transmissivity, &dt);
                assert_gradient_matches(&gradient.emissivity, &de);
            }
        }
    }

    #[test]
    fn lossless_film_gradient_cancels_between_r_and_t() {
        let grid = wavelength_linspace(500.0e-9, 800.0e-9, 5).unwrap();
        let air = ConstantIndex::air();
        let film = ConstantIndex::new("film", num_complex::Complex::new(2.1, 0.0));
        let layers: &[(&dyn RefractiveIndexModel, Scalar)] =
            &[(&air, 0.0), (&film, 310.0e-9), (&air, 0.0)];
        let stack = Stack::from_materials(&grid, layers).unwrap();
        let solver = TmmSolver::new(stack, 0.0, Polarization::S);
        let gradient = solver.spectrum_gradient(1).unwrap();
        for iw in 0..grid.len() {
            assert_relative_eq!(
                gradient.reflectivity[iw],
                -gradient.transmissivity[iw],
                max_relative = 1.0e-8,
                epsilon = 1.0e-3
            );
            // A lossless film cannot trade thickness for absorption.
            let scale = gradient.reflectivity[iw].abs().max(1.0);
            assert!(gradient.emissivity[iw].abs() < 1.0e-8 * scale);
        }
    }

    #[test]
    fn boundary_layer_gradient_is_rejected() {
        let solver = absorbing_solver(Polarization::S, 0.0);
        assert!(solver.spectrum_gradient(0).is_err());
        assert!(solver.spectrum_gradient(3).is_err());
    }

    #[test]
    fn gradient_recomputation_is_bit_identical() {
        let solver = absorbing_solver(Polarization::P, 0.2);
        let first = solver.spectrum_gradient(2).unwrap();
        let second = solver.spectrum_gradient(2).unwrap();
        assert_eq!(first, second);
    }
}
