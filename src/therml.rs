//! Thermal and radiative figures of merit built on emissivity spectra.
//!
//! Every quantity here is a trapezoidal integral over the shared wavelength
//! grid with a fixed accumulation order, so recomputation is bit-for-bit
//! reproducible. Gradients with respect to a layer thickness push the
//! per-wavelength emissivity gradient of the optics engine through the same
//! integration operator; integration is linear, ratios use the quotient
//! rule. Reference solar and atmospheric-transmissivity spectra are opaque
//! caller-supplied arrays resampled onto the same grid.

use std::f64::consts::PI;

use crate::constants::{BOLTZMANN_CONSTANT, PLANCK_CONSTANT, SPEED_OF_LIGHT, STEFAN_BOLTZMANN};
use crate::math::{trapezoid, Scalar};

/// Blackbody spectral radiance ρ(λ, T) by Planck's law, in W·sr⁻¹·m⁻³.
#[must_use]
pub fn blackbody_spectral_radiance(wavelength_m: Scalar, temperature_k: Scalar) -> Scalar {
    let c1 = 2.0 * PLANCK_CONSTANT * SPEED_OF_LIGHT * SPEED_OF_LIGHT / wavelength_m.powi(5);
    let x = PLANCK_CONSTANT * SPEED_OF_LIGHT
        / (wavelength_m * BOLTZMANN_CONSTANT * temperature_k);
    c1 / (x.exp() - 1.0)
}

/// Blackbody spectral radiance evaluated on a wavelength grid.
#[must_use]
pub fn blackbody_spectrum(wavelengths_m: &[Scalar], temperature_k: Scalar) -> Vec<Scalar> {
    wavelengths_m
        .iter()
        .map(|&w| blackbody_spectral_radiance(w, temperature_k))
        .collect()
}

/// Hemispherical thermal emission spectrum π·ε(λ)·ρ(λ, T), in W·m⁻³.
#[must_use]
pub fn thermal_emission(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    temperature_k: Scalar,
) -> Vec<Scalar> {
    assert_eq!(wavelengths_m.len(), emissivity.len());
    wavelengths_m
        .iter()
        .zip(emissivity)
        .map(|(&w, &e)| PI * e * blackbody_spectral_radiance(w, temperature_k))
        .collect()
}

/// Stefan-Boltzmann closed form σT⁴ in W/m².
#[must_use]
pub fn stefan_boltzmann_power(temperature_k: Scalar) -> Scalar {
    STEFAN_BOLTZMANN * temperature_k.powi(4)
}

/// Blackbody power density π·∫ρ(λ, T) dλ over the grid, in W/m².
///
/// For a grid that covers the bulk of the Planck curve this matches
/// [`stefan_boltzmann_power`] to within 1%; the tests pin that down.
#[must_use]
pub fn blackbody_power_density(wavelengths_m: &[Scalar], temperature_k: Scalar) -> Scalar {
    PI * trapezoid(wavelengths_m, &blackbody_spectrum(wavelengths_m, temperature_k))
}

/// Emitted power density π·∫ε(λ)·ρ(λ, T) dλ, in W/m².
#[must_use]
pub fn emitted_power_density(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    temperature_k: Scalar,
) -> Scalar {
    trapezoid(wavelengths_m, &thermal_emission(wavelengths_m, emissivity, temperature_k))
}

/// Number of leading grid samples at or below the bandgap wavelength.
fn bandgap_samples(wavelengths_m: &[Scalar], bandgap_wavelength_m: Scalar) -> usize {
    wavelengths_m.iter().take_while(|&&w| w <= bandgap_wavelength_m).count()
}

/// STPV power density: the emitted power density restricted to wavelengths
/// at or below the photovoltaic bandgap cutoff, in W/m².
#[must_use]
pub fn stpv_power_density(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    temperature_k: Scalar,
    bandgap_wavelength_m: Scalar,
) -> Scalar {
    let cut = bandgap_samples(wavelengths_m, bandgap_wavelength_m);
    emitted_power_density(&wavelengths_m[..cut], &emissivity[..cut], temperature_k)
}

/// STPV spectral efficiency: bandgap-restricted emitted power over total
/// emitted power, dimensionless in [0, 1].
#[must_use]
pub fn stpv_spectral_efficiency(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    temperature_k: Scalar,
    bandgap_wavelength_m: Scalar,
) -> Scalar {
    let total = emitted_power_density(wavelengths_m, emissivity, temperature_k);
    if total == 0.0 {
        return 0.0;
    }
    stpv_power_density(wavelengths_m, emissivity, temperature_k, bandgap_wavelength_m) / total
}

/// Analytic fit to the CIE photopic luminosity function,
/// V(λ) ≈ 1.019·exp(−285.4·(λ_µm − 0.559)²).
#[must_use]
pub fn photopic_luminosity(wavelength_m: Scalar) -> Scalar {
    let um = wavelength_m * 1.0e6;
    1.019 * (-285.4 * (um - 0.559) * (um - 0.559)).exp()
}

/// Luminous efficiency: photopic-weighted emitted power over total emitted
/// power, dimensionless in [0, 1].
#[must_use]
pub fn luminous_efficiency(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    temperature_k: Scalar,
) -> Scalar {
    let emission = thermal_emission(wavelengths_m, emissivity, temperature_k);
    let weighted: Vec<Scalar> = wavelengths_m
        .iter()
        .zip(&emission)
        .map(|(&w, &p)| photopic_luminosity(w) * p)
        .collect();
    let total = trapezoid(wavelengths_m, &emission);
    if total == 0.0 {
        return 0.0;
    }
    trapezoid(wavelengths_m, &weighted) / total
}

/// Integrated STPV figures of merit for one emitter configuration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StpvReport {
    /// Bandgap-restricted emitted power density in W/m².
    pub power_density: Scalar,
    /// Bandgap-restricted over total emitted power, in [0, 1].
    pub spectral_efficiency: Scalar,
    /// Photopic-weighted over total emitted power, in [0, 1].
    pub luminous_efficiency: Scalar,
}

/// Computes all STPV figures of merit in one pass.
#[must_use]
pub fn stpv_report(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    temperature_k: Scalar,
    bandgap_wavelength_m: Scalar,
) -> StpvReport {
    StpvReport {
        power_density: stpv_power_density(
            wavelengths_m,
            emissivity,
            temperature_k,
            bandgap_wavelength_m,
        ),
        spectral_efficiency: stpv_spectral_efficiency(
            wavelengths_m,
            emissivity,
            temperature_k,
            bandgap_wavelength_m,
        ),
        luminous_efficiency: luminous_efficiency(wavelengths_m, emissivity, temperature_k),
    }
}

/// Thickness gradients of the STPV figures of merit, in (unit of the
/// figure)/m.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StpvGradient {
    /// d(power density)/dd in W·m⁻²·m⁻¹.
    pub power_density: Scalar,
    /// d(spectral efficiency)/dd in 1/m.
    pub spectral_efficiency: Scalar,
    /// d(luminous efficiency)/dd in 1/m.
    pub luminous_efficiency: Scalar,
}

/// Pushes a per-wavelength emissivity gradient through the STPV figures of
/// merit. Power densities are linear in the emissivity; the efficiencies
/// are ratios of integrals and use the quotient rule.
#[must_use]
pub fn stpv_gradient(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    emissivity_gradient: &[Scalar],
    temperature_k: Scalar,
    bandgap_wavelength_m: Scalar,
) -> StpvGradient {
    let total = emitted_power_density(wavelengths_m, emissivity, temperature_k);
    let total_gradient =
        emitted_power_density(wavelengths_m, emissivity_gradient, temperature_k);
    let in_band =
        stpv_power_density(wavelengths_m, emissivity, temperature_k, bandgap_wavelength_m);
    let in_band_gradient = stpv_power_density(
        wavelengths_m,
        emissivity_gradient,
        temperature_k,
        bandgap_wavelength_m,
    );

    let emission = thermal_emission(wavelengths_m, emissivity, temperature_k);
    let emission_gradient =
        thermal_emission(wavelengths_m, emissivity_gradient, temperature_k);
    let weigh = |spectrum: &[Scalar]| -> Scalar {
        let weighted: Vec<Scalar> = wavelengths_m
            .iter()
            .zip(spectrum)
            .map(|(&w, &p)| photopic_luminosity(w) * p)
            .collect();
        trapezoid(wavelengths_m, &weighted)
    };
    let luminous = weigh(&emission);
    let luminous_gradient = weigh(&emission_gradient);

    let quotient_rule = |num: Scalar, dnum: Scalar| {
        if total == 0.0 {
            0.0
        } else {
            (dnum * total - num * total_gradient) / (total * total)
        }
    };

    StpvGradient {
        power_density: in_band_gradient,
        spectral_efficiency: quotient_rule(in_band, in_band_gradient),
        luminous_efficiency: quotient_rule(luminous, luminous_gradient),
    }
}

/// Integrated radiative-cooling balance for one configuration.
///
/// Sign convention: `net_cooling_power` is positive when the structure
/// cools, i.e. thermal radiation out exceeds absorbed solar plus absorbed
/// atmospheric down-welling radiation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CoolingReport {
    /// Solar power absorbed by the structure, W/m².
    pub solar_absorbed_power: Scalar,
    /// Thermal power radiated by the structure at its own temperature, W/m².
    pub thermal_radiated_power: Scalar,
    /// Atmospheric down-welling power reabsorbed by the structure, W/m².
    pub atmospheric_absorbed_power: Scalar,
    /// thermal_radiated − solar_absorbed − atmospheric_absorbed, W/m².
    pub net_cooling_power: Scalar,
}

/// Solar power absorbed: ∫ε_solar(λ)·S(λ) dλ, where `solar_spectrum` is a
/// spectral irradiance in W·m⁻³ resampled onto the grid and `emissivity`
/// was computed at the solar incidence angle.
#[must_use]
pub fn solar_absorbed_power(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    solar_spectrum: &[Scalar],
) -> Scalar {
    assert_eq!(wavelengths_m.len(), emissivity.len());
    assert_eq!(wavelengths_m.len(), solar_spectrum.len());
    let absorbed: Vec<Scalar> =
        emissivity.iter().zip(solar_spectrum).map(|(&e, &s)| e * s).collect();
    trapezoid(wavelengths_m, &absorbed)
}

/// Thermal power radiated by the structure at `temperature_k`:
/// π·∫ε(λ)·ρ(λ, T) dλ.
#[must_use]
pub fn thermal_radiated_power(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    temperature_k: Scalar,
) -> Scalar {
    emitted_power_density(wavelengths_m, emissivity, temperature_k)
}

/// Atmospheric down-welling power reabsorbed by the structure:
/// π·∫ε(λ)·(1 − 𝒯_atm(λ))·ρ(λ, T_ambient) dλ, with the atmospheric
/// emissivity taken as 1 − 𝒯 per Kirchhoff.
#[must_use]
pub fn atmospheric_absorbed_power(
    wavelengths_m: &[Scalar],
    emissivity: &[Scalar],
    atmospheric_transmissivity: &[Scalar],
    ambient_temperature_k: Scalar,
) -> Scalar {
    assert_eq!(wavelengths_m.len(), emissivity.len());
    assert_eq!(wavelengths_m.len(), atmospheric_transmissivity.len());
    let absorbed: Vec<Scalar> = wavelengths_m
        .iter()
        .zip(emissivity.iter().zip(atmospheric_transmissivity))
        .map(|(&w, (&e, &t))| {
            PI * e * (1.0 - t) * blackbody_spectral_radiance(w, ambient_temperature_k)
        })
        .collect();
    trapezoid(wavelengths_m, &absorbed)
}

/// Computes the full radiative-cooling balance.
///
/// `emissivity_thermal` is the emissivity spectrum at the thermal-emission
/// geometry; `emissivity_solar` the one at the solar incidence angle.
#[must_use]
pub fn cooling_report(
    wavelengths_m: &[Scalar],
    emissivity_thermal: &[Scalar],
    emissivity_solar: &[Scalar],
    solar_spectrum: &[Scalar],
    atmospheric_transmissivity: &[Scalar],
    structure_temperature_k: Scalar,
    ambient_temperature_k: Scalar,
) -> CoolingReport {
    let solar = solar_absorbed_power(wavelengths_m, emissivity_solar, solar_spectrum);
    let thermal =
        thermal_radiated_power(wavelengths_m, emissivity_thermal, structure_temperature_k);
    let atmospheric = atmospheric_absorbed_power(
        wavelengths_m,
        emissivity_thermal,
        atmospheric_transmissivity,
        ambient_temperature_k,
    );
    CoolingReport {
        solar_absorbed_power: solar,
        thermal_radiated_power: thermal,
        atmospheric_absorbed_power: atmospheric,
        net_cooling_power: thermal - solar - atmospheric,
    }
}

/// Thickness gradients of the radiative-cooling balance, W·m⁻²·m⁻¹.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CoolingGradient {
    /// d(solar absorbed)/dd.
    pub solar_absorbed_power: Scalar,
    /// d(thermal radiated)/dd.
    pub thermal_radiated_power: Scalar,
    /// d(atmospheric absorbed)/dd.
    pub atmospheric_absorbed_power: Scalar,
    /// d(net cooling)/dd.
    pub net_cooling_power: Scalar,
}

/// Pushes per-wavelength emissivity gradients through the cooling balance.
/// Every term is linear in its emissivity, so this is direct substitution.
#[must_use]
pub fn cooling_gradient(
    wavelengths_m: &[Scalar],
    emissivity_thermal_gradient: &[Scalar],
    emissivity_solar_gradient: &[Scalar],
    solar_spectrum: &[Scalar],
    atmospheric_transmissivity: &[Scalar],
    structure_temperature_k: Scalar,
    ambient_temperature_k: Scalar,
) -> CoolingGradient {
    let solar =
        solar_absorbed_power(wavelengths_m, emissivity_solar_gradient, solar_spectrum);
    let thermal = thermal_radiated_power(
        wavelengths_m,
        emissivity_thermal_gradient,
        structure_temperature_k,
    );
    let atmospheric = atmospheric_absorbed_power(
        wavelengths_m,
        emissivity_thermal_gradient,
        atmospheric_transmissivity,
        ambient_temperature_k,
    );
    CoolingGradient {
        solar_absorbed_power: solar,
        thermal_radiated_power: thermal,
        atmospheric_absorbed_power: atmospheric,
        net_cooling_power: thermal - solar - atmospheric,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::sweep::wavelength_linspace;

    #[test]
    fn blackbody_power_density_matches_stefan_boltzmann() {
        let grid = wavelength_linspace(100.0e-9, 30_000.0e-9, 10_000).unwrap();
        let temperature = 1500.0;
        let integrated = blackbody_power_density(&grid, temperature);
        assert_relative_eq!(
            integrated,
            stefan_boltzmann_power(temperature),
            max_relative = 0.01
        );
    }

    #[test]
    fn planck_curve_peaks_near_the_wien_wavelength() {
        let temperature = 1500.0;
        let grid = wavelength_linspace(500.0e-9, 10_000.0e-9, 2000).unwrap();
        let spectrum = blackbody_spectrum(&grid, temperature);
        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| grid[i])
            .unwrap();
        // Wien displacement: λ_max ≈ 2.898e-3 / T.
        assert_relative_eq!(peak, 2.898e-3 / temperature, max_relative = 0.01);
    }

    #[test]
    fn photopic_fit_peaks_in_the_green() {
        assert_relative_eq!(photopic_luminosity(559.0e-9), 1.019, max_relative = 1.0e-6);
        assert!(photopic_luminosity(559.0e-9) > photopic_luminosity(450.0e-9));
        assert!(photopic_luminosity(559.0e-9) > photopic_luminosity(700.0e-9));
        assert!(photopic_luminosity(10.0e-6) < 1.0e-10);
    }

    #[test]
    fn gray_emitter_efficiencies_are_well_behaved() {
        let grid = wavelength_linspace(400.0e-9, 7000.0e-9, 1000).unwrap();
        let emissivity = vec![1.0; grid.len()];
        let report = stpv_report(&grid, &emissivity, 5000.0, 2254.0e-9);
        assert!(report.power_density > 0.0);
        assert!(report.power_density < stefan_boltzmann_power(5000.0));
        assert!((0.0..1.0).contains(&report.spectral_efficiency));
        assert!((0.0..1.0).contains(&report.luminous_efficiency));
    }

    #[test]
    fn bandgap_beyond_the_grid_gives_unit_spectral_efficiency() {
        let grid = wavelength_linspace(400.0e-9, 7000.0e-9, 100).unwrap();
        let emissivity = vec![0.5; grid.len()];
        let eta = stpv_spectral_efficiency(&grid, &emissivity, 3000.0, 1.0);
        assert_relative_eq!(eta, 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn zero_emissivity_gradient_produces_zero_figure_gradients() {
        let grid = wavelength_linspace(400.0e-9, 7000.0e-9, 100).unwrap();
        let emissivity = vec![0.4; grid.len()];
        let zero = vec![0.0; grid.len()];
        let gradient = stpv_gradient(&grid, &emissivity, &zero, 3000.0, 2254.0e-9);
        assert_eq!(gradient.power_density, 0.0);
        assert_eq!(gradient.spectral_efficiency, 0.0);
        assert_eq!(gradient.luminous_efficiency, 0.0);
    }

    #[test]
    fn stpv_gradient_matches_a_perturbed_recomputation() {
        // Perturb a synthetic emissivity by h·g and compare the analytic
        // directional derivative against the finite difference.
        let grid = wavelength_linspace(400.0e-9, 7000.0e-9, 400).unwrap();
        let temperature = 4000.0;
        let bandgap = 2254.0e-9;
        let emissivity: Vec<Scalar> = grid
            .iter()
            .map(|&w| 0.5 + 0.3 * (w * 4.0e6).sin())
            .collect();
        let direction: Vec<Scalar> = grid
            .iter()
            .map(|&w| (w * 9.0e5).cos())
            .collect();

        let h = 1.0e-4;
        let perturbed: Vec<Scalar> = emissivity
            .iter()
            .zip(&direction)
            .map(|(&e, &g)| e + h * g)
            .collect();
        let base = stpv_report(&grid, &emissivity, temperature, bandgap);
        let moved = stpv_report(&grid, &perturbed, temperature, bandgap);
        let analytic = stpv_gradient(&grid, &emissivity, &direction, temperature, bandgap);

        assert_relative_eq!(
            (moved.power_density - base.power_density) / h,
            analytic.power_density,
            max_relative = 1.0e-3,
            epsilon = 1.0
        );
        assert_relative_eq!(
            (moved.spectral_efficiency - base.spectral_efficiency) / h,
            analytic.spectral_efficiency,
            max_relative = 1.0e-3,
            epsilon = 1.0e-8
        );
        assert_relative_eq!(
            (moved.luminous_efficiency - base.luminous_efficiency) / h,
            analytic.luminous_efficiency,
            max_relative = 1.0e-3,
            epsilon = 1.0e-8
        );
    }

    #[test]
    fn cooling_balance_signs_are_physical() {
        let grid = wavelength_linspace(300.0e-9, 20_000.0e-9, 500).unwrap();
        // Selective emitter: transparent to sunlight, black in the 8-13 µm window.
        let emissivity_thermal: Vec<Scalar> = grid
            .iter()
            .map(|&w| if (8.0e-6..=13.0e-6).contains(&w) { 0.9 } else { 0.05 })
            .collect();
        let emissivity_solar = vec![0.05; grid.len()];
        // Solar proxy: diluted 5778 K blackbody; atmosphere transparent in the window.
        let solar_spectrum: Vec<Scalar> = grid
            .iter()
            .map(|&w| 6.87e-5 * PI * blackbody_spectral_radiance(w, 5778.0))
            .collect();
        let atmospheric_transmissivity: Vec<Scalar> = grid
            .iter()
            .map(|&w| if (8.0e-6..=13.0e-6).contains(&w) { 0.9 } else { 0.2 })
            .collect();

        let report = cooling_report(
            &grid,
            &emissivity_thermal,
            &emissivity_solar,
            &solar_spectrum,
            &atmospheric_transmissivity,
            300.0,
            300.0,
        );
        assert!(report.solar_absorbed_power > 0.0);
        assert!(report.thermal_radiated_power > 0.0);
        assert!(report.atmospheric_absorbed_power > 0.0);
        assert_relative_eq!(
            report.net_cooling_power,
            report.thermal_radiated_power
                - report.solar_absorbed_power
                - report.atmospheric_absorbed_power,
            max_relative = 1.0e-12
        );
        // The window emitter radiates more than it reabsorbs from the sky.
        assert!(report.thermal_radiated_power > report.atmospheric_absorbed_power);
    }

    #[test]
    fn tin_emitter_stpv_gradients_match_centered_differences() {
        use crate::materials::{ConstantIndex, LorentzDrudeModel, RefractiveIndexModel};
        use crate::stack::{Polarization, Stack};
        use crate::tmm::TmmSolver;

        let grid = wavelength_linspace(400.0e-9, 7000.0e-9, 300).unwrap();
        let air = ConstantIndex::air();
        let tin = LorentzDrudeModel::titanium_nitride();
        let layers: &[(&dyn RefractiveIndexModel, Scalar)] =
            &[(&air, 0.0), (&tin, 400.0e-9), (&air, 0.0)];
        let stack = Stack::from_materials(&grid, layers).unwrap();
        let solver = TmmSolver::new(stack, 0.0, Polarization::S);

        let temperature = 5000.0;
        let bandgap = 2254.0e-9;
        let emissivity = solver.spectrum().unwrap().emissivity;
        let gradient = solver.spectrum_gradient(1).unwrap().emissivity;
        let analytic = stpv_gradient(&grid, &emissivity, &gradient, temperature, bandgap);

        let delta = 1.0e-9;
        let forward = solver.with_thickness(1, 400.0e-9 + delta).unwrap();
        let backward = solver.with_thickness(1, 400.0e-9 - delta).unwrap();
        let f = stpv_report(&grid, &forward.spectrum().unwrap().emissivity, temperature, bandgap);
        let b = stpv_report(&grid, &backward.spectrum().unwrap().emissivity, temperature, bandgap);

        let fd_power = (f.power_density - b.power_density) / (2.0 * delta);
        let fd_spectral = (f.spectral_efficiency - b.spectral_efficiency) / (2.0 * delta);
        let fd_luminous = (f.luminous_efficiency - b.luminous_efficiency) / (2.0 * delta);

        assert_relative_eq!(
            analytic.power_density,
            fd_power,
            max_relative = 0.01,
            epsilon = 1.0e-3 * fd_power.abs().max(1.0)
        );
        assert_relative_eq!(
            analytic.spectral_efficiency,
            fd_spectral,
            max_relative = 0.01,
            epsilon = 1.0e-3 * fd_spectral.abs().max(1.0e-6)
        );
        assert_relative_eq!(
            analytic.luminous_efficiency,
            fd_luminous,
            max_relative = 0.01,
            epsilon = 1.0e-3 * fd_luminous.abs().max(1.0e-6)
        );
    }

    #[test]
    fn cooling_stack_gradients_match_centered_differences() {
        use crate::materials::{ConstantIndex, DrudeModel, RefractiveIndexModel};
        use crate::stack::{Polarization, Stack};
        use crate::tmm::TmmSolver;

        let grid = wavelength_linspace(300.0e-9, 20_000.0e-9, 300).unwrap();
        let air = ConstantIndex::air();
        let silica = ConstantIndex::silica();
        let silver = DrudeModel::silver();
        let layers: &[(&dyn RefractiveIndexModel, Scalar)] = &[
            (&air, 0.0),
            (&silica, 230.0e-9),
            (&silver, 200.0e-9),
            (&air, 0.0),
        ];
        let stack = Stack::from_materials(&grid, layers).unwrap();

        let solar_angle = 0.1;
        let thermal = TmmSolver::new(stack.clone(), 0.0, Polarization::S);
        let solar = TmmSolver::new(stack, solar_angle, Polarization::S);

        let solar_spectrum: Vec<Scalar> = grid
            .iter()
            .map(|&w| 6.87e-5 * PI * blackbody_spectral_radiance(w, 5778.0))
            .collect();
        let transmissivity: Vec<Scalar> = grid
            .iter()
            .map(|&w| if (8.0e-6..=13.0e-6).contains(&w) { 0.9 } else { 0.3 })
            .collect();

        let balance = |thermal: &TmmSolver, solar: &TmmSolver| -> CoolingReport {
            cooling_report(
                &grid,
                &thermal.spectrum().unwrap().emissivity,
                &solar.spectrum().unwrap().emissivity,
                &solar_spectrum,
                &transmissivity,
                300.0,
                290.0,
            )
        };

        let analytic = cooling_gradient(
            &grid,
            &thermal.spectrum_gradient(1).unwrap().emissivity,
            &solar.spectrum_gradient(1).unwrap().emissivity,
            &solar_spectrum,
            &transmissivity,
            300.0,
            290.0,
        );

        let delta = 1.0e-9;
        let f = balance(
            &thermal.with_thickness(1, 230.0e-9 + delta).unwrap(),
            &solar.with_thickness(1, 230.0e-9 + delta).unwrap(),
        );
        let b = balance(
            &thermal.with_thickness(1, 230.0e-9 - delta).unwrap(),
            &solar.with_thickness(1, 230.0e-9 - delta).unwrap(),
        );

        let checks = [
            (
                analytic.solar_absorbed_power,
                (f.solar_absorbed_power - b.solar_absorbed_power) / (2.0 * delta),
            ),
            (
                analytic.thermal_radiated_power,
                (f.thermal_radiated_power - b.thermal_radiated_power) / (2.0 * delta),
            ),
            (
                analytic.atmospheric_absorbed_power,
                (f.atmospheric_absorbed_power - b.atmospheric_absorbed_power) / (2.0 * delta),
            ),
            (
                analytic.net_cooling_power,
                (f.net_cooling_power - b.net_cooling_power) / (2.0 * delta),
            ),
        ];
        for (analytic_value, numeric_value) in checks {
            assert_relative_eq!(
                analytic_value,
                numeric_value,
                max_relative = 0.01,
                epsilon = 1.0e-3 * numeric_value.abs().max(1.0)
            );
        }
    }

    #[test]
    fn cooling_gradient_is_linear_in_the_emissivity_gradient() {
        let grid = wavelength_linspace(300.0e-9, 20_000.0e-9, 200).unwrap();
        let direction: Vec<Scalar> = grid.iter().map(|&w| (w * 3.0e5).sin()).collect();
        let doubled: Vec<Scalar> = direction.iter().map(|&g| 2.0 * g).collect();
        let solar_spectrum: Vec<Scalar> = grid
            .iter()
            .map(|&w| 6.87e-5 * PI * blackbody_spectral_radiance(w, 5778.0))
            .collect();
        let transmissivity = vec![0.5; grid.len()];

        let g1 = cooling_gradient(
            &grid,
            &direction,
            &direction,
            &solar_spectrum,
            &transmissivity,
            300.0,
            290.0,
        );
        let g2 = cooling_gradient(
            &grid,
            &doubled,
            &doubled,
            &solar_spectrum,
            &transmissivity,
            300.0,
            290.0,
        );
        assert_relative_eq!(g2.net_cooling_power, 2.0 * g1.net_cooling_power, max_relative = 1.0e-12);
        assert_relative_eq!(
            g2.thermal_radiated_power,
            2.0 * g1.thermal_radiated_power,
            max_relative = 1.0e-12
        );
    }
}
