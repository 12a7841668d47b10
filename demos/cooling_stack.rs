use std::f64::consts::PI;

use thinfilm::materials::{ConstantIndex, DrudeModel, RefractiveIndexModel};
use thinfilm::stack::{Polarization, Stack};
use thinfilm::sweep::wavelength_linspace;
use thinfilm::therml::{blackbody_spectral_radiance, cooling_report};
use thinfilm::tmm::TmmSolver;

fn main() -> Result<(), thinfilm::errors::ThinFilmError> {
    // Air | SiO2 230 nm | HfO2 485 nm | Ag 200 nm | Air daytime-cooling stack.
    let grid = wavelength_linspace(300e-9, 20_000e-9, 1000)?;
    let air = ConstantIndex::air();
    let silica = ConstantIndex::silica();
    let hafnia = ConstantIndex::hafnia();
    let silver = DrudeModel::silver();
    let layers: &[(&dyn RefractiveIndexModel, f64)] = &[
        (&air, 0.0),
        (&silica, 230e-9),
        (&hafnia, 485e-9),
        (&silver, 200e-9),
        (&air, 0.0),
    ];
    let stack = Stack::from_materials(&grid, layers)?;

    let solar_angle = 30.0_f64.to_radians();
    let thermal = TmmSolver::new(stack.clone(), 0.0, Polarization::S);
    let solar = TmmSolver::new(stack, solar_angle, Polarization::S);

    let emissivity_thermal = thermal.spectrum()?.emissivity;
    let emissivity_solar = solar.spectrum()?.emissivity;

    // Diluted 5778 K blackbody stands in for AM1.5; crude 8-13 µm sky window.
    let solar_spectrum: Vec<f64> = grid
        .iter()
        .map(|&w| 6.87e-5 * PI * blackbody_spectral_radiance(w, 5778.0))
        .collect();
    let atmospheric_transmissivity: Vec<f64> = grid
        .iter()
        .map(|&w| if (8e-6..=13e-6).contains(&w) { 0.85 } else { 0.25 })
        .collect();

    let report = cooling_report(
        &grid,
        &emissivity_thermal,
        &emissivity_solar,
        &solar_spectrum,
        &atmospheric_transmissivity,
        300.0,
        290.0,
    );

    println!("wavelength(m), emissivity");
    for (w, e) in grid.iter().zip(&emissivity_thermal).step_by(100) {
        println!("{w:.6e}, {e:.6e}");
    }
    println!("solar absorbed:        {:.4e} W/m^2", report.solar_absorbed_power);
    println!("thermally radiated:    {:.4e} W/m^2", report.thermal_radiated_power);
    println!("atmospheric reabsorbed: {:.4e} W/m^2", report.atmospheric_absorbed_power);
    println!("net cooling power:     {:.4e} W/m^2", report.net_cooling_power);
    Ok(())
}
