use thinfilm::materials::{ConstantIndex, LorentzDrudeModel, RefractiveIndexModel};
use thinfilm::stack::{Polarization, Stack};
use thinfilm::sweep::wavelength_linspace;
use thinfilm::therml::{stpv_gradient, stpv_report};
use thinfilm::tmm::TmmSolver;

fn main() -> Result<(), thinfilm::errors::ThinFilmError> {
    // Air | TiN (400 nm) | Air selective emitter at 5000 K.
    let grid = wavelength_linspace(400e-9, 7000e-9, 1000)?;
    let air = ConstantIndex::air();
    let tin = LorentzDrudeModel::titanium_nitride();
    let layers: &[(&dyn RefractiveIndexModel, f64)] =
        &[(&air, 0.0), (&tin, 400e-9), (&air, 0.0)];
    let stack = Stack::from_materials(&grid, layers)?;
    let solver = TmmSolver::new(stack, 0.0, Polarization::S);

    let temperature = 5000.0; // K
    let bandgap = 2254e-9; // InGaAsSb-class photovoltaic cutoff

    let spectrum = solver.spectrum()?;
    let report = stpv_report(&grid, &spectrum.emissivity, temperature, bandgap);
    println!("STPV power density:      {:.6e} W/m^2", report.power_density);
    println!("spectral efficiency:     {:.6}", report.spectral_efficiency);
    println!("luminous efficiency:     {:.6}", report.luminous_efficiency);

    // Analytic thickness gradient against a centered finite difference.
    let gradient = solver.spectrum_gradient(1)?;
    let analytic = stpv_gradient(&grid, &spectrum.emissivity, &gradient.emissivity, temperature, bandgap);

    let delta = 1e-9;
    let f = solver.with_thickness(1, 400e-9 + delta)?.spectrum()?;
    let b = solver.with_thickness(1, 400e-9 - delta)?.spectrum()?;
    let forward = stpv_report(&grid, &f.emissivity, temperature, bandgap);
    let backward = stpv_report(&grid, &b.emissivity, temperature, bandgap);
    let numeric = (forward.power_density - backward.power_density) / (2.0 * delta);

    println!("d(power density)/dd analytic: {:.6e} W/m^2/m", analytic.power_density);
    println!("d(power density)/dd numeric:  {numeric:.6e} W/m^2/m");
    Ok(())
}
