//! Interface (dynamical) and propagation matrix construction.
//!
//! Convention, fixed crate-wide: row 0 carries the forward-wave amplitude
//! equation, row 1 the backward one. Interface matrices are
//! s: [[1, 1], [ñ·cosθ, −ñ·cosθ]] and p: [[cosθ, cosθ], [ñ, −ñ]].
//! Reflectivity and transmissivity depend on relative phases between
//! matrices, so no builder may deviate from this sign convention.

use crate::math::{CMatrix2, CScalar, Scalar};
use crate::stack::Polarization;

/// Interface (dynamical) matrix of one layer for the given polarization.
#[must_use]
pub fn interface_matrix(n: CScalar, cos_theta: CScalar, polarization: Polarization) -> CMatrix2 {
    let one = CScalar::new(1.0, 0.0);
    match polarization {
        Polarization::S => {
            let nc = n * cos_theta;
            CMatrix2::new(one, one, nc, -nc)
        }
        Polarization::P => CMatrix2::new(cos_theta, cos_theta, n, -n),
    }
}

/// Propagation matrix diag(e^{−i·kz·d}, e^{+i·kz·d}) of a finite layer of
/// thickness `d` meters. Semi-infinite boundary layers never receive one.
#[must_use]
pub fn propagation_matrix(kz: CScalar, thickness_m: Scalar) -> CMatrix2 {
    let zero = CScalar::new(0.0, 0.0);
    let phase = CScalar::i() * kz * thickness_m;
    CMatrix2::new((-phase).exp(), zero, zero, phase.exp())
}

/// Thickness derivative of [`propagation_matrix`]:
/// diag(−i·kz·e^{−i·kz·d}, +i·kz·e^{+i·kz·d}).
#[must_use]
pub fn propagation_matrix_derivative(kz: CScalar, thickness_m: Scalar) -> CMatrix2 {
    let zero = CScalar::new(0.0, 0.0);
    let j_kz = CScalar::i() * kz;
    let phase = j_kz * thickness_m;
    CMatrix2::new(-j_kz * (-phase).exp(), zero, zero, j_kz * phase.exp())
}
