//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::Matrix2;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for field amplitudes and indices.
pub type CScalar = num_complex::Complex<Scalar>;
/// 2×2 complex matrix type shared by interface, propagation and transfer matrices.
pub type CMatrix2 = Matrix2<CScalar>;

/// Trapezoidal quadrature of samples `y` over abscissae `x`.
///
/// Accumulation is fixed left-to-right so that repeated evaluation of the
/// same arrays is bit-identical.
#[must_use]
pub fn trapezoid(x: &[Scalar], y: &[Scalar]) -> Scalar {
    assert_eq!(x.len(), y.len(), "abscissae and samples must have equal length");
    let mut acc = 0.0;
    for i in 1..x.len() {
        acc += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    acc
}

/// Derivative of |z|² given z and dz/dx: d|z|²/dx = 2·Re(z̄·dz/dx).
#[inline]
#[must_use]
pub fn magnitude_squared_derivative(z: CScalar, dz: CScalar) -> Scalar {
    2.0 * (z.conj() * dz).re
}
