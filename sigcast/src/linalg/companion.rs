use alloc::vec::Vec;
use nalgebra::{ComplexField, DMatrix, RealField};
use sigcast_core::{Complex, Error, RealFloat, Result};

///
/// Create a companion matrix.
///
/// For the polynomial `c[0]·zᵐ + c[1]·zᵐ⁻¹ + … + c[m]` the first row holds
/// `-c[1..] / c[0]` and the sub-diagonal is ones. Its eigenvalues are the roots of
/// the polynomial.
///
/// ```
/// use nalgebra::matrix;
/// use sigcast::linalg::companion;
///
/// let m = companion(&[1.0f64, -10.0, 31.0, -30.0]).unwrap();
/// assert_eq!(m, matrix![10., -31., 30.; 1., 0., 0.; 0., 1., 0.]);
/// ```
pub fn companion<T>(coeffs: &[T]) -> Result<DMatrix<T>>
where
    T: ComplexField + Copy,
{
    if coeffs.len() < 2 {
        return Err(Error::invalid_arg(
            "coeffs",
            "companion requires at least 2 coefficients",
        ));
    }
    let a0 = coeffs[0];
    if a0.is_zero() {
        return Err(Error::invalid_arg(
            "coeffs",
            "leading coefficient must be non-zero",
        ));
    }
    let m = coeffs.len() - 1;
    let mut matrix = DMatrix::<T>::zeros(m, m);
    for (i, ai) in coeffs.iter().skip(1).enumerate() {
        matrix[(0, i)] = -*ai / a0;
    }
    for i in 1..m {
        matrix[(i, i - 1)] = T::one();
    }
    Ok(matrix)
}

/// Roots of the polynomial `c[0]·zᵐ + … + c[m]`, from the eigenvalues of its companion
/// matrix. A constant polynomial has no roots.
pub fn polynomial_roots<F>(coeffs: &[Complex<F>]) -> Result<Vec<Complex<F>>>
where
    F: RealField + RealFloat,
{
    if coeffs.len() == 1 {
        return Ok(Vec::new());
    }
    let matrix = companion(coeffs)?;
    matrix
        .eigenvalues()
        .map(|values| values.iter().copied().collect())
        .ok_or_else(|| Error::invalid_arg("coeffs", "schur decomposition did not converge"))
}
