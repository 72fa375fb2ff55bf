use alloc::vec::Vec;
use sigcast_core::{vector, Complex, Error, RealFloat, Result, Sample};

use super::validate_coefficients;

/// Filter data `x` with an IIR or FIR filter.
///
/// A direct form II transposed implementation of the standard difference equation
///
/// ```text
/// a[0]*y[m] = b[0]*x[m] + b[1]*x[m-1] + ... + b[M]*x[m-M]
///                       - a[1]*y[m-1] - ... - a[N]*y[m-N]
/// ```
///
/// ## Parameters
/// * `b` : The numerator coefficient vector.
/// * `a` : The denominator coefficient vector. If ``a[0]`` is not 1, then both `a` and `b`
///   are normalized by ``a[0]``. The shorter of `a` and `b` is zero-padded to
///   `n = max(len(a), len(b))`.
/// * `x` : Input samples. May be empty, in which case the state passes through.
/// * `zi` : Initial conditions for the filter delays, at most `n - 1` long and zero-padded
///   on the trailing side. `None` is initial rest. See [super::lfiltic].
///
/// ## Returns
/// * `y` : The output of the digital filter, same length as `x`.
/// * `zf` : The final filter delay values, length `n - 1`.
///
/// ## Errors
/// Empty `a` or `b`, ``a[0] == 0``, or `zi` longer than `n - 1`.
///
/// # Examples
/// ```
/// use sigcast::signal::filter::lfilter;
///
/// let (y, zf) = lfilter(&[0.25, 0.25], &[1.0, -0.5], &[1.0], Some([1.0].as_slice())).unwrap();
/// assert_eq!(y, [1.25]);
/// assert_eq!(zf, [0.875]);
/// ```
pub fn lfilter<T: Sample>(
    b: &[T],
    a: &[T],
    x: &[T],
    zi: Option<&[T]>,
) -> Result<(Vec<T>, Vec<T>)> {
    let a0 = validate_coefficients(b, a)?;
    let n = a.len().max(b.len());
    let zi = zi.unwrap_or_default();
    if zi.len() > n - 1 {
        return Err(Error::LengthMismatch {
            arg: "zi",
            expected: n - 1,
            got: zi.len(),
        });
    }

    let bn = vector::div_scalar(&vector::pad_trailing(b, n), a0);
    let an = vector::div_scalar(&vector::pad_trailing(a, n), a0);
    let mut z = vector::pad_trailing(zi, n);

    let mut y = Vec::with_capacity(x.len());
    for &xm in x {
        let ym = bn[0] * xm + z[0];
        for i in 1..n {
            z[i - 1] = bn[i] * xm + z[i] - an[i] * ym;
        }
        y.push(ym);
    }
    z.truncate(n - 1);
    Ok((y, z))
}

/// Complex-valued [`lfilter`].
///
/// ## Errors
/// As [`lfilter`].
pub fn lfilter_complex<F: RealFloat>(
    b: &[Complex<F>],
    a: &[Complex<F>],
    x: &[Complex<F>],
    zi: Option<&[Complex<F>]>,
) -> Result<(Vec<Complex<F>>, Vec<Complex<F>>)> {
    lfilter(b, a, x, zi)
}
