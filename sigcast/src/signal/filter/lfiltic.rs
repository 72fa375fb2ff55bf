use alloc::vec::Vec;
use sigcast_core::{vector, Complex, RealFloat, Result, Sample};

use super::{lfilter, validate_coefficients};

/// Construct initial conditions for [`lfilter`] given input and output vectors.
///
/// Given a linear filter `(b, a)` and initial conditions on the output `y` and the input
/// `x`, return the initial conditions on the state vector `zi` which is used by
/// [`lfilter`] to generate the output given the input.
///
/// ## Parameters
/// * `b` : Linear filter term.
/// * `a` : Linear filter term.
/// * `y` : Initial conditions. If ``N = len(a) - 1``, then
///   ``y = {y[-1], y[-2], ..., y[-N]}``: `y[0]` is the most recent output. If `y` is too
///   short, it is padded with zeros.
/// * `x` : Initial conditions, ``x = {x[-1], x[-2], ..., x[-M]}`` with
///   ``M = len(b) - 1``. Pass an empty slice for zero input history.
///
/// ## Returns
/// The state vector, length ``max(len(a), len(b)) - 1``. Empty when both filters are
/// zeroth order.
///
/// ## Errors
/// Empty `a` or `b`, or ``a[0] == 0``.
///
/// # Examples
/// ```
/// use sigcast::signal::filter::lfiltic;
///
/// let (b, a) = ([0.25, 0.25], [1.0, -0.5]);
/// let zi = lfiltic(&b, &a, &[1.0], &[1.0]).unwrap();
/// assert_eq!(zi, [0.75]);
/// ```
pub fn lfiltic<T: Sample>(b: &[T], a: &[T], y: &[T], x: &[T]) -> Result<Vec<T>> {
    let a0 = validate_coefficients(b, a)?;
    let na = a.len();
    let nb = b.len();
    let m = na.max(nb) - 1;
    if m < 1 {
        return Ok(Vec::new());
    }

    let mut vinit = vector::zeros::<T>(m);
    if na > 1 {
        let history = vector::pad_trailing(y, na - 1);
        let taps: Vec<T> = a[1..].iter().rev().map(|ai| -*ai / a0).collect();
        let response = feedforward(&taps, &history[..na - 1])?;
        for (i, value) in response.into_iter().enumerate() {
            vinit[na - 2 - i] = value;
        }
    }

    let mut vx = vector::zeros::<T>(m);
    if nb > 1 {
        let history = vector::pad_trailing(x, nb - 1);
        let taps: Vec<T> = b[1..].iter().rev().map(|bi| *bi / a0).collect();
        let response = feedforward(&taps, &history[..nb - 1])?;
        for (i, value) in response.into_iter().enumerate() {
            vx[nb - 2 - i] = value;
        }
    }

    Ok(vector::add(&vinit, &vx))
}

/// Complex-valued [`lfiltic`].
///
/// ## Errors
/// As [`lfiltic`].
pub fn lfiltic_complex<F: RealFloat>(
    b: &[Complex<F>],
    a: &[Complex<F>],
    y: &[Complex<F>],
    x: &[Complex<F>],
) -> Result<Vec<Complex<F>>> {
    lfiltic(b, a, y, x)
}

/// Run `history` through the FIR filter `taps`.
fn feedforward<T: Sample>(taps: &[T], history: &[T]) -> Result<Vec<T>> {
    let mut unit = vector::zeros::<T>(taps.len());
    unit[0] = T::one();
    let (response, _) = lfilter(taps, &unit, history, None)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn low_pass() {
        let (b, a) = ([0.25, 0.25], [1.0, -0.5]);
        assert_eq!(lfiltic(&b, &a, &[1.0], &[1.0]).expect("lfiltic"), [0.75]);
        assert_eq!(lfiltic(&b, &a, &[1.0], &[]).expect("lfiltic"), [0.5]);
    }

    #[test]
    fn high_pass() {
        let (b, a) = ([0.25, -0.25], [1.0, 0.5]);
        assert_eq!(lfiltic(&b, &a, &[0.0], &[1.0]).expect("lfiltic"), [-0.25]);
        assert_eq!(lfiltic(&b, &a, &[0.0], &[]).expect("lfiltic"), [0.0]);
    }

    #[test]
    fn fifth_order() {
        let b = [0.25, -0.25, 0.15, -0.12, 0.2, 0.2];
        let a = [1.0, 0.5, 0.3, 0.1, 0.2, 0.3];
        let zi = lfiltic(&b, &a, &[1.0, 0.2, 0.7], &[1.0, 2.0, 3.0]).expect("lfiltic");
        let expected = [-0.94, 0.05, 0.53, 0.34, -0.1];
        assert_eq!(zi.len(), expected.len());
        for (z, e) in zi.iter().zip(expected) {
            assert_abs_diff_eq!(*z, e, epsilon = 1e-6);
        }
    }

    #[test]
    fn zeroth_order_has_no_state() {
        assert!(lfiltic(&[2.0], &[1.0], &[1.0], &[1.0])
            .expect("lfiltic")
            .is_empty());
    }

    #[test]
    fn resumes_a_filter_run() {
        let b = [0.2, 0.3, -0.1];
        let a = [1.0, -0.6, 0.25];
        let x: Vec<f64> = (0..16).map(|i| ((i * 3) % 7) as f64 - 3.0).collect();
        let (y, zf) = lfilter(&b, &a, &x, None).expect("lfilter");

        let y_hist: Vec<f64> = y.iter().rev().copied().collect();
        let x_hist: Vec<f64> = x.iter().rev().copied().collect();
        let zi = lfiltic(&b, &a, &y_hist, &x_hist).expect("lfiltic");
        for (z, e) in zi.iter().zip(&zf) {
            assert_abs_diff_eq!(*z, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn complex_matches_real_on_real_data() {
        let to_c = |v: &[f64]| v.iter().map(|r| Complex::new(*r, 0.0)).collect::<Vec<_>>();
        let b = [0.25, -0.25, 0.15];
        let a = [1.0, 0.5, 0.3];
        let zi = lfiltic(&b, &a, &[1.0, 0.2], &[1.0, 2.0]).expect("lfiltic");
        let zc = lfiltic_complex(&to_c(&b), &to_c(&a), &to_c(&[1.0, 0.2]), &to_c(&[1.0, 2.0]))
            .expect("lfiltic");
        for (c, r) in zc.iter().zip(&zi) {
            assert_abs_diff_eq!(c.re, *r, epsilon = 1e-12);
            assert_abs_diff_eq!(c.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn invalid_coefficients() {
        assert!(lfiltic(&[1.0], &[0.0, 1.0], &[1.0], &[]).is_err());
        assert!(lfiltic::<f64>(&[], &[1.0], &[], &[]).is_err());
    }
}
