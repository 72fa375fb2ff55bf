//! Forecasting by autoregressive continuation.
//!
//! A Burg model of order `len x − 1` is fitted to the history, the filter state that
//! reproduces the history is recovered with [`lfiltic`], and the all-pole filter is then
//! run on silence. The output is the model's free response.

use crate::kernel::{
    read_nonempty, write_exact, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D,
    Write1D,
};
use crate::signal::ar::arburg;
use crate::signal::filter::{lfilter, lfiltic};
use crate::signal::traits::Extrapolate1D;
use alloc::vec::Vec;
use sigcast_core::{vector, Complex, RealFloat, Result, Sample};

/// Extra samples run through the filter by [`extrapolate_complex`] before truncation.
pub const COMPLEX_GUARD: usize = 10;

/// Forecast `count` samples continuing `x`.
///
/// An identically zero history, or one with fewer than two samples, forecasts zeros.
///
/// # Errors
/// Propagates filter errors, which cannot occur for a model produced by Burg's method.
///
/// # Examples
/// ```
/// use sigcast::signal::extrapolate::extrapolate;
///
/// assert_eq!(extrapolate(&[0.0; 8], 3).unwrap(), [0.0; 3]);
/// ```
pub fn extrapolate<T: Sample>(x: &[T], count: usize) -> Result<Vec<T>> {
    forecast(x, count, 0)
}

/// Complex-valued [`extrapolate`].
///
/// The filter runs over [`COMPLEX_GUARD`] samples past the horizon and the tail is
/// dropped. The filter is causal, so the kept samples equal those of [`extrapolate`].
///
/// # Errors
/// As [`extrapolate`].
pub fn extrapolate_complex<F: RealFloat>(
    x: &[Complex<F>],
    count: usize,
) -> Result<Vec<Complex<F>>> {
    forecast(x, count, COMPLEX_GUARD)
}

fn forecast<T: Sample>(x: &[T], count: usize, guard: usize) -> Result<Vec<T>> {
    if x.len() < 2 || vector::is_zero(x) {
        tracing::debug!(len = x.len(), count, "degenerate history, forecasting zeros");
        return Ok(vector::zeros(count));
    }
    tracing::trace!(len = x.len(), count, "extrapolate");

    let ar = arburg(x, x.len() - 1)?.coefficients;
    let mut b = vector::zeros::<T>(ar.len());
    b[0] = T::one();
    let history = vector::reversed(&x[1..]);
    let zi = lfiltic(&b, &ar, &history, &[])?;
    let (mut y, _) = lfilter(&b, &ar, &vector::zeros(count + guard), Some(zi.as_slice()))?;
    y.truncate(count);
    Ok(y)
}

/// Constructor config for [`ExtrapolateKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtrapolateConfig {
    /// Forecast horizon in samples.
    pub count: usize,
}

/// Trait-first forecasting kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtrapolateKernel {
    count: usize,
}

impl ExtrapolateKernel {
    /// Forecast horizon in samples.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl KernelLifecycle for ExtrapolateKernel {
    type Config = ExtrapolateConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        Ok(Self {
            count: config.count,
        })
    }
}

impl<T: Sample> Extrapolate1D<T> for ExtrapolateKernel {
    fn run_into<I, O>(
        &self,
        input: &I,
        out: &mut O,
    ) -> core::result::Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let y = self.run_alloc(input)?;
        write_exact(&y, out)
    }

    fn run_alloc<I>(&self, input: &I) -> core::result::Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let x = read_nonempty(input, "input")?;
        Ok(extrapolate(x, self.count)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const REFERENCE_SERIES: [f64; 16] = [
        0.7796877567724873, 0.7915302788549146, 0.8010646129962299, 0.8057222742623854,
        0.8032915729866256, 0.7928232582592226, 0.775207484743498, 0.7525704516423012,
        0.7272908506274501, 0.7012812282511067, 0.6764652490733608, 0.6546240491690392,
        0.6365409527326914, 0.6219087759651647, 0.609896655287969, 0.5991957420539259,
    ];

    fn assert_close(actual: &[f64], expected: &[f64], epsilon: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(*a, *e, epsilon = epsilon);
        }
    }

    #[test]
    fn reference_series_forecast() {
        let y = extrapolate(&REFERENCE_SERIES, 4).expect("extrapolate");
        assert_close(
            &y,
            &[
                0.5882615433232496,
                0.5760033293151712,
                0.5623457915912682,
                0.5483312240866534,
            ],
            1e-6,
        );
    }

    #[test]
    fn continues_a_sinusoid() {
        let x: Vec<f64> = (0..32).map(|n| (0.3 * n as f64).sin()).collect();
        let y = extrapolate(&x, 8).expect("extrapolate");
        let truth: Vec<f64> = (32..40).map(|n| (0.3 * n as f64).sin()).collect();
        assert_close(&y, &truth, 1e-4);
    }

    #[test]
    fn continues_two_tones() {
        let tone = |n: usize| (0.3 * n as f64).sin() + 0.5 * (0.71 * n as f64).cos();
        let x: Vec<f64> = (0..24).map(tone).collect();
        let y = extrapolate(&x, 6).expect("extrapolate");
        let truth: Vec<f64> = (24..30).map(tone).collect();
        assert_close(&y, &truth, 1.5e-2);
    }

    #[test]
    fn continues_a_complex_exponential() {
        let x: Vec<Complex<f64>> = (0..16)
            .map(|n| Complex::from_polar(1.0, 0.4 * n as f64))
            .collect();
        let y = extrapolate_complex(&x, 4).expect("extrapolate");
        assert_eq!(y.len(), 4);
        for (k, v) in y.iter().enumerate() {
            let truth = Complex::from_polar(1.0, 0.4 * (16 + k) as f64);
            assert_abs_diff_eq!(v.re, truth.re, epsilon = 1e-6);
            assert_abs_diff_eq!(v.im, truth.im, epsilon = 1e-6);
        }
        assert_eq!(extrapolate(&x, 4).expect("extrapolate"), y);
    }

    #[test]
    fn degenerate_histories_forecast_zeros() {
        assert_eq!(extrapolate(&[0.0f64; 10], 5).expect("extrapolate"), [0.0; 5]);
        assert_eq!(extrapolate(&[3.0f64], 2).expect("extrapolate"), [0.0; 2]);
        assert!(extrapolate::<f64>(&[], 0).expect("extrapolate").is_empty());
        let zeros = [Complex::new(0.0f64, 0.0); 4];
        assert_eq!(
            extrapolate_complex(&zeros, 3).expect("extrapolate"),
            [Complex::new(0.0, 0.0); 3]
        );
    }

    #[test]
    fn kernel_matches_function() {
        let kernel = ExtrapolateKernel::try_new(ExtrapolateConfig { count: 4 }).expect("kernel");
        assert_eq!(kernel.count(), 4);
        let mut out = [0.0f64; 4];
        kernel.run_into(&REFERENCE_SERIES, &mut out).expect("extrapolate");
        assert_eq!(out.to_vec(), extrapolate(&REFERENCE_SERIES, 4).expect("extrapolate"));

        let empty: Vec<f64> = Vec::new();
        let err = kernel.run_alloc(&empty).expect_err("empty history must fail");
        assert_eq!(
            err,
            ExecInvariantViolation::Config(ConfigError::EmptyInput { arg: "input" })
        );
    }
}
