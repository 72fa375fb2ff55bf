//! Convolution and correlation of finite sequences.
//!
//! The spectral methods evaluate the products in the frequency domain over a transform of
//! length `M = 2·max(len u, len v)`. The direct methods evaluate the same sums in the time
//! domain through [`sigcast_core::num_rs`], placing correlation lags exactly where the
//! circular spectral product puts them, so both methods agree up to rounding.

use crate::kernel::{
    read_nonempty, write_exact, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D,
    Write1D,
};
use crate::signal::fft::{fft, ifft};
use crate::signal::traits::{Autocorrelate1D, Convolve1D, Correlate1D};
use alloc::vec::Vec;
use itertools::Itertools;
use ndarray::ArrayView1;
use num_traits::Float;
use sigcast_core::num_rs::{self, ConvolveMode};
use sigcast_core::{vector, Error, RealFloat, Result, Sample};

/// How a convolution or correlation is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMethod {
    /// Multiply spectra and invert.
    #[default]
    Spectral,
    /// Time-domain sums.
    Direct,
}

/// Linear convolution of `u` and `v` through the FFT.
///
/// Returns `len u + len v − 1` samples. Real inputs are lifted to complex and the result is
/// projected back onto the real line.
///
/// # Errors
/// Either operand is empty.
///
/// # Examples
/// ```
/// use sigcast::signal::convolve::convolve;
///
/// let y = convolve(&[1.0f64, 2.0, 3.0], &[1.0, 2.0]).unwrap();
/// for (a, b) in y.iter().zip([1.0, 4.0, 7.0, 6.0]) {
///     assert!((a - b).abs() < 1e-12);
/// }
/// ```
pub fn convolve<T: Sample>(u: &[T], v: &[T]) -> Result<Vec<T>> {
    spectral_product(u, v, false)
}

/// Cross-correlation of `u` against `v` through the FFT, `fft(u)·conj(fft(v))`.
///
/// Element `k < len u` is the lag-`k` sum `Σⱼ u[j + k]·conj(v[j])`; the remaining
/// `len v − 1` elements continue the circular correlation over the padded length.
///
/// # Errors
/// Either operand is empty.
pub fn correlate<T: Sample>(u: &[T], v: &[T]) -> Result<Vec<T>> {
    spectral_product(u, v, true)
}

/// Autocorrelation through the FFT, padded to `2·len u`; returns `2·len u − 1` samples.
///
/// # Errors
/// Empty input.
pub fn autocorrelate<T: Sample>(u: &[T]) -> Result<Vec<T>> {
    spectral_product(u, u, true)
}

/// Time-domain counterpart of [`convolve`].
///
/// # Errors
/// Either operand is empty.
pub fn convolve_direct<T: Sample>(u: &[T], v: &[T]) -> Result<Vec<T>> {
    ensure_operands(u, v)?;
    let full = num_rs::convolve(ArrayView1::from(u), ArrayView1::from(v), ConvolveMode::Full)?;
    Ok(full.to_vec())
}

/// Time-domain counterpart of [`correlate`].
///
/// # Errors
/// Either operand is empty.
pub fn correlate_direct<T: Sample>(u: &[T], v: &[T]) -> Result<Vec<T>> {
    ensure_operands(u, v)?;
    // full[n] holds lag n - (len v - 1)
    let full = num_rs::correlate(ArrayView1::from(u), ArrayView1::from(v), ConvolveMode::Full)?;
    let m = 2 * u.len().max(v.len());
    let mut out = vector::zeros(u.len() + v.len() - 1);
    for (n, value) in full.iter().enumerate() {
        let index = (n + m - (v.len() - 1)) % m;
        if let Some(slot) = out.get_mut(index) {
            *slot = *value;
        }
    }
    Ok(out)
}

/// Time-domain counterpart of [`autocorrelate`].
///
/// # Errors
/// Empty input.
pub fn autocorrelate_direct<T: Sample>(u: &[T]) -> Result<Vec<T>> {
    correlate_direct(u, u)
}

/// Sliding dot product `out[i] = Σⱼ conj(u[j])·v[i + j]`.
///
/// Returns `len v − len u + 1` samples.
///
/// # Errors
/// Either operand is empty, or `u` is longer than `v`.
pub fn xcorr_valid<T: Sample>(u: &[T], v: &[T]) -> Result<Vec<T>> {
    ensure_operands(u, v)?;
    ensure_fits(u, v)?;
    let valid = num_rs::correlate(ArrayView1::from(v), ArrayView1::from(u), ConvolveMode::Valid)?;
    Ok(valid.to_vec())
}

/// Distance correlation `out[i] = 1 / (Σⱼ |u[j] − v[i + j]| + 1)`.
///
/// Values lie in `(0, 1]`, reaching `1` where `u` matches `v` exactly.
///
/// # Errors
/// Either operand is empty, or `u` is longer than `v`.
pub fn dcorr<F: RealFloat>(u: &[F], v: &[F]) -> Result<Vec<F>> {
    ensure_operands(u, v)?;
    ensure_fits(u, v)?;
    Ok(v.windows(u.len())
        .map(|window| {
            let distance: F = u
                .iter()
                .zip(window)
                .map(|(a, b)| Float::abs(*a - *b))
                .sum();
            F::one() / (distance + F::one())
        })
        .collect())
}

/// Positive lag of `b` relative to the first half of `a`.
///
/// The first half of `a` is slid along `b` with [`dcorr`]; the index of the first interior
/// local maximum is the lag. Returns `0` when there is none.
///
/// # Errors
/// `a` has fewer than two samples, or its first half is longer than `b`.
pub fn detect_lag<F: RealFloat>(a: &[F], b: &[F]) -> Result<usize> {
    let d = dcorr(&a[..a.len() / 2], b)?;
    let lag = d
        .iter()
        .tuple_windows()
        .position(|(prev, here, next)| prev < here && here > next)
        .map_or(0, |i| i + 1);
    tracing::trace!(lag, "detected lag");
    Ok(lag)
}

fn ensure_operands<T>(u: &[T], v: &[T]) -> Result<()> {
    if u.is_empty() {
        return Err(Error::invalid_arg("u", "operand must not be empty"));
    }
    if v.is_empty() {
        return Err(Error::invalid_arg("v", "operand must not be empty"));
    }
    Ok(())
}

fn ensure_fits<T>(u: &[T], v: &[T]) -> Result<()> {
    if u.len() > v.len() {
        return Err(Error::invalid_arg("u", "must not be longer than `v`"));
    }
    Ok(())
}

fn spectral_product<T: Sample>(u: &[T], v: &[T], conjugate: bool) -> Result<Vec<T>> {
    ensure_operands(u, v)?;
    let m = 2 * u.len().max(v.len());
    tracing::trace!(u = u.len(), v = v.len(), m, conjugate, "spectral product");
    let fu = fft(&vector::pad_trailing(&vector::to_complex(u), m))?;
    let mut fv = fft(&vector::pad_trailing(&vector::to_complex(v), m))?;
    if conjugate {
        fv = vector::conj(&fv);
    }
    let full = ifft(&vector::mul(&fu, &fv))?;
    Ok(vector::from_complex(&full[..u.len() + v.len() - 1]))
}

fn run_pair<T: Sample>(
    method: ConvolveMethod,
    spectral: fn(&[T], &[T]) -> Result<Vec<T>>,
    direct: fn(&[T], &[T]) -> Result<Vec<T>>,
    u: &[T],
    v: &[T],
) -> core::result::Result<Vec<T>, ExecInvariantViolation> {
    let y = match method {
        ConvolveMethod::Spectral => spectral(u, v)?,
        ConvolveMethod::Direct => direct(u, v)?,
    };
    Ok(y)
}

/// Constructor config for [`ConvolveKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvolveConfig {
    /// Evaluation method.
    pub method: ConvolveMethod,
}

/// Trait-first full convolution kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolveKernel {
    method: ConvolveMethod,
}

impl KernelLifecycle for ConvolveKernel {
    type Config = ConvolveConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        Ok(Self {
            method: config.method,
        })
    }
}

impl<T: Sample> Convolve1D<T> for ConvolveKernel {
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> core::result::Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let y = self.run_alloc(in1, in2)?;
        write_exact(&y, out)
    }

    fn run_alloc<I1, I2>(
        &self,
        in1: &I1,
        in2: &I2,
    ) -> core::result::Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
    {
        let u = read_nonempty(in1, "in1")?;
        let v = read_nonempty(in2, "in2")?;
        run_pair(self.method, convolve, convolve_direct, u, v)
    }
}

/// Constructor config for [`CorrelateKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorrelateConfig {
    /// Evaluation method.
    pub method: ConvolveMethod,
}

/// Trait-first cross-correlation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelateKernel {
    method: ConvolveMethod,
}

impl KernelLifecycle for CorrelateKernel {
    type Config = CorrelateConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        Ok(Self {
            method: config.method,
        })
    }
}

impl<T: Sample> Correlate1D<T> for CorrelateKernel {
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> core::result::Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let y = self.run_alloc(in1, in2)?;
        write_exact(&y, out)
    }

    fn run_alloc<I1, I2>(
        &self,
        in1: &I1,
        in2: &I2,
    ) -> core::result::Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
    {
        let u = read_nonempty(in1, "in1")?;
        let v = read_nonempty(in2, "in2")?;
        run_pair(self.method, correlate, correlate_direct, u, v)
    }
}

/// Constructor config for [`AutocorrelateKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutocorrelateConfig {
    /// Evaluation method.
    pub method: ConvolveMethod,
}

/// Trait-first autocorrelation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutocorrelateKernel {
    method: ConvolveMethod,
}

impl KernelLifecycle for AutocorrelateKernel {
    type Config = AutocorrelateConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        Ok(Self {
            method: config.method,
        })
    }
}

impl<T: Sample> Autocorrelate1D<T> for AutocorrelateKernel {
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
        let u = read_nonempty(input, "input")?;
        run_pair(self.method, correlate, correlate_direct, u, u)
    }
}
