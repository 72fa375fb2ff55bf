//! Smoothing filters.

use crate::kernel::{
    read_nonempty, write_exact, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D,
    Write1D,
};
use crate::signal::fft::{fft, ifft};
use crate::signal::filter::lfilter;
use crate::signal::traits::Smooth1D;
use alloc::vec::Vec;
use num_traits::{Float, One, ToPrimitive};
use sigcast_core::{vector, Complex, Error, RealFloat, Result, Sample};

/// Low-pass `x` by tapering its spectrum with a Gaussian.
///
/// With `N = len x` the taper keeps bins `0..=c` and their mirrors, `c = ⌊(N/2)·cutoff⌋`,
/// weighting bin `k` by `exp(−k²/(2c²))`. `cutoff == 0` keeps only the mean. Real input
/// yields the real part of the filtered signal.
///
/// # Errors
/// Empty `x`, or `cutoff` outside `[0, 1]`.
pub fn gaussian_lowpass<T: Sample>(x: &[T], cutoff: T::Real) -> Result<Vec<T>> {
    if !in_unit_interval(cutoff) {
        return Err(Error::invalid_arg("cutoff", "cutoff must lie in [0, 1]"));
    }
    let spectrum = fft(&vector::to_complex(x))?;
    let n = spectrum.len();
    let cutoff_n = Float::floor(T::Real::from_len(n / 2) * cutoff)
        .to_usize()
        .unwrap_or(0);

    let mut taper = vector::zeros::<Complex<T::Real>>(n);
    taper[0] = Complex::from(T::Real::one());
    if cutoff_n > 0 {
        let two_sigma_sq = T::Real::from_len(2 * cutoff_n * cutoff_n);
        for k in 1..=cutoff_n {
            let kf = T::Real::from_len(k);
            let gain = Complex::from(Float::exp(-(kf * kf) / two_sigma_sq));
            taper[k] = gain;
            taper[n - k] = gain;
        }
    }

    let filtered = ifft(&vector::mul(&spectrum, &taper))?;
    Ok(vector::from_complex(&filtered))
}

fn in_unit_interval<F: RealFloat>(v: F) -> bool {
    v >= F::zero() && v <= F::one()
}

/// First-order exponential smoothing, `y[i] = (1 − r)·y[i−1] + r·x[i]` with `y[0] = x[0]`.
///
/// # Errors
/// Never for finite `response`; filter errors are propagated.
///
/// # Examples
/// ```
/// use sigcast::signal::smooth::exponential_smooth;
///
/// let y = exponential_smooth(&[2.0, 4.0, 6.0], 0.25).unwrap();
/// assert_eq!(y, [2.0, 2.5, 3.375]);
/// ```
pub fn exponential_smooth<T: Sample>(x: &[T], response: T::Real) -> Result<Vec<T>> {
    let Some(&first) = x.first() else {
        return Ok(Vec::new());
    };
    let r = T::from_real(response);
    let decay = T::one() - r;
    let zi = [decay * first];
    let (y, _) = lfilter(&[r], &[T::one(), -decay], x, Some(zi.as_slice()))?;
    Ok(y)
}

/// Smoothing method and its parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing<F> {
    /// See [`gaussian_lowpass`].
    GaussianLowpass {
        /// Fraction of the half-spectrum kept, in `[0, 1]`.
        cutoff: F,
    },
    /// See [`exponential_smooth`].
    Exponential {
        /// Weight of the newest sample.
        response: F,
    },
}

/// Constructor config for [`SmoothKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothConfig<F> {
    /// Smoothing method.
    pub method: Smoothing<F>,
}

/// Trait-first smoothing kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothKernel<F> {
    method: Smoothing<F>,
}

impl<F: RealFloat> KernelLifecycle for SmoothKernel<F> {
    type Config = SmoothConfig<F>;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        match config.method {
            Smoothing::GaussianLowpass { cutoff } if !in_unit_interval(cutoff) => {
                Err(ConfigError::InvalidArgument {
                    arg: "cutoff",
                    reason: "cutoff must lie in [0, 1]",
                })
            }
            Smoothing::Exponential { response } if !Float::is_finite(response) => {
                Err(ConfigError::InvalidArgument {
                    arg: "response",
                    reason: "response must be finite",
                })
            }
            method => Ok(Self { method }),
        }
    }
}

impl<T: Sample> Smooth1D<T> for SmoothKernel<T::Real> {
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
        let y = match self.method {
            Smoothing::GaussianLowpass { cutoff } => gaussian_lowpass(x, cutoff)?,
            Smoothing::Exponential { response } => exponential_smooth(x, response)?,
        };
        Ok(y)
    }
}
