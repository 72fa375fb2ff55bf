use crate::kernel::{
    read_nonempty, write_exact, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D,
    Write1D,
};
use crate::signal::fft::{fft, ifft};
use crate::signal::traits::Interpolate1D;
use alloc::vec::Vec;
use sigcast_core::{vector, Complex, RealFloat, Result, Sample};

/// Upsample `x` by an integer `factor` through zero-padding its spectrum.
///
/// The output has `len x · factor` samples. Inputs of odd length, and factors below 2,
/// are returned unchanged. The Nyquist bin of an even-length input is not split, so the
/// result is exact only for signals without energy there.
///
/// # Errors
/// Never for well-formed input; transform errors are propagated.
///
/// # Examples
/// ```
/// use sigcast::signal::interpolate::interpolate;
///
/// let x = [1.0f64, 1.0, 1.0, 1.0];
/// let y = interpolate(&x, 3).unwrap();
/// assert_eq!(y.len(), 12);
/// assert!(y.iter().all(|v| (v - 1.0).abs() < 1e-12));
/// ```
pub fn interpolate<T: Sample>(x: &[T], factor: usize) -> Result<Vec<T>> {
    if factor < 2 || x.is_empty() || x.len() % 2 != 0 {
        tracing::debug!(len = x.len(), factor, "interpolation skipped");
        return Ok(x.to_vec());
    }

    let n = x.len();
    let spectrum = fft(&vector::to_complex(x))?;
    let half = n / 2;
    let mut padded = Vec::with_capacity(n * factor);
    padded.extend_from_slice(&spectrum[..half]);
    padded.extend(vector::zeros::<Complex<T::Real>>(n * (factor - 1)));
    padded.extend_from_slice(&spectrum[half..]);

    let gain = Complex::from(T::Real::from_len(factor));
    let y = vector::scale(&ifft(&padded)?, gain);
    Ok(vector::from_complex(&y))
}

/// Complex-valued [`interpolate`].
///
/// # Errors
/// As [`interpolate`].
pub fn interpolate_complex<F: RealFloat>(
    x: &[Complex<F>],
    factor: usize,
) -> Result<Vec<Complex<F>>> {
    interpolate(x, factor)
}

/// Constructor config for [`InterpolateKernel`].
#[derive(Debug, Clone, Copy)]
pub struct InterpolateConfig {
    /// Upsampling factor.
    pub factor: usize,
}

/// Trait-first 1D FFT upsampling kernel.
#[derive(Debug, Clone, Copy)]
pub struct InterpolateKernel {
    factor: usize,
}

impl InterpolateKernel {
    /// Return configured upsampling factor.
    pub fn factor(&self) -> usize {
        self.factor
    }
}

impl KernelLifecycle for InterpolateKernel {
    type Config = InterpolateConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        if config.factor == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "factor",
                reason: "factor must be > 0",
            });
        }
        Ok(Self {
            factor: config.factor,
        })
    }
}

impl<T: Sample> Interpolate1D<T> for InterpolateKernel {
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
        Ok(interpolate(x, self.factor)?)
    }
}
