//! Sliding-window spectrogram, its single-sample inverse, and band-wise forecasting.
//!
//! Frame `i` is the transform of `x[i..i + window_len]` after tapering, for
//! `i in 0..len x − window_len`. The inverse recovers one sample per frame, the one at
//! index `window_len/2 − 1`, so a spectrogram of `n` frames inverts to `n` samples
//! offset by that index from the start of the signal.

use crate::kernel::{
    read_nonempty, write_exact, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D,
    Write1D,
};
use crate::signal::extrapolate::extrapolate_complex;
use crate::signal::fft::{fft, ifft};
use crate::signal::traits::{Frames, InverseSpectrogram1D, Spectrogram1D};
use crate::signal::windows::Window;
use alloc::vec::Vec;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use sigcast_core::{vector, Complex, Error, RealFloat, Result, Sample};

/// Frame-major spectrogram of `x`.
///
/// # Errors
/// `window_len < 2` or `window_len >= len x`.
pub fn spectrogram<T: Sample>(
    x: &[T],
    window_len: usize,
    window: Window,
) -> Result<Frames<T::Real>> {
    validate(x.len(), window_len)?;
    let frames = x.len() - window_len;
    tracing::trace!(len = x.len(), window_len, frames, "spectrogram");

    let frame = |i: usize| {
        let tapered = window.apply(&vector::to_complex(&x[i..i + window_len]));
        fft(&tapered)
    };

    #[cfg(feature = "parallel")]
    {
        (0..frames).into_par_iter().map(frame).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..frames).map(frame).collect()
    }
}

/// Reconstruct one sample per frame from a spectrogram built with `window`.
///
/// # Errors
/// A frame shorter than two bins.
pub fn inverse_spectrogram<F: RealFloat>(
    frames: &[Vec<Complex<F>>],
    window: Window,
) -> Result<Vec<F>> {
    frames
        .iter()
        .map(|frame| {
            if frame.len() < 2 {
                return Err(Error::invalid_arg(
                    "frames",
                    "every frame needs at least two bins",
                ));
            }
            let samples = window.apply_inverse(&ifft(frame)?);
            Ok(samples[frame.len() / 2 - 1].re)
        })
        .collect()
}

/// Forecast `count` samples by extrapolating every frequency bin of the spectrogram.
///
/// Returns the reconstruction of the history frames followed by the `count` forecast
/// samples, `len x − window_len + count` values in all.
///
/// # Errors
/// As [`spectrogram`].
pub fn extrapolate_spectral<T: Sample>(
    x: &[T],
    window_len: usize,
    window: Window,
    count: usize,
) -> Result<Vec<T::Real>> {
    let mut frames = spectrogram(x, window_len, window)?;
    let bins = vector::transpose(&frames);
    let forecast = bins
        .iter()
        .map(|bin| extrapolate_complex(bin, count))
        .collect::<Result<Vec<_>>>()?;
    frames.extend(vector::transpose(&forecast));
    inverse_spectrogram(&frames, window)
}

fn validate(len: usize, window_len: usize) -> Result<()> {
    if window_len < 2 {
        return Err(Error::invalid_arg(
            "window_len",
            "window must span at least two samples",
        ));
    }
    if window_len >= len {
        return Err(Error::invalid_arg(
            "window_len",
            "window must be shorter than the signal",
        ));
    }
    Ok(())
}

/// Constructor config for [`SpectrogramKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrogramConfig {
    /// Frame length in samples.
    pub window_len: usize,
    /// Taper applied to each frame.
    pub window: Window,
}

/// Trait-first spectrogram kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrogramKernel {
    window_len: usize,
    window: Window,
}

impl SpectrogramKernel {
    /// Forecast `count` samples band by band. See [`extrapolate_spectral`].
    pub fn extrapolate<T, I>(
        &self,
        input: &I,
        count: usize,
    ) -> core::result::Result<Vec<T::Real>, ExecInvariantViolation>
    where
        T: Sample,
        I: Read1D<T> + ?Sized,
    {
        let x = read_nonempty(input, "input")?;
        Ok(extrapolate_spectral(x, self.window_len, self.window, count)?)
    }
}

impl KernelLifecycle for SpectrogramKernel {
    type Config = SpectrogramConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        if config.window_len < 2 {
            return Err(ConfigError::InvalidArgument {
                arg: "window_len",
                reason: "window must span at least two samples",
            });
        }
        Ok(Self {
            window_len: config.window_len,
            window: config.window,
        })
    }
}

impl<T: Sample> Spectrogram1D<T> for SpectrogramKernel {
    fn run_alloc<I>(
        &self,
        input: &I,
    ) -> core::result::Result<Frames<T::Real>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let x = read_nonempty(input, "input")?;
        Ok(spectrogram(x, self.window_len, self.window)?)
    }
}

/// Constructor config for [`InverseSpectrogramKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InverseSpectrogramConfig {
    /// Taper the frames were built with.
    pub window: Window,
}

/// Trait-first spectrogram inversion kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InverseSpectrogramKernel {
    window: Window,
}

impl KernelLifecycle for InverseSpectrogramKernel {
    type Config = InverseSpectrogramConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        Ok(Self {
            window: config.window,
        })
    }
}

impl<F: RealFloat> InverseSpectrogram1D<F> for InverseSpectrogramKernel {
    fn run_into<O>(
        &self,
        frames: &[Vec<Complex<F>>],
        out: &mut O,
    ) -> core::result::Result<(), ExecInvariantViolation>
    where
        O: Write1D<F> + ?Sized,
    {
        let y = self.run_alloc(frames)?;
        write_exact(&y, out)
    }

    fn run_alloc(
        &self,
        frames: &[Vec<Complex<F>>],
    ) -> core::result::Result<Vec<F>, ExecInvariantViolation> {
        Ok(inverse_spectrogram(frames, self.window)?)
    }
}
