//! Trait interfaces for signal-processing capabilities.
//!
//! These traits define the trait-first API shape shared by the kernels. Each
//! capability offers a `run_into` entry point writing into a caller-provided
//! buffer and a `run_alloc` entry point returning a new vector.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};
use alloc::vec::Vec;
use sigcast_core::{Complex, RealFloat, Sample};

use super::ar::ArModel;

/// Filter output paired with the final filter state.
pub type FilterOutput<T> = (Vec<T>, Vec<T>);

/// Frame-major spectrogram, `[frame][bin]`.
pub type Frames<F> = Vec<Vec<Complex<F>>>;

/// 1D discrete Fourier transform capability.
pub trait Transform1D<T> {
    /// Transform into a caller-provided output buffer of the input's length.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Transform and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// 1D convolution capability.
pub trait Convolve1D<T> {
    /// Run convolution into a caller-provided output buffer.
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Run convolution and allocate output.
    fn run_alloc<I1, I2>(&self, in1: &I1, in2: &I2) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized;
}

/// 1D correlation capability.
pub trait Correlate1D<T> {
    /// Run correlation into a caller-provided output buffer.
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Run correlation and allocate output.
    fn run_alloc<I1, I2>(&self, in1: &I1, in2: &I2) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized;
}

/// 1D autocorrelation capability.
pub trait Autocorrelate1D<T> {
    /// Run autocorrelation into a caller-provided output buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Run autocorrelation and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Autoregressive model estimation capability.
pub trait ArEstimate1D<T> {
    /// Estimate a model of the input.
    fn run<I>(&self, input: &I) -> Result<ArModel<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// 1D `lfilter` capability with explicit state threading.
pub trait LFilter1D<T> {
    /// Filter into a caller-provided output buffer and return the final state.
    fn run_into<I, O>(
        &self,
        input: &I,
        zi: Option<&[T]>,
        out: &mut O,
    ) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Filter and allocate output, returning `(y, zf)`.
    fn run_alloc<I>(
        &self,
        input: &I,
        zi: Option<&[T]>,
    ) -> Result<FilterOutput<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// `lfiltic` design capability.
pub trait LFilticDesign1D<T> {
    /// Compute the filter state into a caller-provided output buffer.
    fn run_into<I1, I2, O>(
        &self,
        y: &I1,
        x: &I2,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Compute the filter state and allocate output.
    fn run_alloc<I1, I2>(&self, y: &I1, x: &I2) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized;
}

/// 1D forecasting capability.
pub trait Extrapolate1D<T> {
    /// Forecast into a caller-provided output buffer sized to the horizon.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Forecast and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Window generation capability.
pub trait WindowGenerate<F> {
    /// Generate window coefficients into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<F> + ?Sized;

    /// Generate window coefficients and allocate output.
    fn run_alloc(&self) -> Result<Vec<F>, ExecInvariantViolation>;
}

/// Sliding-window spectrogram capability.
pub trait Spectrogram1D<T: Sample> {
    /// Compute the frame-major spectrogram of the input.
    fn run_alloc<I>(&self, input: &I) -> Result<Frames<T::Real>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Spectrogram inversion capability.
pub trait InverseSpectrogram1D<F: RealFloat> {
    /// Reconstruct one sample per frame into a caller-provided output buffer.
    fn run_into<O>(
        &self,
        frames: &[Vec<Complex<F>>],
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<F> + ?Sized;

    /// Reconstruct one sample per frame and allocate output.
    fn run_alloc(&self, frames: &[Vec<Complex<F>>]) -> Result<Vec<F>, ExecInvariantViolation>;
}

/// 1D upsampling capability.
pub trait Interpolate1D<T> {
    /// Upsample into a caller-provided output buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Upsample and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// 1D smoothing capability.
pub trait Smooth1D<T> {
    /// Smooth into a caller-provided output buffer of the input's length.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Smooth and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}
