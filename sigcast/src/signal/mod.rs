//! Signal analysis and forecasting routines.

/// Trait interfaces for signal-processing capabilities.
pub mod traits;

/// Discrete Fourier transforms.
pub mod fft;

/// Spectral and direct convolution and correlation.
pub mod convolve;

/// Autoregressive model estimation.
pub mod ar;

/// Digital filtering and initial-condition design.
pub mod filter;

/// Forward extrapolation of signals.
pub mod extrapolate;

/// Tapering windows.
pub mod windows;

/// Sliding-window spectrogram and band-wise extrapolation.
pub mod spectrogram;

/// FFT upsampling.
pub mod interpolate;

/// Smoothing filters.
pub mod smooth;
