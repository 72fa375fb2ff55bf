//! Discrete-signal analysis and forecasting.
//!
//! `sigcast` estimates autoregressive models of finite real or complex signals with Burg's
//! method and extrapolates them forward in time, either directly or per frequency band through
//! a sliding-window spectrogram. The building blocks are exposed on their own:
//!
//! * [`signal::fft`]: naive DFT and a recursive radix-2 FFT with an odd-length fallback.
//! * [`signal::convolve`]: spectral and direct convolution/correlation.
//! * [`signal::ar`]: Burg AR estimation.
//! * [`signal::filter`]: direct-form II transposed `lfilter` and the `lfiltic` state solver.
//! * [`signal::extrapolate`] and [`signal::spectrogram`]: forecasting.
//!
//! Every operation is available as a free function returning [`Result`] and as a kernel
//! struct built through [`kernel::KernelLifecycle::try_new`].

#![no_std]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Shared trait-first kernel substrate.
pub mod kernel;

/// Linear algebra helpers over `nalgebra`.
#[cfg(feature = "alloc")]
pub mod linalg;

/// Digital signal processing.
#[cfg(feature = "alloc")]
pub mod signal;

pub use nalgebra as na;
pub use sigcast_core::{Complex, Conjugate, Error, RealFloat, Result, Sample};
