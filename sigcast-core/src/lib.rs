//! Numeric building blocks shared by the `sigcast` crates.
//!
//! * [`Sample`] abstracts over real (`f32`, `f64`) and complex sample values so a
//!   single algorithm body serves both.
//! * [`vector`] is the numeric container: element-wise arithmetic, padding,
//!   reversal, splitting and recombining complex parts.
//! * [`num_rs`] carries direct, time-domain convolution in the style of numpy.

#![no_std]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
mod sample;

pub use error::*;
pub use sample::*;

/// Complex sample type used across the workspace.
pub use num_complex::Complex;

/// numpy-like functionality
#[cfg(feature = "alloc")]
pub mod num_rs;

/// Numeric container operations over sample slices.
#[cfg(feature = "alloc")]
pub mod vector;

/// Result type used by the free functions of the workspace.
pub type Result<T> = core::result::Result<T, Error>;
