//! Digital IIR/FIR filtering.
//!
//! [`lfilter`] is a pure direct-form II transposed filter: the delay-line state is passed
//! in and handed back, never stored. [`lfiltic`] derives that state from prior input and
//! output samples so a run can be resumed mid-signal.

mod kernels;
mod lfilter;
mod lfiltic;

pub use kernels::*;
pub use lfilter::*;
pub use lfiltic::*;

use sigcast_core::{Error, Result, Sample};

/// Reject empty coefficient vectors and a zero leading denominator coefficient.
fn validate_coefficients<T: Sample>(b: &[T], a: &[T]) -> Result<T> {
    if b.is_empty() {
        return Err(Error::invalid_arg("b", "numerator must not be empty"));
    }
    let Some(a0) = a.first().copied() else {
        return Err(Error::invalid_arg(
            "a",
            "denominator must not be empty. Consider `[1.]` for an FIR filter",
        ));
    };
    if a0.is_zero() {
        return Err(Error::invalid_arg(
            "a",
            "leading denominator coefficient must be non-zero",
        ));
    }
    Ok(a0)
}
