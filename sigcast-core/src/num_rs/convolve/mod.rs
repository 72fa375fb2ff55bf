mod ndarray_conv_binds;

use crate::{Conjugate, Error, Result};
use alloc::string::ToString;
use ndarray::{Array1, ArrayView1};
use ndarray_conv::{ConvExt, PaddingMode};

/// Convolution mode determines behavior near edges and output size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMode {
    /// Full convolution, output size is `in1.len() + in2.len() - 1`
    #[default]
    Full,
    /// Valid convolution, output size is
    /// `max(in1.len(), in2.len()) - min(in1.len(), in2.len()) + 1`
    Valid,
    /// Same convolution, output size is `in1.len()`
    Same,
}

/// Best effort parallel behaviour with numpy's convolve method. We take `v` as the convolution
/// kernel.
///
/// Returns the discrete, linear convolution of two one-dimensional sequences.
///
/// # Parameters
/// * `a` : (N,) [[array_like]]([ndarray::Array1])  
///   Signal to be (linearly) convolved.
/// * `v` : (M,) [[array_like]]([ndarray::Array1])  
///   Second one-dimensional input array.
/// * `mode` : [ConvolveMode]  
///   [ConvolveMode::Full]:  
///   By default, mode is 'full'.  This returns the convolution at each point of overlap, with an
///   output shape of (N+M-1,). At the end-points of the convolution, the signals do not overlap
///   completely, and boundary effects may be seen.
///
///   [ConvolveMode::Same]:  
///   Mode 'same' returns output of length ``max(M, N)``.  Boundary effects are still visible.
///
///   [ConvolveMode::Valid]:  
///   Mode 'valid' returns output of length ``max(M, N) - min(M, N) + 1``.  The convolution
///   product is only given for points where the signals overlap completely.  Values outside the
///   signal boundary have no effect.
///
/// # Errors
/// Empty operands are rejected with [Error::InvalidArg].
///
/// # Examples
/// ```
/// use ndarray::array;
/// use sigcast_core::num_rs::{ConvolveMode, convolve};
///
/// let a = array![1., 2., 3.];
/// let v = array![0., 1., 0.5];
///
/// let expected = array![0., 1., 2.5, 4., 1.5];
/// let result = convolve((&a).into(), (&v).into(), ConvolveMode::Full).unwrap();
/// assert_eq!(result, expected);
/// ```
pub fn convolve<T>(a: ArrayView1<T>, v: ArrayView1<T>, mode: ConvolveMode) -> Result<Array1<T>>
where
    T: num_traits::NumAssign + core::marker::Copy,
{
    if a.is_empty() {
        return Err(Error::invalid_arg("a", "cannot convolve an empty sequence"));
    }
    if v.is_empty() {
        return Err(Error::invalid_arg("v", "cannot convolve an empty sequence"));
    }
    tracing::trace!(a = a.len(), v = v.len(), ?mode, "direct convolve");
    // Full and valid modes are symmetric in their operands; keep the longer one as the signal.
    let (signal, kernel) = if mode != ConvolveMode::Same && v.len() > a.len() {
        (v.view(), a.view())
    } else {
        (a.view(), v.view())
    };
    // ndarray-conv slides the kernel without flipping it.
    let flipped: Array1<T> = kernel.iter().rev().copied().collect();
    slide(signal, flipped.view(), mode)
}

/// Cross-correlation of two one-dimensional sequences, as numpy's `correlate`.
///
/// `c[k] = Σ_n a[n + k] · conj(v[n])`. In [ConvolveMode::Full] the first element is lag
/// `-(len(v) - 1)`. [ConvolveMode::Valid] requires `v` to be no longer than `a`.
///
/// # Errors
/// Empty operands are rejected with [Error::InvalidArg].
///
/// # Examples
/// ```
/// use ndarray::array;
/// use sigcast_core::num_rs::{ConvolveMode, correlate};
///
/// let a = array![1., 2., 3.];
/// let v = array![0., 1., 0.5];
///
/// let result = correlate((&a).into(), (&v).into(), ConvolveMode::Valid).unwrap();
/// assert_eq!(result, array![3.5]);
/// ```
pub fn correlate<T>(a: ArrayView1<T>, v: ArrayView1<T>, mode: ConvolveMode) -> Result<Array1<T>>
where
    T: num_traits::NumAssign + Conjugate,
{
    if a.is_empty() {
        return Err(Error::invalid_arg("a", "cannot correlate an empty sequence"));
    }
    if v.is_empty() {
        return Err(Error::invalid_arg("v", "cannot correlate an empty sequence"));
    }
    tracing::trace!(a = a.len(), v = v.len(), ?mode, "direct correlate");
    let kernel: Array1<T> = v.iter().map(|x| x.conjugate()).collect();
    slide(a, kernel.view(), mode)
}

/// Sliding dot product `out[i] = Σ_j signal[i + j - pad] · kernel[j]`.
fn slide<T>(signal: ArrayView1<T>, kernel: ArrayView1<T>, mode: ConvolveMode) -> Result<Array1<T>>
where
    T: num_traits::NumAssign + core::marker::Copy,
{
    signal
        .conv(&kernel, mode.into(), PaddingMode::Zeros)
        .map_err(|e| Error::Conv {
            reason: e.to_string(),
        })
}
