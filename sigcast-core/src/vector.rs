//! Numeric container operations.
//!
//! Every function takes its operands by slice and returns a newly allocated
//! `Vec`; inputs are never mutated. Element-wise binary operations work on the
//! common prefix of their operands and log a warning when the lengths differ.

use crate::{Complex, Conjugate, RealFloat, Sample};
use alloc::vec::Vec;
use core::ops::{Add, Mul, Sub};
use num_traits::Zero;

/// `len` zeros.
pub fn zeros<T: Zero + Clone>(len: usize) -> Vec<T> {
    alloc::vec![T::zero(); len]
}

/// Zero-pad `x` on the trailing side to length `len`.
///
/// Inputs already at least `len` long are returned unchanged.
pub fn pad_trailing<T: Zero + Copy>(x: &[T], len: usize) -> Vec<T> {
    let mut out = x.to_vec();
    if out.len() < len {
        out.resize(len, T::zero());
    }
    out
}

/// Zero-pad `x` on the leading side to length `len`.
///
/// Inputs already at least `len` long are returned unchanged.
pub fn pad_leading<T: Zero + Copy>(x: &[T], len: usize) -> Vec<T> {
    let pad = len.saturating_sub(x.len());
    let mut out = zeros(pad);
    out.extend_from_slice(x);
    out
}

/// Reverse the order of `x`.
pub fn reversed<T: Copy>(x: &[T]) -> Vec<T> {
    x.iter().rev().copied().collect()
}

/// Copy of `x[start..end]`, with both bounds clamped to the slice.
pub fn sub_vector<T: Copy>(x: &[T], start: usize, end: usize) -> Vec<T> {
    let end = end.min(x.len());
    let start = start.min(end);
    x[start..end].to_vec()
}

/// Lift real or complex samples into the complex plane.
pub fn to_complex<T: Sample>(x: &[T]) -> Vec<Complex<T::Real>> {
    x.iter().map(|v| v.to_complex()).collect()
}

/// Project complex samples onto `T`. Real targets keep the real part.
pub fn from_complex<T: Sample>(x: &[Complex<T::Real>]) -> Vec<T> {
    x.iter().map(|c| T::from_complex(*c)).collect()
}

/// Real components of `x`.
pub fn real_part<F: RealFloat>(x: &[Complex<F>]) -> Vec<F> {
    x.iter().map(|c| c.re).collect()
}

/// Imaginary components of `x`.
pub fn imag_part<F: RealFloat>(x: &[Complex<F>]) -> Vec<F> {
    x.iter().map(|c| c.im).collect()
}

/// Recombine split real and imaginary parts.
pub fn from_split<F: RealFloat>(re: &[F], im: &[F]) -> Vec<Complex<F>> {
    warn_on_mismatch("from_split", re.len(), im.len());
    re.iter()
        .zip(im)
        .map(|(r, i)| Complex::new(*r, *i))
        .collect()
}

/// Element-wise conjugate.
pub fn conj<T: Conjugate>(x: &[T]) -> Vec<T> {
    x.iter().map(|v| v.conjugate()).collect()
}

/// Element-wise `u[i] + v[i]`.
pub fn add<T: Copy + Add<Output = T>>(u: &[T], v: &[T]) -> Vec<T> {
    zip_with("add", u, v, |a, b| a + b)
}

/// Element-wise `u[i] - v[i]`.
pub fn sub<T: Copy + Sub<Output = T>>(u: &[T], v: &[T]) -> Vec<T> {
    zip_with("sub", u, v, |a, b| a - b)
}

/// Element-wise `u[i] * v[i]`.
pub fn mul<T: Copy + Mul<Output = T>>(u: &[T], v: &[T]) -> Vec<T> {
    zip_with("mul", u, v, |a, b| a * b)
}

/// `x[i] * s`.
pub fn scale<T: Copy + Mul<Output = T>>(x: &[T], s: T) -> Vec<T> {
    x.iter().map(|v| *v * s).collect()
}

/// `x[i] / s`. Division by zero follows IEEE semantics.
pub fn div_scalar<T: Sample>(x: &[T], s: T) -> Vec<T> {
    x.iter().map(|v| *v / s).collect()
}

/// Sum of all elements.
pub fn sum<T: Sample>(x: &[T]) -> T {
    x.iter().copied().sum()
}

/// `Σ u[i]·v[i]` over the common prefix.
pub fn dot<T: Sample>(u: &[T], v: &[T]) -> T {
    warn_on_mismatch("dot", u.len(), v.len());
    u.iter().zip(v).map(|(a, b)| *a * *b).sum()
}

/// `Σ conj(u[i])·v[i]` over the common prefix.
pub fn dot_conj<T: Sample>(u: &[T], v: &[T]) -> T {
    warn_on_mismatch("dot_conj", u.len(), v.len());
    u.iter().zip(v).map(|(a, b)| a.conjugate() * *b).sum()
}

/// `Σ |x[i]|²`.
pub fn energy<T: Sample>(x: &[T]) -> T::Real {
    x.iter().map(|v| v.norm_sqr()).sum()
}

/// True when every element is exactly zero. Empty input is zero.
pub fn is_zero<T: Sample>(x: &[T]) -> bool {
    x.iter().all(|v| v.is_zero())
}

/// True when `u` and `v` have the same length and `|u[i] - v[i]| <= tol` everywhere.
pub fn is_close<T: Sample>(u: &[T], v: &[T], tol: T::Real) -> bool {
    u.len() == v.len() && u.iter().zip(v).all(|(a, b)| (*a - *b).modulus() <= tol)
}

/// Swap rows and columns of a row-major matrix.
///
/// The column count is taken from the shortest row.
pub fn transpose<T: Copy>(m: &[Vec<T>]) -> Vec<Vec<T>> {
    let cols = m.iter().map(Vec::len).min().unwrap_or(0);
    if m.iter().any(|row| row.len() != cols) {
        tracing::warn!(cols, "transpose of a ragged matrix; truncating rows");
    }
    (0..cols)
        .map(|c| m.iter().map(|row| row[c]).collect())
        .collect()
}

fn zip_with<T: Copy, M: Fn(T, T) -> T>(op: &'static str, u: &[T], v: &[T], f: M) -> Vec<T> {
    warn_on_mismatch(op, u.len(), v.len());
    u.iter().zip(v).map(|(a, b)| f(*a, *b)).collect()
}

#[inline]
fn warn_on_mismatch(op: &'static str, left: usize, right: usize) {
    if left != right {
        tracing::warn!(op, left, right, "operand lengths differ; using common prefix");
    }
}
