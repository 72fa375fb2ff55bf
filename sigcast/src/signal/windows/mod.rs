//! Tapering windows for spectral analysis.
//!
//! Windows are symmetric with `θ = 2π/(N − 1)`, so both end points are sampled. Hann and
//! Nuttall vanish at the ends; dividing by them there yields non-finite values, which
//! [`Window::apply_inverse`] propagates rather than traps.

mod kernels;
pub use kernels::*;

use alloc::vec::Vec;
use num_traits::Float;
use sigcast_core::{vector, RealFloat, Sample};

/// Window family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Window {
    /// `(1 − cos θi)/2`.
    #[default]
    Hann,
    /// `25/46 − (21/46)·cos θi`.
    Hamming,
    /// Four-term Nuttall window,
    /// `0.355768 − 0.487396·cos θi + 0.144232·cos 2θi − 0.012604·cos 3θi`.
    ///
    /// The cubic term is subtracted, so the window is zero at both ends and `1` at the
    /// centre. Adding it instead gives ends of `0.025208` and a peak of `0.974792`, and
    /// shifts every band that [`crate::signal::spectrogram::extrapolate_spectral`] forecasts.
    Nuttall,
}

impl Window {
    /// Window coefficients of length `n`.
    ///
    /// A length-1 window is `[1]`.
    ///
    /// # Examples
    /// ```
    /// use sigcast::signal::windows::Window;
    ///
    /// let w: Vec<f64> = Window::Hann.coefficients(3);
    /// assert_eq!(w, [0.0, 1.0, 0.0]);
    /// ```
    pub fn coefficients<F: RealFloat>(&self, n: usize) -> Vec<F> {
        if n == 1 {
            return alloc::vec![F::one()];
        }
        let theta = F::TAU() / F::from_len(n.saturating_sub(1));
        (0..n)
            .map(|i| self.evaluate(theta * F::from_len(i)))
            .collect()
    }

    /// Multiply `x` by the window of matching length.
    pub fn apply<T: Sample>(&self, x: &[T]) -> Vec<T> {
        let w = self.coefficients::<T::Real>(x.len());
        vector::mul(x, &lift::<T>(&w))
    }

    /// Divide `x` by the window of matching length, undoing [`Window::apply`].
    pub fn apply_inverse<T: Sample>(&self, x: &[T]) -> Vec<T> {
        let w = self.coefficients::<T::Real>(x.len());
        x.iter()
            .zip(w)
            .map(|(v, wi)| v.map_parts(|p| p / wi))
            .collect()
    }

    fn evaluate<F: RealFloat>(&self, phase: F) -> F {
        let c = |v: f64| F::from_f64(v).unwrap_or_else(F::nan);
        match self {
            Window::Hann => (F::one() - Float::cos(phase)) / c(2.0),
            Window::Hamming => c(25.0 / 46.0) - c(21.0 / 46.0) * Float::cos(phase),
            Window::Nuttall => {
                c(0.355768) - c(0.487396) * Float::cos(phase)
                    + c(0.144232) * Float::cos(c(2.0) * phase)
                    - c(0.012604) * Float::cos(c(3.0) * phase)
            }
        }
    }
}

fn lift<T: Sample>(w: &[T::Real]) -> Vec<T> {
    w.iter().map(|wi| T::from_real(*wi)).collect()
}
