//! Autoregressive model estimation with Burg's method.
//!
//! Burg's recursion fits the reflection coefficients directly from forward and backward
//! prediction errors, which keeps every `|k| <= 1` and the resulting all-pole model
//! minimum phase. One generic body serves real and complex input; on real samples the
//! conjugations reduce to the identity.

use crate::kernel::{read_nonempty, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use crate::linalg::polynomial_roots;
use crate::signal::traits::ArEstimate1D;
use alloc::vec::Vec;
use nalgebra::RealField;
use sigcast_core::{vector, Complex, Error, RealFloat, Result, Sample};

/// Precondition violations observed while estimating a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArDiagnostic {
    /// Fewer than `order + 1` samples were available.
    InsufficientSamples {
        /// Number of input samples.
        len: usize,
        /// Requested model order.
        order: usize,
    },
}

/// Autoregressive model of order `p`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArModel<T> {
    /// Monic denominator `[1, a₁, …, aₚ]`.
    pub coefficients: Vec<T>,
    /// Residual prediction error power. Real-valued even for complex models.
    pub error: T,
    /// Reflection coefficients `k₁ … kₚ`.
    pub reflection: Vec<T>,
    /// Set when the input violated a precondition and the model is unreliable.
    pub diagnostic: Option<ArDiagnostic>,
}

impl<T: Sample> ArModel<T> {
    /// Model order `p`.
    pub fn order(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }
}

impl<T> ArModel<T>
where
    T: Sample,
    T::Real: RealField,
{
    /// Poles of the all-pole transfer function `1 / A(z)`.
    pub fn poles(&self) -> Result<Vec<Complex<T::Real>>> {
        polynomial_roots(&vector::to_complex(&self.coefficients))
    }

    /// True when every pole lies strictly inside the unit circle.
    pub fn is_stable(&self) -> Result<bool> {
        Ok(self
            .poles()?
            .iter()
            .all(|p| p.norm() < <T::Real as num_traits::One>::one()))
    }
}

/// Estimate an order-`order` AR model of `x` with Burg's method.
///
/// Real input runs `k = −2·⟨eb, ef⟩ / (‖ef‖² + ‖eb‖²)` and `E ← (1 − k²)·E`. Complex input
/// conjugates the backward error and reversed-coefficient updates, and scales the residual
/// by `1 − conj(k)·k`.
///
/// Fewer than `order + 1` samples is a precondition violation: a warning is logged, the
/// recursion proceeds on whatever overlap remains, and
/// [`ArDiagnostic::InsufficientSamples`] is recorded on the model. Degenerate recursions
/// produce NaN coefficients rather than panicking.
///
/// # Errors
/// Empty input.
///
/// # Examples
/// ```
/// use sigcast::signal::ar::arburg;
///
/// let model = arburg(&[1.0f64, 2.0, 3.0, 4.0, 5.0], 2).unwrap();
/// assert_eq!(model.coefficients[0], 1.0);
/// assert!((model.coefficients[1] + 1.863905325443787).abs() < 1e-12);
/// assert!(model.diagnostic.is_none());
/// ```
pub fn arburg<T: Sample>(x: &[T], order: usize) -> Result<ArModel<T>> {
    if x.is_empty() {
        return Err(Error::invalid_arg("x", "cannot fit a model to an empty sequence"));
    }
    let n = x.len();
    let diagnostic = if n < order + 1 {
        tracing::warn!(len = n, order, "input shorter than order + 1; model is unreliable");
        Some(ArDiagnostic::InsufficientSamples { len: n, order })
    } else {
        None
    };

    let one = <T::Real as num_traits::One>::one();
    let two = one + one;
    let mut ef = x[1..].to_vec();
    let mut eb = x[..n - 1].to_vec();
    let mut a = vector::zeros::<T>(order + 1);
    a[0] = T::one();
    let mut reflection = Vec::with_capacity(order);
    let mut error = T::from_real(vector::energy(x) / T::Real::from_len(n));

    for m in 0..order {
        let d = vector::energy(&ef) + vector::energy(&eb);
        let q = vector::dot_conj(&eb, &ef);
        let k = q.map_parts(|p| -two * p / d);
        reflection.push(k);

        let len = ef.len().saturating_sub(1);
        let next_ef: Vec<T> = (0..len).map(|i| ef[i + 1] + k * eb[i + 1]).collect();
        eb = (0..len).map(|i| eb[i] + k.conjugate() * ef[i]).collect();
        ef = next_ef;

        let rev = vector::conj(&vector::reversed(&a[..=m]));
        for i in 1..=m + 1 {
            a[i] += k * rev[i - 1];
        }

        error = (T::one() - k.conjugate() * k) * error;
    }

    tracing::trace!(len = n, order, "burg estimate");
    Ok(ArModel {
        coefficients: a,
        error,
        reflection,
        diagnostic,
    })
}

/// Burg estimate of a complex sequence. See [`arburg`].
///
/// # Errors
/// Empty input.
pub fn arburg_complex<F: RealFloat>(
    x: &[Complex<F>],
    order: usize,
) -> Result<ArModel<Complex<F>>> {
    arburg(x, order)
}

/// Constructor config for [`ArBurgKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArBurgConfig {
    /// Model order.
    pub order: usize,
}

/// Trait-first Burg estimation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArBurgKernel {
    order: usize,
}

impl KernelLifecycle for ArBurgKernel {
    type Config = ArBurgConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        Ok(Self {
            order: config.order,
        })
    }
}

impl<T: Sample> ArEstimate1D<T> for ArBurgKernel {
    fn run<I>(&self, input: &I) -> core::result::Result<ArModel<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let x = read_nonempty(input, "input")?;
        Ok(arburg(x, self.order)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const REFERENCE_SERIES: [f64; 16] = [
        0.7796877567724873, 0.7915302788549146, 0.8010646129962299, 0.8057222742623854,
        0.8032915729866256, 0.7928232582592226, 0.775207484743498, 0.7525704516423012,
        0.7272908506274501, 0.7012812282511067, 0.6764652490733608, 0.6546240491690392,
        0.6365409527326914, 0.6219087759651647, 0.609896655287969, 0.5991957420539259,
    ];

    #[test]
    fn order_fifteen_reference_model() {
        let expected = [
            1.0000, -4.7023, 9.2221, -9.5862, 4.6628, 2.1789, -7.4553, 9.8842, -10.2159,
            8.3933, -3.5362, -3.2161, 8.4095, -8.5107, 4.4159, -0.9439,
        ];
        let model = arburg(&REFERENCE_SERIES, 15).expect("burg");
        assert_eq!(model.coefficients.len(), 16);
        assert_eq!(model.coefficients[0], 1.0);
        for (a, e) in model.coefficients.iter().zip(expected) {
            assert_abs_diff_eq!(*a, e, epsilon = 1e-4);
        }
        assert_abs_diff_eq!(model.error, 2.6695e-09, epsilon = 1e-4);
        assert_relative_eq!(model.error, 2.669516740051204e-09, max_relative = 1e-3);
        assert!(model.diagnostic.is_none());
    }

    #[test]
    fn small_real_model() {
        let model = arburg(&[1.0, 2.0, 3.0, 4.0, 5.0], 2).expect("burg");
        let expected = [1.0, -1.863905325443787, 0.9571005917159763];
        for (a, e) in model.coefficients.iter().zip(expected) {
            assert_abs_diff_eq!(*a, e, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(model.error, 0.08586227723118954, epsilon = 1e-12);
        assert_abs_diff_eq!(model.reflection[0], -0.9523809523809523, epsilon = 1e-12);
        assert_abs_diff_eq!(model.reflection[1], 0.9571005917159763, epsilon = 1e-12);
        assert_eq!(model.order(), 2);
    }

    #[test]
    fn mixed_sign_real_model() {
        let model = arburg(&[1.0, 2.0, -1.0, 3.0, 0.5, -2.0, 1.0], 3).expect("burg");
        let expected = [
            1.0,
            0.17754512605224654,
            -0.015220946037695998,
            -0.6112275038816094,
        ];
        for (a, e) in model.coefficients.iter().zip(expected) {
            assert_abs_diff_eq!(*a, e, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(model.error, 1.6750600167592258, epsilon = 1e-12);
        assert!(model.error >= 0.0);
    }

    #[test]
    fn complex_reference_model() {
        let x = [
            Complex::new(2.0, 3.0),
            Complex::new(1.0, -1.0),
            Complex::new(4.0, 2.0),
            Complex::new(3.0, -2.0),
        ];
        let model = arburg_complex(&x, 3).expect("burg");
        let expected = [
            Complex::new(1.0, 0.0),
            Complex::new(-0.3049467187612815, 0.009769661016592601),
            Complex::new(-0.3877617243844061, -0.12129683252061096),
            Complex::new(0.6174108203733528, 0.586106197026906),
        ];
        for (a, e) in model.coefficients.iter().zip(expected) {
            assert_abs_diff_eq!(a.re, e.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, e.im, epsilon = 1e-12);
        }
        let k = [
            Complex::new(-0.2571428571428571, 0.37142857142857144),
            Complex::new(-0.7454513274336283, 0.23054867256637157),
            Complex::new(0.6174108203733528, 0.586106197026906),
        ];
        for (a, e) in model.reflection.iter().zip(k) {
            assert_abs_diff_eq!(a.re, e.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, e.im, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(model.error.re, 1.0284252373028215, epsilon = 1e-12);
        assert_abs_diff_eq!(model.error.im, 0.0, epsilon = 1e-12);
        assert_eq!(model.coefficients[0], Complex::new(1.0, 0.0));
    }

    #[test]
    fn order_zero_is_signal_power() {
        let model = arburg(&[1.0, -1.0, 2.0], 0).expect("burg");
        assert_eq!(model.coefficients, [1.0]);
        assert!(model.reflection.is_empty());
        assert_abs_diff_eq!(model.error, 2.0, epsilon = 1e-15);
    }

    #[test]
    fn undersized_input_is_diagnosed_not_fatal() {
        let model = arburg(&[1.0, 2.0], 3).expect("burg");
        assert_eq!(
            model.diagnostic,
            Some(ArDiagnostic::InsufficientSamples { len: 2, order: 3 })
        );
        assert_eq!(model.coefficients.len(), 4);
        assert_eq!(model.reflection.len(), 3);

        let model = arburg(&[4.0], 2).expect("burg");
        assert!(model.diagnostic.is_some());
        assert!(arburg::<f64>(&[], 2).is_err());
    }

    #[test]
    fn burg_model_is_stable() {
        let model = arburg(&[1.0, 2.0, 3.0, 4.0, 5.0], 2).expect("burg");
        let poles = model.poles().expect("poles");
        assert_eq!(poles.len(), 2);
        for p in &poles {
            assert_abs_diff_eq!(p.norm(), 0.9571005917159763f64.sqrt(), epsilon = 1e-9);
        }
        assert!(model.is_stable().expect("stability"));
    }

    #[test]
    fn kernel_matches_function() {
        let kernel = ArBurgKernel::try_new(ArBurgConfig { order: 2 }).expect("kernel");
        let model: ArModel<f64> = kernel.run(&[1.0, 2.0, 3.0, 4.0, 5.0]).expect("burg");
        assert_eq!(model, arburg(&[1.0, 2.0, 3.0, 4.0, 5.0], 2).expect("burg"));

        let empty: [f64; 0] = [];
        let err = ArEstimate1D::<f64>::run(&kernel, &empty).expect_err("empty input");
        assert_eq!(
            err,
            ExecInvariantViolation::Config(ConfigError::EmptyInput { arg: "input" })
        );
    }
}
