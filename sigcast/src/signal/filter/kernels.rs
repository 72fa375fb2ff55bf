//! Trait-first kernel wrappers for filtering primitives.

use crate::kernel::{
    write_exact, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D,
};
use crate::signal::traits::{FilterOutput, LFilter1D, LFilticDesign1D};
use alloc::vec::Vec;
use sigcast_core::Sample;

use super::{lfilter, lfiltic};

fn validate_config<T: Sample>(b: &[T], a: &[T]) -> Result<(), ConfigError> {
    if b.is_empty() {
        return Err(ConfigError::EmptyInput { arg: "b" });
    }
    match a.first() {
        None => Err(ConfigError::EmptyInput { arg: "a" }),
        Some(a0) if a0.is_zero() => Err(ConfigError::InvalidArgument {
            arg: "a",
            reason: "leading denominator coefficient must be non-zero",
        }),
        Some(_) => Ok(()),
    }
}

/// Constructor config for [`LFilterKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct LFilterConfig<T> {
    /// Numerator coefficients.
    pub b: Vec<T>,
    /// Denominator coefficients.
    pub a: Vec<T>,
}

/// 1D `lfilter` kernel.
///
/// The kernel holds only the coefficients; filter state is passed into each call and the
/// final state is returned, so one kernel can serve any number of independent streams.
#[derive(Debug, Clone, PartialEq)]
pub struct LFilterKernel<T> {
    b: Vec<T>,
    a: Vec<T>,
}

impl<T> LFilterKernel<T> {
    /// Length of the state vector consumed and produced by each run.
    pub fn state_len(&self) -> usize {
        self.a.len().max(self.b.len()) - 1
    }
}

impl<T: Sample> KernelLifecycle for LFilterKernel<T> {
    type Config = LFilterConfig<T>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        validate_config(&config.b, &config.a)?;
        Ok(Self {
            b: config.b,
            a: config.a,
        })
    }
}

impl<T: Sample> LFilter1D<T> for LFilterKernel<T> {
    fn run_into<I, O>(
        &self,
        input: &I,
        zi: Option<&[T]>,
        out: &mut O,
    ) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let (y, zf) = self.run_alloc(input, zi)?;
        write_exact(&y, out)?;
        Ok(zf)
    }

    fn run_alloc<I>(
        &self,
        input: &I,
        zi: Option<&[T]>,
    ) -> Result<FilterOutput<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let x = input.read_slice()?;
        Ok(lfilter(&self.b, &self.a, x, zi)?)
    }
}

/// Constructor config for [`LFilticKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct LFilticConfig<T> {
    /// Numerator coefficients.
    pub b: Vec<T>,
    /// Denominator coefficients.
    pub a: Vec<T>,
}

/// 1D `lfiltic` design kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct LFilticKernel<T> {
    b: Vec<T>,
    a: Vec<T>,
}

impl<T: Sample> KernelLifecycle for LFilticKernel<T> {
    type Config = LFilticConfig<T>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        validate_config(&config.b, &config.a)?;
        Ok(Self {
            b: config.b,
            a: config.a,
        })
    }
}

impl<T: Sample> LFilticDesign1D<T> for LFilticKernel<T> {
    fn run_into<I1, I2, O>(&self, y: &I1, x: &I2, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let zi = self.run_alloc(y, x)?;
        write_exact(&zi, out)
    }

    fn run_alloc<I1, I2>(&self, y: &I1, x: &I2) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
    {
        let y = y.read_slice()?;
        let x = x.read_slice()?;
        Ok(lfiltic(&self.b, &self.a, y, x)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};
    use sigcast_core::{Complex, Error};

    #[test]
    fn try_new_validates_coefficients() {
        let err = LFilterKernel::try_new(LFilterConfig {
            b: Vec::<f64>::new(),
            a: vec![1.0],
        })
        .expect_err("empty numerator must fail");
        assert_eq!(err, ConfigError::EmptyInput { arg: "b" });

        let err = LFilticKernel::try_new(LFilticConfig {
            b: vec![1.0f64],
            a: vec![],
        })
        .expect_err("empty denominator must fail");
        assert_eq!(err, ConfigError::EmptyInput { arg: "a" });

        let err = LFilterKernel::try_new(LFilterConfig {
            b: vec![1.0f64],
            a: vec![0.0, 1.0],
        })
        .expect_err("zero a0 must fail");
        assert!(matches!(err, ConfigError::InvalidArgument { arg: "a", .. }));
    }

    #[test]
    fn lfilter_kernel_matches_function() {
        let b = vec![0.25, 0.25];
        let a = vec![1.0, -0.5];
        let kernel = LFilterKernel::try_new(LFilterConfig {
            b: b.clone(),
            a: a.clone(),
        })
        .expect("kernel");
        assert_eq!(kernel.state_len(), 1);

        let x = array![1.0, 2.0, 3.0, 4.0];
        let (y, zf) = kernel.run_alloc(&x, None).expect("lfilter");
        let (y_ref, zf_ref) = lfilter(&b, &a, x.as_slice().expect("contiguous"), None)
            .expect("lfilter");
        assert_eq!(y, y_ref);
        assert_eq!(zf, zf_ref);

        let mut out = Array1::<f64>::zeros(4);
        let zf_into = kernel
            .run_into(&x, Some(zf.as_slice()), &mut out)
            .expect("lfilter");
        let (y_next, zf_next) =
            lfilter(&b, &a, x.as_slice().expect("contiguous"), Some(zf.as_slice()))
                .expect("lfilter");
        assert_eq!(out.to_vec(), y_next);
        assert_eq!(zf_into, zf_next);
    }

    #[test]
    fn lfilter_kernel_reports_bad_state_and_output() {
        let kernel = LFilterKernel::try_new(LFilterConfig {
            b: vec![1.0f64, 0.5],
            a: vec![1.0],
        })
        .expect("kernel");
        let x = vec![1.0, 2.0];

        let err = kernel
            .run_alloc(&x, Some([0.0, 0.0].as_slice()))
            .expect_err("state too long must fail");
        assert_eq!(
            err,
            ExecInvariantViolation::Signal(Error::LengthMismatch {
                arg: "zi",
                expected: 1,
                got: 2
            })
        );

        let mut out = [0.0f64; 3];
        let err = kernel
            .run_into(&x, None, &mut out)
            .expect_err("output size mismatch must fail");
        assert_eq!(
            err,
            ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn lfiltic_kernel_matches_function() {
        let b = vec![0.25, -0.25];
        let a = vec![1.0, 0.5];
        let kernel = LFilticKernel::try_new(LFilticConfig { b, a }).expect("kernel");
        let mut out = [0.0f64; 1];
        kernel
            .run_into(&vec![0.0], &vec![1.0], &mut out)
            .expect("lfiltic");
        assert_abs_diff_eq!(out[0], -0.25, epsilon = 1e-12);
        let empty: Vec<f64> = Vec::new();
        assert_eq!(kernel.run_alloc(&vec![0.0], &empty).expect("lfiltic"), [0.0]);
    }

    #[test]
    fn complex_kernel() {
        let one = Complex::new(1.0f64, 0.0);
        let kernel = LFilterKernel::try_new(LFilterConfig {
            b: vec![one],
            a: vec![one, Complex::new(0.0, -0.5)],
        })
        .expect("kernel");
        let x = vec![one, Complex::new(0.0, 0.0)];
        let (y, zf) = kernel.run_alloc(&x, None).expect("lfilter");
        assert_eq!(y[0], one);
        assert_abs_diff_eq!(y[1].re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y[1].im, 0.5, epsilon = 1e-12);
        assert_eq!(zf.len(), 1);
    }
}
