//! Discrete Fourier transforms over complex sequences.
//!
//! [`fft`] is a recursive radix-2 decimation-in-time transform. Sub-problems of odd length
//! fall back to the naive [`dft`], so every length is supported without padding. Results are
//! in natural order and unnormalised; [`ifft`] divides by `N`.

use crate::kernel::{
    read_nonempty, write_exact, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D,
    Write1D,
};
use crate::signal::traits::Transform1D;
use alloc::vec::Vec;
use num_traits::Zero;
use rustfft::FftPlanner;
use sigcast_core::{vector, Complex, Error, RealFloat, Result, Sample};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// `exp(-2πi·k·n/N)` kernel, unnormalised.
    #[default]
    Forward,
    /// `exp(+2πi·k·n/N)` kernel, divided by `N`.
    Inverse,
}

/// Algorithm used to evaluate a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformMethod {
    /// Recursive radix-2 FFT with naive DFT for odd lengths.
    #[default]
    Recursive,
    /// O(N²) direct evaluation.
    Naive,
    /// Planned mixed-radix transform from `rustfft`.
    Planned,
}

/// Naive discrete Fourier transform.
///
/// `out[k] = Σⱼ x[j]·exp(∓2πi·k·j/N)`, divided by `N` for [`Direction::Inverse`].
///
/// # Errors
/// Empty input.
///
/// # Examples
/// ```
/// use sigcast::signal::fft::{dft, Direction};
/// use sigcast::Complex;
///
/// let x = [Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)];
/// let y = dft(&x, Direction::Forward).unwrap();
/// assert_eq!(y[0], Complex::new(2.0, 0.0));
/// assert!(y[1].norm() < 1e-12);
/// ```
pub fn dft<F: RealFloat>(input: &[Complex<F>], direction: Direction) -> Result<Vec<Complex<F>>> {
    ensure_nonempty(input)?;
    Ok(dft_unchecked(input, direction))
}

/// Forward transform with the recursive radix-2 algorithm.
///
/// # Errors
/// Empty input.
///
/// # Examples
/// ```
/// use sigcast::signal::fft::{fft, ifft};
/// use sigcast::Complex;
///
/// let x: Vec<_> = (0..6).map(|i| Complex::new(i as f64, 0.0)).collect();
/// let back = ifft(&fft(&x).unwrap()).unwrap();
/// for (a, b) in x.iter().zip(&back) {
///     assert!((a - b).norm() < 1e-12);
/// }
/// ```
pub fn fft<F: RealFloat>(input: &[Complex<F>]) -> Result<Vec<Complex<F>>> {
    ensure_nonempty(input)?;
    if input.len() > 1 && input.len() % 2 != 0 {
        tracing::debug!(len = input.len(), "odd-length input; evaluating naive DFT");
    }
    Ok(fft_recursive(input))
}

/// Inverse transform, `conj(fft(conj(x))) / N`.
///
/// # Errors
/// Empty input.
pub fn ifft<F: RealFloat>(input: &[Complex<F>]) -> Result<Vec<Complex<F>>> {
    ensure_nonempty(input)?;
    let n = F::from_len(input.len());
    let spectrum = fft_recursive(&vector::conj(input));
    Ok(spectrum.iter().map(|c| c.conj() / n).collect())
}

/// Forward transform of a real or complex signal.
///
/// # Errors
/// Empty input.
pub fn fft_real<T: Sample>(input: &[T]) -> Result<Vec<Complex<T::Real>>> {
    fft(&vector::to_complex(input))
}

/// Transform `input` in the given direction with the chosen algorithm.
///
/// All methods agree up to rounding.
///
/// # Errors
/// Empty input.
pub fn transform<F: RealFloat>(
    input: &[Complex<F>],
    direction: Direction,
    method: TransformMethod,
) -> Result<Vec<Complex<F>>> {
    match (method, direction) {
        (TransformMethod::Recursive, Direction::Forward) => fft(input),
        (TransformMethod::Recursive, Direction::Inverse) => ifft(input),
        (TransformMethod::Naive, _) => dft(input, direction),
        (TransformMethod::Planned, _) => {
            ensure_nonempty(input)?;
            Ok(planned(input, direction))
        }
    }
}

fn ensure_nonempty<F>(input: &[Complex<F>]) -> Result<()> {
    if input.is_empty() {
        return Err(Error::invalid_arg("input", "cannot transform an empty sequence"));
    }
    Ok(())
}

fn dft_unchecked<F: RealFloat>(input: &[Complex<F>], direction: Direction) -> Vec<Complex<F>> {
    let n = input.len();
    let nf = F::from_len(n);
    let sign = match direction {
        Direction::Forward => -F::one(),
        Direction::Inverse => F::one(),
    };
    let theta = sign * F::TAU() / nf;
    let bin = |k: usize| {
        let sum: Complex<F> = input
            .iter()
            .enumerate()
            .map(|(j, x)| *x * Complex::from_polar(F::one(), theta * F::from_len((k * j) % n)))
            .sum();
        match direction {
            Direction::Forward => sum,
            Direction::Inverse => sum / nf,
        }
    };

    #[cfg(feature = "parallel")]
    {
        (0..n).into_par_iter().map(bin).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..n).map(bin).collect()
    }
}

fn fft_recursive<F: RealFloat>(input: &[Complex<F>]) -> Vec<Complex<F>> {
    let n = input.len();
    if n <= 1 {
        return input.to_vec();
    }
    if n % 2 != 0 {
        return dft_unchecked(input, Direction::Forward);
    }

    let even: Vec<_> = input.iter().step_by(2).copied().collect();
    let odd: Vec<_> = input.iter().skip(1).step_by(2).copied().collect();
    let even = fft_recursive(&even);
    let odd = fft_recursive(&odd);

    let half = n / 2;
    let nf = F::from_len(n);
    let mut out = alloc::vec![Complex::zero(); n];
    for k in 0..half {
        let w = Complex::from_polar(F::one(), -F::TAU() * F::from_len(k) / nf);
        let t = w * odd[k];
        out[k] = even[k] + t;
        out[k + half] = even[k] - t;
    }
    out
}

fn planned<F: RealFloat>(input: &[Complex<F>], direction: Direction) -> Vec<Complex<F>> {
    let n = input.len();
    let mut planner = FftPlanner::<F>::new();
    let plan = match direction {
        Direction::Forward => planner.plan_fft_forward(n),
        Direction::Inverse => planner.plan_fft_inverse(n),
    };
    let mut buf = input.to_vec();
    plan.process(&mut buf);
    if direction == Direction::Inverse {
        let nf = F::from_len(n);
        buf.iter_mut().for_each(|c| *c = *c / nf);
    }
    buf
}

/// Constructor config for [`FftKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FftConfig {
    /// Transform direction.
    pub direction: Direction,
    /// Evaluation algorithm.
    pub method: TransformMethod,
}

/// Trait-first 1D transform kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FftKernel {
    direction: Direction,
    method: TransformMethod,
}

impl KernelLifecycle for FftKernel {
    type Config = FftConfig;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        Ok(Self {
            direction: config.direction,
            method: config.method,
        })
    }
}

impl<F: RealFloat> Transform1D<Complex<F>> for FftKernel {
    fn run_into<I, O>(
        &self,
        input: &I,
        out: &mut O,
    ) -> core::result::Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<Complex<F>> + ?Sized,
    {
        let y = self.run_alloc(input)?;
        write_exact(&y, out)
    }

    fn run_alloc<I>(
        &self,
        input: &I,
    ) -> core::result::Result<Vec<Complex<F>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
    {
        let input = read_nonempty(input, "input")?;
        Ok(transform(input, self.direction, self.method)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};

    fn assert_close(actual: &[Complex<f64>], expected: &[Complex<f64>], eps: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(a.re, e.re, epsilon = eps);
            assert_abs_diff_eq!(a.im, e.im, epsilon = eps);
        }
    }

    fn random_signal(len: usize, seed: u64) -> Vec<Complex<f64>> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        (0..len)
            .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect()
    }

    fn rustfft_forward(x: &[Complex<f64>]) -> Vec<Complex<f64>> {
        let mut buf = x.to_vec();
        FftPlanner::new().plan_fft_forward(x.len()).process(&mut buf);
        buf
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let mut x = vec![Complex::new(0.0f64, 0.0); 8];
        x[0] = Complex::new(1.0, 0.0);
        let y = fft(&x).expect("fft");
        assert_close(&y, &[Complex::new(1.0, 0.0); 8], 1e-15);
    }

    #[test]
    fn length_one_is_identity() {
        let x = [Complex::new(3.0f64, -2.0)];
        assert_eq!(fft(&x).expect("fft"), x.to_vec());
        assert_eq!(ifft(&x).expect("ifft"), x.to_vec());
    }

    #[test]
    fn empty_input_is_rejected() {
        let x: [Complex<f64>; 0] = [];
        assert!(matches!(fft(&x), Err(Error::InvalidArg { .. })));
        assert!(matches!(ifft(&x), Err(Error::InvalidArg { .. })));
        assert!(matches!(dft(&x, Direction::Forward), Err(Error::InvalidArg { .. })));
    }

    #[test]
    fn recursive_matches_rustfft_for_mixed_lengths() {
        for (seed, len) in [1usize, 2, 3, 6, 12, 15, 16, 24, 64, 100].iter().enumerate() {
            let x = random_signal(*len, seed as u64);
            let expected = rustfft_forward(&x);
            assert_close(&fft(&x).expect("fft"), &expected, 1e-9);
            assert_close(&dft(&x, Direction::Forward).expect("dft"), &expected, 1e-9);
        }
    }

    #[test]
    fn inverse_round_trip() {
        for len in [1usize, 5, 8, 18, 33] {
            let x = random_signal(len, 7 + len as u64);
            let back = ifft(&fft(&x).expect("fft")).expect("ifft");
            assert_close(&back, &x, 1e-12);
            let back = dft(&dft(&x, Direction::Forward).expect("dft"), Direction::Inverse)
                .expect("idft");
            assert_close(&back, &x, 1e-12);
        }
    }

    #[test]
    fn real_input_spectrum_is_hermitian() {
        let x = [1.0f64, 2.0, -1.0, 0.5, 3.0, -2.0];
        let y = fft_real(&x).expect("fft");
        assert_abs_diff_eq!(y[0].re, 3.5, epsilon = 1e-12);
        assert_abs_diff_eq!(y[0].im, 0.0, epsilon = 1e-12);
        for k in 1..x.len() {
            assert_abs_diff_eq!(y[k].re, y[x.len() - k].re, epsilon = 1e-12);
            assert_abs_diff_eq!(y[k].im, -y[x.len() - k].im, epsilon = 1e-12);
        }
    }

    #[test]
    fn kernel_methods_agree() {
        let x = random_signal(20, 99);
        let mut outputs = Vec::new();
        for method in [
            TransformMethod::Recursive,
            TransformMethod::Naive,
            TransformMethod::Planned,
        ] {
            let kernel = FftKernel::try_new(FftConfig {
                direction: Direction::Inverse,
                method,
            })
            .expect("kernel should initialize");
            outputs.push(kernel.run_alloc(&x).expect("transform"));
        }
        assert_close(&outputs[0], &outputs[1], 1e-12);
        assert_close(&outputs[0], &outputs[2], 1e-12);
    }

    #[test]
    fn kernel_validates_output_length() {
        let kernel = FftKernel::try_new(FftConfig::default()).expect("kernel should initialize");
        let x = random_signal(4, 3);
        let mut out = vec![Complex::new(0.0f64, 0.0); 3];
        let err = kernel
            .run_into(&x, &mut out)
            .expect_err("output size mismatch must fail");
        assert_eq!(
            err,
            ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: 4,
                got: 3
            }
        );

        let empty: Vec<Complex<f64>> = Vec::new();
        assert_eq!(
            kernel.run_alloc(&empty).expect_err("empty input"),
            ExecInvariantViolation::Config(ConfigError::EmptyInput { arg: "input" })
        );
    }
}
