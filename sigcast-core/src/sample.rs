use crate::Complex;
use core::fmt::Debug;
use core::iter::Sum;
use core::ops::Neg;
use num_traits::{Float, FloatConst, FromPrimitive, NumAssign, Signed};

/// Complex conjugation. The identity on real numbers.
pub trait Conjugate: Copy {
    /// Return the complex conjugate of `self`.
    fn conjugate(self) -> Self;
}

/// Real floating point scalar underlying every [`Sample`].
pub trait RealFloat:
    Float
    + FloatConst
    + FromPrimitive
    + Signed
    + NumAssign
    + Sum
    + Debug
    + Default
    + Send
    + Sync
    + 'static
{
    /// Convert a length or index to this scalar.
    fn from_len(n: usize) -> Self;
}

/// A real or complex sample value.
///
/// Algorithms are written once against this trait. For real types the
/// imaginary part is zero and [`Conjugate::conjugate`] is the identity, so the
/// complex recursion specialises to the real one without a second code path.
pub trait Sample:
    Conjugate + NumAssign + Neg<Output = Self> + Sum + Debug + Default + Send + Sync + 'static
{
    /// Underlying real scalar.
    type Real: RealFloat;

    /// Lift a real scalar into this sample type.
    fn from_real(re: Self::Real) -> Self;

    /// Project a complex value onto this sample type. Real types keep the real part.
    fn from_complex(c: Complex<Self::Real>) -> Self;

    /// Lift this sample into the complex plane.
    fn to_complex(self) -> Complex<Self::Real>;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Squared magnitude, `conj(x)·x`.
    fn norm_sqr(self) -> Self::Real;

    /// Apply `f` to each real component.
    fn map_parts<M: Fn(Self::Real) -> Self::Real>(self, f: M) -> Self;

    /// Magnitude `|x|`.
    fn modulus(self) -> Self::Real {
        self.norm_sqr().sqrt()
    }
}

macro_rules! impl_sample {
    ($($t:ty),*) => {$(
        impl RealFloat for $t {
            #[inline]
            fn from_len(n: usize) -> Self {
                n as $t
            }
        }

        impl Conjugate for $t {
            #[inline]
            fn conjugate(self) -> Self {
                self
            }
        }

        impl Sample for $t {
            type Real = $t;

            #[inline]
            fn from_real(re: $t) -> Self {
                re
            }

            #[inline]
            fn from_complex(c: Complex<$t>) -> Self {
                c.re
            }

            #[inline]
            fn to_complex(self) -> Complex<$t> {
                Complex::new(self, 0.0)
            }

            #[inline]
            fn re(self) -> $t {
                self
            }

            #[inline]
            fn norm_sqr(self) -> $t {
                self * self
            }

            #[inline]
            fn map_parts<M: Fn($t) -> $t>(self, f: M) -> Self {
                f(self)
            }
        }
    )*};
}

impl_sample!(f32, f64);

impl<F: RealFloat> Conjugate for Complex<F> {
    #[inline]
    fn conjugate(self) -> Self {
        self.conj()
    }
}

impl<F: RealFloat> Sample for Complex<F> {
    type Real = F;

    #[inline]
    fn from_real(re: F) -> Self {
        Complex::new(re, F::zero())
    }

    #[inline]
    fn from_complex(c: Complex<F>) -> Self {
        c
    }

    #[inline]
    fn to_complex(self) -> Complex<F> {
        self
    }

    #[inline]
    fn re(self) -> F {
        self.re
    }

    #[inline]
    fn norm_sqr(self) -> F {
        Complex::norm_sqr(&self)
    }

    #[inline]
    fn map_parts<M: Fn(F) -> F>(self, f: M) -> Self {
        Complex::new(f(self.re), f(self.im))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_convert_to_reals() {
        assert_eq!(f64::from_len(7), 7.0);
        assert_eq!(f32::from_len(0), 0.0);
    }

    #[test]
    fn real_conjugate_is_identity() {
        assert_eq!(2.5f64.conjugate(), 2.5);
        assert_eq!((-1.0f32).conjugate(), -1.0);
    }

    #[test]
    fn complex_conjugate_negates_imaginary() {
        let z = Complex::new(1.0f64, -3.0);
        assert_eq!(z.conjugate(), Complex::new(1.0, 3.0));
        assert_eq!(Sample::norm_sqr(z), 10.0);
        assert_eq!(Sample::re(z), 1.0);
    }

    #[test]
    fn map_parts_touches_both_components() {
        let z = Complex::new(2.0f64, 4.0).map_parts(|p| p / 2.0);
        assert_eq!(z, Complex::new(1.0, 2.0));
        assert_eq!(3.0f64.map_parts(|p| -p), -3.0);
    }

    #[test]
    fn real_projection_drops_imaginary_part() {
        assert_eq!(<f64 as Sample>::from_complex(Complex::new(1.5, 9.0)), 1.5);
        assert_eq!(2.0f32.to_complex(), Complex::new(2.0, 0.0));
        assert_eq!(Complex::new(3.0f64, 4.0).modulus(), 5.0);
    }
}
