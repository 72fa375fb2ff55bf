use super::{ConfigError, ExecInvariantViolation};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Adapter trait for reading contiguous 1D input.
pub trait Read1D<T> {
    /// Borrow the underlying input as a contiguous slice.
    fn read_slice(&self) -> Result<&[T], ConfigError>;
}

/// Adapter trait for writing contiguous 1D output.
pub trait Write1D<T> {
    /// Borrow the underlying output as a mutable contiguous slice.
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError>;
}

/// Read a non-empty input slice, naming `arg` on failure.
pub fn read_nonempty<'a, T, I>(
    input: &'a I,
    arg: &'static str,
) -> Result<&'a [T], ExecInvariantViolation>
where
    I: Read1D<T> + ?Sized,
{
    let slice = input.read_slice()?;
    if slice.is_empty() {
        return Err(ConfigError::EmptyInput { arg }.into());
    }
    Ok(slice)
}

/// Copy `values` into `out`, which must have exactly the same length.
pub fn write_exact<T, O>(values: &[T], out: &mut O) -> Result<(), ExecInvariantViolation>
where
    T: Copy,
    O: Write1D<T> + ?Sized,
{
    let out_slice = out.write_slice_mut()?;
    if out_slice.len() != values.len() {
        return Err(ExecInvariantViolation::LengthMismatch {
            arg: "out",
            expected: values.len(),
            got: out_slice.len(),
        });
    }
    out_slice.copy_from_slice(values);
    Ok(())
}

impl<T> Read1D<T> for [T] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T> Write1D<T> for [T] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Read1D<T> for [T; N] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Write1D<T> for [T; N] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

#[cfg(feature = "alloc")]
impl<T> Read1D<T> for Vec<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T> Write1D<T> for Vec<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self.as_mut_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T> Read1D<T> for Array1<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

#[cfg(feature = "alloc")]
impl<T> Write1D<T> for Array1<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

#[cfg(feature = "alloc")]
impl<T> Read1D<T> for ArrayView1<'_, T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array_view" })
    }
}

#[cfg(feature = "alloc")]
impl<T> Write1D<T> for ArrayViewMut1<'_, T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut().ok_or(ConfigError::NonContiguous {
            arg: "array_view_mut",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_and_array_adapters() {
        let a = [1.0f32, 2.0, 3.0];
        assert_eq!(a.read_slice().expect("array adapter").len(), 3);

        let s: &[f32] = &a;
        assert_eq!(s.read_slice().expect("slice adapter")[1], 2.0);
    }

    #[test]
    fn read_nonempty_names_the_argument() {
        let empty: [f64; 0] = [];
        let err = read_nonempty(&empty, "x").expect_err("empty input must fail");
        assert_eq!(
            err,
            ExecInvariantViolation::Config(ConfigError::EmptyInput { arg: "x" })
        );
        assert_eq!(read_nonempty(&[1.0f64], "x").expect("non-empty"), &[1.0]);
    }

    #[test]
    fn write_exact_checks_length() {
        let mut out = [0.0f64; 2];
        write_exact(&[1.0, 2.0], &mut out).expect("same length");
        assert_eq!(out, [1.0, 2.0]);

        let err = write_exact(&[1.0, 2.0, 3.0], &mut out).expect_err("length mismatch");
        assert_eq!(
            err,
            ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: 3,
                got: 2
            }
        );
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn ndarray_adapters() {
        use alloc::vec;

        let arr = Array1::from(vec![1.0f64, 2.0, 3.0]);
        assert_eq!(arr.read_slice().expect("array1 read")[2], 3.0);

        let mut out = Array1::from(vec![0.0f64, 0.0, 0.0]);
        write_exact(&[4.0, 5.0, 6.0], &mut out).expect("array1 write");
        assert_eq!(out.as_slice().expect("slice"), &[4.0, 5.0, 6.0]);

        let strided = Array1::from(vec![1.0f64, 2.0, 3.0, 4.0]);
        let view = strided.slice(ndarray::s![..;2]);
        assert_eq!(
            view.read_slice().expect_err("strided view"),
            ConfigError::NonContiguous { arg: "array_view" }
        );
    }
}
