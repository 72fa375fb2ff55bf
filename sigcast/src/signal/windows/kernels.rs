//! Trait-first window generation kernels.

use crate::kernel::{write_exact, ConfigError, ExecInvariantViolation, KernelLifecycle, Write1D};
use crate::signal::traits::WindowGenerate;
use alloc::vec::Vec;
use sigcast_core::RealFloat;

use super::Window;

/// Constructor config for [`WindowKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window family.
    pub window: Window,
    /// Output length.
    pub len: usize,
}

/// Trait-first window generation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowKernel {
    window: Window,
    len: usize,
}

impl KernelLifecycle for WindowKernel {
    type Config = WindowConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.len <= 1 {
            return Err(ConfigError::InvalidArgument {
                arg: "len",
                reason: "window length must be greater than 1",
            });
        }
        Ok(Self {
            window: config.window,
            len: config.len,
        })
    }
}

impl<F: RealFloat> WindowGenerate<F> for WindowKernel {
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<F> + ?Sized,
    {
        let generated: Vec<F> = self.window.coefficients(self.len);
        write_exact(&generated, out)
    }

    fn run_alloc(&self) -> Result<Vec<F>, ExecInvariantViolation> {
        Ok(self.window.coefficients(self.len))
    }
}
