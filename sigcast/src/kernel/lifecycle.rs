use super::ConfigError;

/// Constructor validation lifecycle shared by kernel structs.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, KernelLifecycle};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct HorizonConfig {
        count: usize,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct HorizonKernel {
        count: usize,
    }

    impl KernelLifecycle for HorizonKernel {
        type Config = HorizonConfig;

        fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
            if config.count == 0 {
                return Err(ConfigError::InvalidArgument {
                    arg: "count",
                    reason: "forecast horizon must be greater than zero",
                });
            }
            Ok(Self {
                count: config.count,
            })
        }
    }

    #[test]
    fn lifecycle_constructor_accepts_valid_config() {
        let kernel = HorizonKernel::try_new(HorizonConfig { count: 4 }).expect("valid config");
        assert_eq!(kernel.count, 4);
    }

    #[test]
    fn lifecycle_constructor_rejects_invalid_config() {
        let err = HorizonKernel::try_new(HorizonConfig { count: 0 }).expect_err("invalid config");
        assert_eq!(
            err,
            ConfigError::InvalidArgument {
                arg: "count",
                reason: "forecast horizon must be greater than zero",
            }
        );
    }
}
