use super::ConfigError;

/// Constructor validation lifecycle shared by kernel structs.
///
/// Every transform kernel validates its scalar parameters here, once, so
/// that a constructed kernel can only fail against a concrete input (lane
/// length, parity, axis), never on its own configuration.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, KernelLifecycle};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct PeriodicConfig {
        period: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct PeriodicKernel {
        period: f64,
    }

    impl KernelLifecycle for PeriodicKernel {
        type Config = PeriodicConfig;

        fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
            if !(config.period > 0.0) {
                return Err(ConfigError::InvalidArgument {
                    arg: "period",
                    reason: "period must be positive",
                });
            }
            Ok(Self {
                period: config.period,
            })
        }
    }

    #[test]
    fn lifecycle_constructor_accepts_valid_config() {
        let kernel =
            PeriodicKernel::try_new(PeriodicConfig { period: 2.5 }).expect("valid config");
        assert_eq!(kernel.period, 2.5);
    }

    #[test]
    fn lifecycle_constructor_rejects_invalid_config() {
        let err = PeriodicKernel::try_new(PeriodicConfig { period: 0.0 })
            .expect_err("invalid config");
        assert_eq!(
            err,
            ConfigError::InvalidArgument {
                arg: "period",
                reason: "period must be positive",
            }
        );
    }

    #[test]
    fn lifecycle_constructor_rejects_nan_config() {
        assert!(PeriodicKernel::try_new(PeriodicConfig { period: f64::NAN }).is_err());
    }
}
