use super::ConfigError;

/// Constructor validation lifecycle shared by generator and transform kernels.
///
/// All argument checks happen in [`KernelLifecycle::try_new`]; a constructed
/// kernel only re-checks buffer lengths when it runs.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

/// Reject a zero transform or signal length.
pub(crate) fn ensure_nonzero_len(arg: &'static str, len: usize) -> Result<(), ConfigError> {
    if len == 0 {
        return Err(ConfigError::InvalidLength { arg });
    }
    Ok(())
}
