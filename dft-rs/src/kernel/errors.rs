use core::fmt;

/// Validation errors raised at kernel construction or adapter binding time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A transform or generator length was zero.
    InvalidLength {
        /// Name of the argument carrying the length.
        arg: &'static str,
    },
    /// A box pulse does not fit inside its signal.
    OutOfRangeBox {
        /// Signal length.
        len: usize,
        /// Requested pulse width.
        width: usize,
        /// Requested pulse offset.
        offset: usize,
    },
    /// A tolerance was negative, NaN or infinite.
    InvalidTolerance {
        /// Name of the tolerance argument.
        arg: &'static str,
    },
    /// A contiguous 1D slice view could not be obtained.
    NonContiguous {
        /// Name of the argument that is non-contiguous.
        arg: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLength { arg } => {
                write!(f, "Invalid length `{arg}`: must be greater than zero.")
            }
            ConfigError::OutOfRangeBox { len, width, offset } => write!(
                f,
                "Box pulse [{offset}, {offset} + {width}) does not fit in a signal of length {len}."
            ),
            ConfigError::InvalidTolerance { arg } => {
                write!(f, "Invalid tolerance `{arg}`: must be finite and non-negative.")
            }
            ConfigError::NonContiguous { arg } => {
                write!(f, "Argument `{arg}` is not contiguous in memory.")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Runtime execution invariant violations for checked kernel entrypoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecInvariantViolation {
    /// A buffer length did not match the kernel's transform length.
    DimensionMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// An inverse transform produced an imaginary part above the configured tolerance.
    NonNegligibleImaginary {
        /// First output sample that failed the check.
        index: usize,
    },
    /// Adapter binding/configuration failure.
    Config(ConfigError),
}

impl From<ConfigError> for ExecInvariantViolation {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl fmt::Display for ExecInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecInvariantViolation::DimensionMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Dimension mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
            ExecInvariantViolation::NonNegligibleImaginary { index } => {
                write!(
                    f,
                    "Reconstructed sample {index} has a non-negligible imaginary part."
                )
            }
            ExecInvariantViolation::Config(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExecInvariantViolation {}

/// Check that `got` equals the kernel length `expected`.
pub(crate) fn ensure_len(
    arg: &'static str,
    expected: usize,
    got: usize,
) -> Result<(), ExecInvariantViolation> {
    if expected != got {
        return Err(ExecInvariantViolation::DimensionMismatch { arg, expected, got });
    }
    Ok(())
}
