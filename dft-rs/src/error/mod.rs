use core::{error, fmt};

use crate::kernel::{ConfigError, ExecInvariantViolation};

/// Errors returned by the generator and transform free functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A signal or transform length of zero was requested.
    InvalidLength {
        /// Name of the offending argument.
        arg: &'static str,
    },
    /// A box pulse `[offset, offset + width)` does not fit in `len` samples.
    OutOfRangeBox {
        /// Signal length.
        len: usize,
        /// Pulse width.
        width: usize,
        /// Pulse offset.
        offset: usize,
    },
    /// A buffer's length disagreed with the transform length.
    DimensionMismatch {
        /// Name of the offending argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// A strict inverse transform found imaginary residue above tolerance.
    NonNegligibleImaginary {
        /// First failing sample.
        index: usize,
    },
    /// An inverse-transform tolerance was negative or not finite.
    InvalidTolerance {
        /// Name of the offending argument.
        arg: &'static str,
    },
    /// An `ndarray` view was not contiguous.
    NonContiguous {
        /// Name of the offending argument.
        arg: &'static str,
    },
}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::InvalidLength { arg } => Error::InvalidLength { arg },
            ConfigError::OutOfRangeBox { len, width, offset } => {
                Error::OutOfRangeBox { len, width, offset }
            }
            ConfigError::InvalidTolerance { arg } => Error::InvalidTolerance { arg },
            ConfigError::NonContiguous { arg } => Error::NonContiguous { arg },
        }
    }
}

impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        match value {
            ExecInvariantViolation::DimensionMismatch { arg, expected, got } => {
                Error::DimensionMismatch { arg, expected, got }
            }
            ExecInvariantViolation::NonNegligibleImaginary { index } => {
                Error::NonNegligibleImaginary { index }
            }
            ExecInvariantViolation::Config(err) => err.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength { arg } => {
                write!(f, "Invalid length `{arg}`: must be greater than zero.")
            }
            Error::OutOfRangeBox { len, width, offset } => write!(
                f,
                "Box pulse out of range: offset {offset} + width {width} exceeds length {len}."
            ),
            Error::DimensionMismatch { arg, expected, got } => write!(
                f,
                "Dimension mismatch on `{arg}`: expected {expected}, got {got}."
            ),
            Error::NonNegligibleImaginary { index } => write!(
                f,
                "Inverse transform sample {index} has a non-negligible imaginary part."
            ),
            Error::InvalidTolerance { arg } => {
                write!(f, "Invalid tolerance `{arg}`: must be finite and non-negative.")
            }
            Error::NonContiguous { arg } => write!(f, "Argument `{arg}` is not contiguous."),
        }
    }
}

impl error::Error for Error {}
