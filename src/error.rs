//! errors raised while decoding, reconstructing or validating a share set

use num_bigint::BigInt;
use num_rational::BigRational;
use serde::Serialize;
use thiserror::Error;

/// Every failure a solve can report. Each variant carries the data needed to
/// explain it; [`Error::kind`] gives the bare tag for programmatic matching.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid base {0}: must be between 2 and 36")]
    InvalidBase(String),

    #[error("invalid digit in value {value:?} for base {base}")]
    InvalidDigit { value: String, base: u32 },

    #[error("malformed test case: {0}")]
    MalformedTestCase(String),

    #[error("insufficient points: need {required}, got {available}")]
    InsufficientPoints { required: usize, available: usize },

    /// Two basis points share an abscissa; `first` and `second` are their
    /// positions in the basis.
    #[error("duplicate abscissa x = {x} at basis positions {first} and {second}")]
    DuplicateAbscissa { x: BigInt, first: usize, second: usize },

    #[error("reconstruction inconsistency: interpolated secret {0} is not an integer")]
    ReconstructionInconsistency(BigRational),

    #[error("invalid tolerance {0}: must be a non-negative number")]
    InvalidTolerance(f64),
}

/// Tag of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[non_exhaustive]
pub enum ErrorKind {
    InvalidBase,
    InvalidDigit,
    MalformedTestCase,
    InsufficientPoints,
    DuplicateAbscissa,
    ReconstructionInconsistency,
    InvalidTolerance,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidBase(_) => ErrorKind::InvalidBase,
            Error::InvalidDigit { .. } => ErrorKind::InvalidDigit,
            Error::MalformedTestCase(_) => ErrorKind::MalformedTestCase,
            Error::InsufficientPoints { .. } => ErrorKind::InsufficientPoints,
            Error::DuplicateAbscissa { .. } => ErrorKind::DuplicateAbscissa,
            Error::ReconstructionInconsistency(_) => ErrorKind::ReconstructionInconsistency,
            Error::InvalidTolerance(_) => ErrorKind::InvalidTolerance,
        }
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Error::MalformedTestCase(detail.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
