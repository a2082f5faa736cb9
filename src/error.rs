use std::io;
use thiserror::Error;

/// Errors reported by the COBS encoder and decoder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CobsError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(#[from] InvalidArguments),
    #[error("malformed stream: {0}")]
    MalformedStream(#[from] Malformed),
}

/// Caller-side contract violations, detected before any byte is written.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArguments {
    #[error("source is empty")]
    EmptySource,
    #[error("destination holds {available} bytes, {required} required")]
    DestinationTooSmall { required: usize, available: usize },
}

/// Stuffed input that no encoder could have produced.
///
/// Offsets index into the stuffed input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    #[error("zero code byte at offset {offset}")]
    ZeroCode { offset: usize },
    #[error("zero literal byte at offset {offset}")]
    ZeroLiteral { offset: usize },
    #[error("block at offset {offset} is missing {missing} literal bytes")]
    Truncated { offset: usize, missing: usize },
}

impl CobsError {
    /// `true` if the input itself is corrupt rather than the call.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CobsError::MalformedStream(_))
    }
}

impl From<CobsError> for io::Error {
    fn from(err: CobsError) -> Self {
        let kind = match err {
            CobsError::InvalidArguments(_) => io::ErrorKind::InvalidInput,
            CobsError::MalformedStream(_) => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}
