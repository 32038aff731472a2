//! Crate error type.

use thiserror::Error;

/// Errors raised by the annotation index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A caller passed an argument the index cannot address,
    /// e.g. a pattern path to `annotate`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
