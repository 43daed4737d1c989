//! Import Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Bad input is absent here: unreadable or malformed files and invalid
//! records are reported through [`DecodeFailure`](crate::DecodeFailure) and
//! [`Rejection`](crate::Rejection) instead.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An import error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for import and export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A `~` path was given but the user's home directory is unknown.
    #[display("could not determine home directory")]
    HomeDirectory,
    /// A relative path was given but the working directory is unavailable.
    #[display("could not determine current working directory")]
    WorkingDirectory,
    /// Creating or writing an output file failed.
    #[display("could not write {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
    /// Records could not be serialized.
    #[display("could not encode records as JSON")]
    Encode,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}
