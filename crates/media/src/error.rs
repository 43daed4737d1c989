//! Media Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use crate::models::MediaKind;
use derive_more::{Display, Error};

/// A media error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The type tag is not one of the recognised media kinds.
    #[display("unknown media type '{_0}', expecting image, document, audio or video")]
    UnknownKind(#[error(not(source))] String),
    /// A metadata keyword or value was empty (or only whitespace).
    #[display("metadata keyword and value must not be empty")]
    EmptyEntry,
    /// Adding a keyword that the file already has. Use `set` instead.
    #[display("keyword '{_0}' already exists")]
    DuplicateKeyword(#[error(not(source))] String),
    /// Removing a keyword that the file does not have.
    #[display("keyword '{_0}' not found")]
    KeywordNotFound(#[error(not(source))] String),
    /// Removing a keyword that the file's kind requires.
    #[display("keyword '{keyword}' is required for {kind} files")]
    RequiredKeyword {
        /// The mandatory keyword.
        keyword: String,
        /// The kind that requires it.
        kind: MediaKind,
    },
    /// No file is stored under the given library position.
    #[display("no file at library position {_0}")]
    FileNotFound(#[error(not(source))] usize),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Nothing here touches I/O; the same request always fails the same way.
        false
    }
}
