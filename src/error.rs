//! Shell Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Errors from the member crates are
//! re-raised as a variant here, keeping their `Exn` frame as a child.

use derive_more::{Display, Error};
use medialib_config::error::{Error as ConfigError, ErrorKind as ConfigErrorKind};
use medialib_import::error::{Error as ImportError, ErrorKind as ImportErrorKind};
use medialib_media::error::{Error as MediaError, ErrorKind as MediaErrorKind};

/// A shell error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for shell operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Every variant except [`Output`](Self::Output), [`Input`](Self::Input) and
/// [`Logging`](Self::Logging) aborts only the command that raised it.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, malformed or surplus arguments for the named command.
    #[display("invalid parameters for '{_0}', type 'help' for usage")]
    InvalidParameters(#[error(not(source))] &'static str),
    /// The command addresses a previous result set but there is none.
    #[display("no previous results to work with, try 'list' first")]
    MissingResultSet,
    /// The first word of the line is not a command.
    #[display("unknown command '{_0}', type 'help' for usage")]
    UnknownCommand(#[error(not(source))] String),
    /// A result set index beyond the end of the last results.
    #[display("index {index} is out of range for {len} results")]
    IndexOutOfRange { index: usize, len: usize },
    #[display("{_0}")]
    Media(MediaErrorKind),
    #[display("{_0}")]
    Import(ImportErrorKind),
    #[display("{_0}")]
    Config(ConfigErrorKind),
    /// Writing to the operator failed; the session cannot continue.
    #[display("could not write output")]
    Output,
    /// Reading operator input failed; the session cannot continue.
    #[display("could not read input")]
    Input,
    #[display("could not initialise logging")]
    Logging,
}

impl ErrorKind {
    #[track_caller]
    pub fn media(err: MediaError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Media(inner))
    }

    #[track_caller]
    pub fn import(err: ImportError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Import(inner))
    }

    #[track_caller]
    pub fn config(err: ConfigError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Config(inner))
    }

    /// Returns `true` if the session has to stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Output | Self::Input | Self::Logging)
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Media(inner) => inner.is_retryable(),
            Self::Import(inner) => inner.is_retryable(),
            Self::Config(inner) => inner.is_retryable(),
            _ => false,
        }
    }
}
