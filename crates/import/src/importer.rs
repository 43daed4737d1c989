use derive_more::Display;
use medialib_media::MediaFile;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::Result;
use crate::path::resolve;
use crate::record::RawMediaRecord;
use crate::report::Report;
use crate::validate::{Batch, Rejection, Validator};

/// Why a file produced no records at all.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The file could not be read at all (missing, forbidden, not a regular
    /// file, a bad path).
    #[display("cannot read file: {_0}")]
    Unreadable(IoErrorKind),
    /// The contents are not a JSON array of media records.
    #[display("malformed JSON at line {line}, column {column}")]
    Malformed { line: usize, column: usize },
}

/// Everything that came out of reading one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// The resolved, absolute path that was read.
    pub path: PathBuf,
    /// Files that passed validation, in array order.
    pub files: Vec<MediaFile>,
    /// Records that failed validation, in array order.
    pub rejections: Vec<Rejection>,
    /// Set when the file could not be decoded; `files` and `rejections` are
    /// then empty.
    pub failure: Option<DecodeFailure>,
}
impl Import {
    fn failed(path: PathBuf, failure: DecodeFailure) -> Self {
        Self { path, files: Vec::new(), rejections: Vec::new(), failure: Some(failure) }
    }

    /// Operator-facing diagnostics for this import. Renders nothing when the
    /// file decoded and every record was accepted.
    pub fn report(&self) -> Report<'_> {
        Report::new(self.failure.as_ref(), &self.rejections)
    }
}

enum Decoded {
    Records(Vec<RawMediaRecord>),
    Failed(DecodeFailure),
}

/// Reads media records from JSON files.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    validator: Validator,
}
impl Importer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `filename` (see [`resolve_path`](crate::resolve_path)) and
    /// imports it.
    ///
    /// An unreadable or malformed file is not an error: the returned
    /// [`Import`] carries a [`DecodeFailure`] and no files. Errors are
    /// reserved for paths that cannot be resolved.
    #[instrument(skip(self))]
    pub fn read(&self, filename: &str) -> Result<Import> {
        let path = resolve(filename)?;
        self.read_path(path)
    }

    /// Imports an already-resolved path.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Import> {
        let path = path.as_ref().to_path_buf();
        let records = match decode(&path) {
            Decoded::Records(records) => records,
            Decoded::Failed(failure) => {
                tracing::warn!(%failure, "could not decode media records");
                return Ok(Import::failed(path, failure));
            },
        };
        let Batch { files, rejections } = self.validator.validate_batch(records);
        tracing::info!(loaded = files.len(), rejected = rejections.len(), "imported media records");
        Ok(Import { path, files, rejections, failure: None })
    }
}

fn decode(path: &Path) -> Decoded {
    // Read everything up front so the handle is released before decoding.
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => return Decoded::Failed(DecodeFailure::Unreadable(err.kind())),
    };
    match serde_json::from_slice::<Vec<RawMediaRecord>>(&bytes) {
        Ok(records) => Decoded::Records(records),
        Err(err) => Decoded::Failed(DecodeFailure::Malformed { line: err.line(), column: err.column() }),
    }
}
