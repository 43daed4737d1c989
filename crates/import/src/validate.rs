use derive_more::{Display, Error};
use medialib_media::{MediaFile, MediaKind, MetadataEntry};
use tracing::instrument;

use crate::record::RawMediaRecord;

/// Placeholder used in messages when a metadata keyword is blank.
const BLANK_KEYWORD: &str = "<blank>";

/// Why a record was not turned into a [`MediaFile`].
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The `type` tag is not a recognised [`MediaKind`].
    #[display("invalid type '{found}', expecting image, document, audio or video")]
    InvalidType {
        /// The tag as it appeared in the record.
        found: String,
    },
    /// Mandatory keywords are missing or empty, or some entry is blank.
    #[display("invalid metadata for {kind}, missing or empty: {}", keywords.join(", "))]
    InvalidMetadataForType {
        kind: MediaKind,
        /// Offending keywords: missing mandatory ones first, then blank entries.
        keywords: Vec<String>,
    },
}

/// A record the [`Validator`] refused, with enough context to tell the
/// operator which one and why.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("{path}: {reason}")]
pub struct Rejection {
    pub path: String,
    pub reason: RejectionReason,
}

/// Outcome of validating a batch of records: accepted files and refused
/// records, each in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub files: Vec<MediaFile>,
    pub rejections: Vec<Rejection>,
}
impl Batch {
    /// Human-readable rejection messages, in the order they were recorded.
    pub fn error_messages(&self) -> impl Iterator<Item = String> {
        self.rejections.iter().map(ToString::to_string)
    }
}

/// Converts [`RawMediaRecord`]s into [`MediaFile`]s, enforcing the
/// mandatory-field policy of each [`MediaKind`].
///
/// Holds no state; every call to [`validate_batch`](Self::validate_batch)
/// starts from nothing, so one validator can be shared across imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;
impl Validator {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "trace", skip_all, fields(path = %record.fullpath))]
    pub fn validate(&self, record: RawMediaRecord) -> Result<MediaFile, Rejection> {
        let RawMediaRecord { fullpath, kind, metadata } = record;
        let kind = match kind.parse::<MediaKind>() {
            Ok(kind) => kind,
            Err(_) => return Err(Rejection { path: fullpath, reason: RejectionReason::InvalidType { found: kind } }),
        };

        let entries: Vec<MetadataEntry> = metadata.into_iter().map(MetadataEntry::from).collect();
        let mut keywords: Vec<String> = kind
            .required_keywords()
            .iter()
            .filter(|required| !entries.iter().any(|entry| entry.keyword() == **required && !entry.is_blank()))
            .map(|required| required.to_string())
            .collect();
        keywords.extend(
            entries
                .iter()
                .filter(|entry| entry.is_blank() && !kind.requires(entry.keyword()))
                .map(|entry| match entry.keyword().trim() {
                    "" => BLANK_KEYWORD.to_string(),
                    keyword => keyword.to_string(),
                }),
        );
        if !keywords.is_empty() {
            return Err(Rejection { path: fullpath, reason: RejectionReason::InvalidMetadataForType { kind, keywords } });
        }
        Ok(MediaFile::new(fullpath, kind, entries))
    }

    /// Validates every record in order, collecting rejections rather than
    /// stopping at the first one.
    #[instrument(skip_all)]
    pub fn validate_batch(&self, records: impl IntoIterator<Item = RawMediaRecord>) -> Batch {
        let mut batch = Batch::default();
        for record in records {
            match self.validate(record) {
                Ok(file) => batch.files.push(file),
                Err(rejection) => {
                    tracing::debug!(%rejection, "record rejected");
                    batch.rejections.push(rejection);
                },
            }
        }
        tracing::debug!(accepted = batch.files.len(), rejected = batch.rejections.len(), "batch validated");
        batch
    }
}
