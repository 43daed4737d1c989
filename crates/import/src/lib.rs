//! JSON import and export of media file records.
//!
//! Importing is a two-phase decode. [`serde_json`] first turns the file into
//! loosely-typed [`RawMediaRecord`]s, then the [`Validator`] applies the
//! per-kind mandatory-field policy and turns each record into either a
//! [`MediaFile`](medialib_media::MediaFile) or a [`Rejection`].
//!
//! Nothing that goes wrong with a single file or record is an error here: a
//! missing or malformed file becomes a [`DecodeFailure`] and rejected records
//! are collected, both carried on the returned [`Import`] so the caller can
//! render them with [`Import::report`]. Only unexpected I/O faults (and a
//! missing home or working directory) surface as [`error::Error`].

pub mod error;
mod export;
mod importer;
mod path;
mod record;
mod report;
mod validate;

pub use crate::export::{save, write_records};
pub use crate::importer::{DecodeFailure, Import, Importer};
pub use crate::path::resolve as resolve_path;
pub use crate::record::RawMediaRecord;
pub use crate::report::Report;
pub use crate::validate::{Batch, Rejection, RejectionReason, Validator};
