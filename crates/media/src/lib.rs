//! Media file records and the in-memory library that holds them.
//!
//! A [`MediaFile`] is a path, a [`MediaKind`] and an ordered list of
//! [`MetadataEntry`] keyword/value pairs. Every kind carries a mandatory-field
//! policy (see [`MediaKind::required_keywords`]) which the importer enforces
//! on the way in and the metadata mutation methods enforce afterwards.
//!
//! The [`Library`] is add-only: files are never removed once loaded, so the
//! [`FileId`] handed out by [`Library::add`] stays valid for the life of the
//! library.

mod consts;
pub mod error;
mod library;
pub mod models;

pub use crate::consts::{CREATOR, RESOLUTION, RUNTIME};
pub use crate::library::{FileId, Library};
pub use crate::models::{MediaFile, MediaKind, MetadataEntry};
