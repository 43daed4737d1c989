mod entry;
mod file;
mod kind;

pub use self::entry::MetadataEntry;
pub use self::file::MediaFile;
pub use self::kind::MediaKind;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase()
}

fn is_blank(s: impl AsRef<str>) -> bool {
    s.as_ref().trim().is_empty()
}
