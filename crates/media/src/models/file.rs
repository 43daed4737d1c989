use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use super::{MediaKind, MetadataEntry};
use crate::error::{ErrorKind, Result};

/// A media file known to the library.
///
/// Constructed by the importer's validator once a record has passed the
/// [`MediaKind`] mandatory-field policy. Keywords are unique within a file.
/// After construction the metadata can only be changed through
/// [`add_metadata`](Self::add_metadata), [`set_metadata`](Self::set_metadata)
/// and [`remove_metadata`](Self::remove_metadata), each of which checks the
/// whole request before applying any of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    path: String,
    kind: MediaKind,
    metadata: Vec<MetadataEntry>,
}
impl MediaFile {
    pub fn new(path: impl Into<String>, kind: MediaKind, metadata: impl IntoIterator<Item = MetadataEntry>) -> Self {
        Self { path: path.into(), kind, metadata: metadata.into_iter().collect() }
    }

    /// The full path the file was recorded under.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The final component of [`path`](Self::path), or the whole path when it
    /// has no final component (e.g. `/`).
    pub fn filename(&self) -> &str {
        Path::new(&self.path).file_name().and_then(|name| name.to_str()).unwrap_or(&self.path)
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn metadata(&self) -> &[MetadataEntry] {
        &self.metadata
    }

    /// Looks up the value stored under `keyword`.
    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.metadata.iter().find(|entry| entry.keyword() == keyword).map(MetadataEntry::value)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    /// Returns `true` if any keyword or value equals `term`, ignoring case.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.metadata
            .iter()
            .any(|entry| entry.keyword().to_lowercase() == term || entry.value().to_lowercase() == term)
    }

    /// Appends new entries. Fails without changing anything if an entry is
    /// blank or its keyword is already present (on the file, or earlier in
    /// the same request).
    pub fn add_metadata(&mut self, entries: impl IntoIterator<Item = MetadataEntry>) -> Result<()> {
        let entries: Vec<MetadataEntry> = entries.into_iter().collect();
        for (i, entry) in entries.iter().enumerate() {
            if entry.is_blank() {
                exn::bail!(ErrorKind::EmptyEntry);
            }
            if self.contains(entry.keyword()) || entries[..i].iter().any(|e| e.keyword() == entry.keyword()) {
                exn::bail!(ErrorKind::DuplicateKeyword(entry.keyword().to_string()));
            }
        }
        for entry in entries {
            tracing::debug!(path = %self.path, keyword = entry.keyword(), "metadata added");
            self.metadata.push(entry);
        }
        Ok(())
    }

    /// Replaces the value of existing keywords in place and appends the rest.
    /// Fails without changing anything if any entry is blank.
    pub fn set_metadata(&mut self, entries: impl IntoIterator<Item = MetadataEntry>) -> Result<()> {
        let entries: Vec<MetadataEntry> = entries.into_iter().collect();
        if entries.iter().any(MetadataEntry::is_blank) {
            exn::bail!(ErrorKind::EmptyEntry);
        }
        for entry in entries {
            tracing::debug!(path = %self.path, keyword = entry.keyword(), "metadata set");
            match self.metadata.iter_mut().find(|existing| existing.keyword() == entry.keyword()) {
                Some(existing) => *existing = entry,
                None => self.metadata.push(entry),
            }
        }
        Ok(())
    }

    /// Removes the given keywords. Fails without changing anything if a
    /// keyword is mandatory for this file's kind or is not present.
    pub fn remove_metadata<S: AsRef<str>>(&mut self, keywords: &[S]) -> Result<()> {
        for keyword in keywords {
            let keyword: &str = keyword.as_ref();
            if self.kind.requires(keyword) {
                exn::bail!(ErrorKind::RequiredKeyword { keyword: keyword.to_string(), kind: self.kind });
            }
            if !self.contains(keyword) {
                exn::bail!(ErrorKind::KeywordNotFound(keyword.to_string()));
            }
        }
        tracing::debug!(path = %self.path, count = keywords.len(), "metadata removed");
        self.metadata.retain(|entry| !keywords.iter().any(|keyword| keyword.as_ref() == entry.keyword()));
        Ok(())
    }
}
impl Display for MediaFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} [{}]", self.path, self.kind)?;
        for (i, entry) in self.metadata.iter().enumerate() {
            let separator = if i == 0 { " " } else { ", " };
            write!(f, "{separator}{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn photo() -> MediaFile {
        MediaFile::new(
            "/home/ansel/photos/moonrise.jpg",
            MediaKind::Image,
            [MetadataEntry::new("creator", "Ansel Adams"), MetadataEntry::new("resolution", "4000x3000")],
        )
    }

    #[rstest]
    #[case("/home/ansel/photos/moonrise.jpg", "moonrise.jpg")]
    #[case("moonrise.jpg", "moonrise.jpg")]
    #[case("photos/", "photos")]
    #[case("/", "/")]
    fn test_filename(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(MediaFile::new(path, MediaKind::Image, []).filename(), expected);
    }

    #[test]
    fn test_description_contains_metadata_verbatim() {
        let file = photo();
        assert_eq!(
            file.to_string(),
            "/home/ansel/photos/moonrise.jpg [image] creator: Ansel Adams, resolution: 4000x3000"
        );
    }

    #[test]
    fn test_description_without_metadata() {
        assert_eq!(MediaFile::new("notes.txt", MediaKind::Document, []).to_string(), "notes.txt [document]");
    }

    #[rstest]
    #[case("ansel adams", true)]
    #[case("CREATOR", true)]
    #[case("4000x3000", true)]
    #[case("ansel", false)]
    #[case("runtime", false)]
    fn test_matches(#[case] term: &str, #[case] expected: bool) {
        assert_eq!(photo().matches(term), expected);
    }

    #[test]
    fn test_add_metadata() {
        let mut file = photo();
        file.add_metadata([MetadataEntry::new("location", "Hernandez")]).unwrap();
        assert_eq!(file.get("location"), Some("Hernandez"));
        assert_eq!(file.metadata().last().unwrap().keyword(), "location");
    }

    #[test]
    fn test_add_metadata_rejects_existing_keyword() {
        let mut file = photo();
        let err = file
            .add_metadata([MetadataEntry::new("year", "1941"), MetadataEntry::new("creator", "Someone Else")])
            .unwrap_err();
        assert_eq!(*err, ErrorKind::DuplicateKeyword("creator".to_string()));
        // Nothing from the failed request was applied.
        assert_eq!(file, photo());
    }

    #[test]
    fn test_add_metadata_rejects_repeated_keyword_in_request() {
        let mut file = photo();
        let err = file.add_metadata([MetadataEntry::new("year", "1941"), MetadataEntry::new("year", "1942")]).unwrap_err();
        assert_eq!(*err, ErrorKind::DuplicateKeyword("year".to_string()));
        assert!(!file.contains("year"));
    }

    #[test]
    fn test_add_metadata_rejects_blank_entry() {
        let mut file = photo();
        let err = file.add_metadata([MetadataEntry::new("year", " ")]).unwrap_err();
        assert_eq!(*err, ErrorKind::EmptyEntry);
    }

    #[test]
    fn test_set_metadata_replaces_in_place() {
        let mut file = photo();
        file.set_metadata([MetadataEntry::new("creator", "A. Adams"), MetadataEntry::new("year", "1941")]).unwrap();
        assert_eq!(file.metadata()[0], MetadataEntry::new("creator", "A. Adams"));
        assert_eq!(file.get("year"), Some("1941"));
        assert_eq!(file.metadata().len(), 3);
    }

    #[test]
    fn test_remove_metadata() {
        let mut file = photo();
        file.add_metadata([MetadataEntry::new("year", "1941")]).unwrap();
        file.remove_metadata(&["year"]).unwrap();
        assert_eq!(file, photo());
    }

    #[rstest]
    #[case("creator", ErrorKind::RequiredKeyword { keyword: "creator".to_string(), kind: MediaKind::Image })]
    #[case("resolution", ErrorKind::RequiredKeyword { keyword: "resolution".to_string(), kind: MediaKind::Image })]
    #[case("year", ErrorKind::KeywordNotFound("year".to_string()))]
    fn test_remove_metadata_refused(#[case] keyword: &str, #[case] expected: ErrorKind) {
        let mut file = photo();
        let err = file.remove_metadata(&[keyword]).unwrap_err();
        assert_eq!(*err, expected);
        assert_eq!(file, photo());
    }
}
