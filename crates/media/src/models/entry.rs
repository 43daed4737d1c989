use std::fmt::{Display, Formatter, Result as FmtResult};

use super::is_blank;

/// A single keyword/value pair attached to a [`MediaFile`](super::MediaFile).
///
/// Entries are immutable: changing a value means replacing the entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataEntry {
    keyword: String,
    value: String,
}
impl MetadataEntry {
    pub fn new(keyword: impl Into<String>, value: impl Into<String>) -> Self {
        Self { keyword: keyword.into(), value: value.into() }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if either the keyword or the value is empty or only
    /// whitespace.
    pub fn is_blank(&self) -> bool {
        is_blank(&self.keyword) || is_blank(&self.value)
    }
}
impl<K: Into<String>, V: Into<String>> From<(K, V)> for MetadataEntry {
    fn from((keyword, value): (K, V)) -> Self {
        Self::new(keyword, value)
    }
}
impl Display for MetadataEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.keyword, self.value)
    }
}
