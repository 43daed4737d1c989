use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;

use exn::OptionExt;

use crate::error::{ErrorKind, Result};
use crate::models::MediaFile;

/// Position of a file inside a [`Library`].
///
/// The library never removes files, so an id handed out by
/// [`Library::add`] keeps pointing at the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(usize);
impl FileId {
    pub fn index(&self) -> usize {
        self.0
    }
}
impl Display for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// The in-memory collection of every loaded file, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Library {
    files: Vec<MediaFile>,
}
impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: MediaFile) -> FileId {
        let id = FileId(self.files.len());
        tracing::trace!(%id, path = file.path(), "file added to library");
        self.files.push(file);
        id
    }

    /// Adds every file in order, returning the range of positions they now
    /// occupy.
    pub fn extend(&mut self, files: impl IntoIterator<Item = MediaFile>) -> Range<usize> {
        let start = self.count();
        for file in files {
            self.add(file);
        }
        start..self.count()
    }

    pub fn count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Every file, indexable `0..count()`.
    pub fn all(&self) -> &[MediaFile] {
        &self.files
    }

    /// The id of the file at `index`, if there is one.
    pub fn id(&self, index: usize) -> Option<FileId> {
        (index < self.files.len()).then_some(FileId(index))
    }

    pub fn ids(&self) -> impl Iterator<Item = FileId> {
        (0..self.files.len()).map(FileId)
    }

    pub fn get(&self, id: FileId) -> Result<&MediaFile> {
        self.files.get(id.0).ok_or_raise(|| ErrorKind::FileNotFound(id.0))
    }

    pub fn get_mut(&mut self, id: FileId) -> Result<&mut MediaFile> {
        self.files.get_mut(id.0).ok_or_raise(|| ErrorKind::FileNotFound(id.0))
    }

    /// Ids of the files matching at least one of `terms` (see
    /// [`MediaFile::matches`]), in library order. No terms matches everything.
    pub fn search<S: AsRef<str>>(&self, terms: &[S]) -> Vec<FileId> {
        self.files
            .iter()
            .enumerate()
            .filter(|(_, file)| terms.is_empty() || terms.iter().any(|term| file.matches(term.as_ref())))
            .map(|(i, _)| FileId(i))
            .collect()
    }
}
