use exn::{OptionExt, ResultExt};
use medialib_media::{FileId, Library, MediaFile};
use std::io::Write;

use crate::error::{ErrorKind, Result};

/// The files produced by the last result-bearing command.
///
/// Positions are fixed once the set is built. [`show`](Self::show) prints
/// them, and later commands address files by those same positions, so a new
/// listing always replaces the set rather than changing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    files: Vec<FileId>,
}
impl ResultSet {
    pub fn new(files: Vec<FileId>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = FileId> {
        self.files.iter().copied()
    }

    /// The file shown at `index`.
    pub fn get(&self, index: usize) -> Result<FileId> {
        self.files.get(index).copied().ok_or_raise(|| ErrorKind::IndexOutOfRange { index, len: self.len() })
    }

    /// Looks every entry up in `library`, in result order.
    pub fn files<'a>(&self, library: &'a Library) -> Result<Vec<&'a MediaFile>> {
        self.iter().map(|id| library.get(id).map_err(ErrorKind::media)).collect()
    }

    /// Prints `<index>: <description>` for every entry. Prints nothing for
    /// an empty set.
    pub fn show(&self, library: &Library, out: &mut impl Write) -> Result<()> {
        for (index, file) in self.files(library)?.into_iter().enumerate() {
            writeln!(out, "{index}: {file}").or_raise(|| ErrorKind::Output)?;
        }
        Ok(())
    }
}
