use exn::ResultExt;
use medialib_media::MediaFile;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::path::resolve;
use crate::record::RawMediaRecord;

/// Writes `files` to `filename` (resolved like an import) in the same JSON
/// format the importer reads, returning the resolved path.
pub fn save<'a>(filename: &str, files: impl IntoIterator<Item = &'a MediaFile>) -> Result<PathBuf> {
    let path = resolve(filename)?;
    write_records(&path, files)?;
    Ok(path)
}

/// Writes `files` to an already-resolved path, replacing any existing file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_records<'a>(path: &Path, files: impl IntoIterator<Item = &'a MediaFile>) -> Result<()> {
    let records: Vec<RawMediaRecord> = files.into_iter().map(RawMediaRecord::from).collect();
    let file = File::create(path).or_raise(|| ErrorKind::Write(path.to_path_buf()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &records).or_raise(|| ErrorKind::Encode)?;
    writeln!(writer).or_raise(|| ErrorKind::Write(path.to_path_buf()))?;
    writer.flush().or_raise(|| ErrorKind::Write(path.to_path_buf()))?;
    tracing::info!(count = records.len(), "saved media records");
    Ok(())
}
