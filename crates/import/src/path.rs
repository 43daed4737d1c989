//! Filename resolution for import and export.

use directories::BaseDirs;
use exn::{OptionExt, ResultExt};
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Resolves an operator-supplied filename to an absolute path.
///
/// - `/...` is used as-is.
/// - `~`, `~/...` (and `~...`) are taken relative to the home directory.
/// - Anything else is relative to the current working directory.
///
/// There is no search path and no extension inference.
pub fn resolve(filename: impl AsRef<str>) -> Result<PathBuf> {
    let filename = filename.as_ref();
    if filename.starts_with('~') {
        let dirs = BaseDirs::new().ok_or_raise(|| ErrorKind::HomeDirectory)?;
        return Ok(resolve_with(filename, dirs.home_dir(), Path::new("/")));
    }
    if filename.starts_with('/') {
        return Ok(PathBuf::from(filename));
    }
    let cwd = std::env::current_dir().or_raise(|| ErrorKind::WorkingDirectory)?;
    Ok(resolve_with(filename, Path::new("/"), &cwd))
}

fn resolve_with(filename: &str, home: &Path, cwd: &Path) -> PathBuf {
    if let Some(rest) = filename.strip_prefix('~') {
        return match rest.trim_start_matches('/') {
            "" => home.to_path_buf(),
            rest => home.join(rest),
        };
    }
    match filename.starts_with('/') {
        true => PathBuf::from(filename),
        false => cwd.join(filename),
    }
}
