/*!
# IO utilities

CoNLL-U block reading and writing, and source directory listing.
!*/
mod reader;
mod writer;

use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::error;

use crate::error::Error;

pub use reader::BlockReader;
pub use writer::ConlluWriter;

/// List files of `dir` (non recursive) having one of `extensions`, case-insensitively.
///
/// Results are sorted so that processing order does not depend on the filesystem.
/// Unreadable entries are logged and skipped.
/// Errors with [Error::DirectoryNotFound] if `dir` is not a directory.
pub fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let dir_str = dir
        .to_str()
        .ok_or_else(|| Error::Custom(format!("non UTF-8 path: {:?}", dir)))?;
    let pattern = Path::new(&glob::Pattern::escape(dir_str)).join("*");

    let paths = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| {
            entry.map_or_else(
                |e| {
                    error!("error reading directory entry: {}", e);
                    None
                },
                Some,
            )
        })
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.iter().any(|ext| ext.eq_ignore_ascii_case(e)))
                .unwrap_or(false)
        })
        .sorted()
        .collect();

    Ok(paths)
}
