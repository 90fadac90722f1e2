//! Discovery of archive index files inside a game directory

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::formats::vpk;
use crate::utils::path::final_segment;

/// Find every `*_dir.vpk` directly inside `dir`, sorted by file name
///
/// Subdirectories are not searched.
pub fn find_archive_indexes<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut indexes = Vec::new();
    if !dir.is_dir() {
        return Ok(indexes);
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.path().is_file() && vpk::is_index_file_name(&entry.file_name().to_string_lossy()) {
            indexes.push(entry.into_path());
        }
    }

    Ok(indexes)
}

/// Registry id for an archive found by scanning `dir`: `{dirName}_{archiveStem}`
#[must_use]
pub fn scanned_archive_id(dir: &Path, index_path: &Path) -> String {
    format!("{}_{}", final_segment(dir), vpk::archive_stem(index_path))
}
