//! VPK archive format reader/writer
//!
//! A VPK bundle is a `<name>_dir.vpk` directory file holding a header and a
//! tree of entries, plus optional numbered part files (`<name>_000.vpk`,
//! `<name>_001.vpk`, ...) holding the bulk data.

mod reader;
mod types;
mod writer;

pub use reader::VpkArchive;
pub use types::*;
pub use writer::VpkWriter;

use std::path::{Path, PathBuf};

/// VPK signature (little-endian `34 12 AA 55` on disk)
pub const MAGIC: u32 = 0x55AA_1234;

/// Minimum supported VPK version
pub const MIN_VERSION: u32 = 1;

/// Maximum supported VPK version
pub const MAX_VERSION: u32 = 2;

/// Header size of a version 1 directory file
pub const HEADER_SIZE_V1: u64 = 12;

/// Header size of a version 2 directory file
pub const HEADER_SIZE_V2: u64 = 28;

/// Archive index meaning "data is stored in the directory file itself"
pub const DIR_ARCHIVE_INDEX: u16 = 0x7FFF;

/// Terminator following every entry record
pub const ENTRY_TERMINATOR: u16 = 0xFFFF;

/// File extension of VPK files
pub const EXTENSION: &str = "vpk";

/// Suffix marking the directory (index) file of a bundle
pub const DIR_SUFFIX: &str = "_dir";

/// Whether a file name looks like a VPK index (`*_dir.vpk`).
#[must_use]
pub fn is_index_file_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower
        .strip_suffix(".vpk")
        .is_some_and(|stem| stem.ends_with(DIR_SUFFIX))
}

/// Normalize an archive reference to its index file.
///
/// `pak01.vpk` and `pak01` both become `pak01_dir.vpk`; names already ending
/// in `_dir` only gain the extension if it is missing.
#[must_use]
pub fn normalize_index_path(path: &Path) -> PathBuf {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));
    let stem = if has_extension { path.file_stem() } else { path.file_name() };
    let Some(stem) = stem.map(|s| s.to_string_lossy().into_owned()) else {
        return path.to_path_buf();
    };

    if stem.to_ascii_lowercase().ends_with(DIR_SUFFIX) {
        path.with_file_name(format!("{stem}.{EXTENSION}"))
    } else {
        path.with_file_name(format!("{stem}{DIR_SUFFIX}.{EXTENSION}"))
    }
}

/// Stem of an archive with the `_dir` suffix removed.
///
/// `hl2/hl2_textures_dir.vpk` → `hl2_textures`
#[must_use]
pub fn archive_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem.to_ascii_lowercase().ends_with(DIR_SUFFIX) {
        stem[..stem.len() - DIR_SUFFIX.len()].to_string()
    } else {
        stem
    }
}

/// Path of a numbered data part belonging to an index file.
#[must_use]
pub fn part_path(index_path: &Path, archive_index: u16) -> PathBuf {
    let base = archive_stem(index_path);
    index_path.with_file_name(format!("{base}_{archive_index:03}.{EXTENSION}"))
}
