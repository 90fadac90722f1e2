//! Classification of raw manifest path references

use std::path::{Path, PathBuf};

use crate::formats::vpk;
use crate::utils::path::final_segment;

/// A manifest path reference, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathReference {
    /// `|marker|...` syntax; never resolved
    Reserved(String),
    /// Absolute path to an existing directory
    AbsoluteDirectory(PathBuf),
    /// Path naming a `.vpk` archive, as written (not yet `_dir`-normalized)
    Archive(PathBuf),
    /// Anything else: the name of another game under the same root
    NestedGame(String),
}

impl PathReference {
    /// Classify a raw token. Checks run in order: reserved marker, absolute
    /// directory, archive, nested game.
    #[must_use]
    pub fn classify(token: &str) -> Self {
        let token = token.trim();
        if token.starts_with('|') {
            return PathReference::Reserved(token.to_string());
        }

        let path = PathBuf::from(token.replace('\\', "/"));
        if path.is_absolute() && path.is_dir() {
            return PathReference::AbsoluteDirectory(path);
        }

        if is_archive_name(&path) {
            return PathReference::Archive(path);
        }

        PathReference::NestedGame(final_segment(&path))
    }
}

fn is_archive_name(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(vpk::EXTENSION))
}
