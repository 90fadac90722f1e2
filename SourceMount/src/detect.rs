//! Game detection from arbitrary paths
//!
//! Given any file or directory inside a game tree, find the nearest
//! directory that holds a manifest and split it into the `(root, name)` pair
//! the resolver expects.

use std::path::{Path, PathBuf};

use crate::formats::gameinfo::GAMEINFO_FILE;
use crate::utils::path::final_segment;

/// A game located on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedGame {
    /// Directory containing the game directory
    pub root: PathBuf,
    /// Name of the game directory
    pub name: String,
}

impl DetectedGame {
    /// Path of the game directory itself
    #[must_use]
    pub fn game_dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }
}

/// Walk up from `path` to the nearest directory containing `gameinfo.txt`
#[must_use]
pub fn find_game<P: AsRef<Path>>(path: P) -> Option<DetectedGame> {
    find_game_with_manifest(path, GAMEINFO_FILE)
}

/// [`find_game`] with a custom manifest file name
#[must_use]
pub fn find_game_with_manifest<P: AsRef<Path>>(path: P, manifest_name: &str) -> Option<DetectedGame> {
    let path = path.as_ref();
    let start = if path.is_file() { path.parent()? } else { path };

    for dir in start.ancestors() {
        if !dir.join(manifest_name).is_file() {
            continue;
        }
        let name = final_segment(dir);
        let root = dir.parent()?;
        if name.is_empty() {
            return None;
        }
        tracing::debug!("Found game {:?} at {}", name, dir.display());
        return Some(DetectedGame {
            root: root.to_path_buf(),
            name,
        });
    }

    None
}
