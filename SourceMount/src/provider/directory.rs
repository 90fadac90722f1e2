//! Loose directory provider

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::utils::path::{normalize_path, relative_path};

/// Serves files from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    /// Wrap an existing directory. The directory is not checked here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate a file, trying the path as written and then its lowercase form
    fn locate(&self, path: &str) -> Option<PathBuf> {
        let as_written = path.replace('\\', "/");
        let as_written = as_written.trim_start_matches('/');
        [self.root.join(as_written), self.root.join(normalize_path(path))]
            .into_iter()
            .find(|candidate| candidate.is_file())
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.locate(path).is_some()
    }

    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match self.locate(path) {
            Some(file) => Ok(Some(std::fs::read(file)?)),
            None => Ok(None),
        }
    }

    /// All files below the root, sorted
    pub fn entries(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(relative) = relative_path(entry.path(), self.root.as_path()) {
                files.push(normalize_path(relative));
            }
        }
        Ok(files)
    }
}
