//! Provider backed by a game's own manifest directory

use std::path::Path;

use super::DirectoryProvider;
use crate::error::Result;
use crate::formats::gameinfo::GameInfo;

/// A parsed `gameinfo.txt`, serving loose files from the directory it lives in
#[derive(Debug)]
pub struct ManifestProvider {
    gameinfo: GameInfo,
    directory: DirectoryProvider,
}

impl ManifestProvider {
    pub fn new(gameinfo: GameInfo) -> Self {
        let directory = DirectoryProvider::new(gameinfo.directory());
        Self {
            gameinfo,
            directory,
        }
    }

    /// Path of the manifest file
    #[must_use]
    pub fn path(&self) -> &Path {
        self.gameinfo.path()
    }

    #[must_use]
    pub fn gameinfo(&self) -> &GameInfo {
        &self.gameinfo
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.directory.contains(path)
    }

    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        self.directory.read(path)
    }

    pub fn entries(&self) -> Result<Vec<String>> {
        self.directory.entries()
    }
}
