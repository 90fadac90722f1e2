//! Content providers
//!
//! A provider gives uniform read access to one backing source of game
//! assets. The set of sources is fixed, so providers are a closed enum:
//!
//! - [`VpkProvider`] - a VPK archive bundle
//! - [`DirectoryProvider`] - a loose directory
//! - [`ManifestProvider`] - the directory a `gameinfo.txt` lives in

mod directory;
mod manifest;
mod vpk;

pub use directory::DirectoryProvider;
pub use manifest::ManifestProvider;
pub use vpk::VpkProvider;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Which kind of source a provider reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Vpk,
    Directory,
    Manifest,
}

impl ProviderKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Vpk => "vpk",
            ProviderKind::Directory => "directory",
            ProviderKind::Manifest => "manifest",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered content source
#[derive(Debug)]
pub enum ContentProvider {
    Vpk(VpkProvider),
    Directory(DirectoryProvider),
    Manifest(ManifestProvider),
}

impl ContentProvider {
    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        match self {
            ContentProvider::Vpk(_) => ProviderKind::Vpk,
            ContentProvider::Directory(_) => ProviderKind::Directory,
            ContentProvider::Manifest(_) => ProviderKind::Manifest,
        }
    }

    /// The file or directory backing this provider
    #[must_use]
    pub fn location(&self) -> &Path {
        match self {
            ContentProvider::Vpk(p) => p.path(),
            ContentProvider::Directory(p) => p.root(),
            ContentProvider::Manifest(p) => p.path(),
        }
    }

    /// Whether the provider has a file at `path`
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        match self {
            ContentProvider::Vpk(p) => p.contains(path),
            ContentProvider::Directory(p) => p.contains(path),
            ContentProvider::Manifest(p) => p.contains(path),
        }
    }

    /// Read a file, `Ok(None)` if the provider does not have it
    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match self {
            ContentProvider::Vpk(p) => p.read(path),
            ContentProvider::Directory(p) => p.read(path),
            ContentProvider::Manifest(p) => p.read(path),
        }
    }

    /// Every file path the provider serves (normalized form)
    pub fn entries(&self) -> Result<Vec<String>> {
        match self {
            ContentProvider::Vpk(p) => Ok(p.entries()),
            ContentProvider::Directory(p) => p.entries(),
            ContentProvider::Manifest(p) => p.entries(),
        }
    }
}

impl From<VpkProvider> for ContentProvider {
    fn from(provider: VpkProvider) -> Self {
        ContentProvider::Vpk(provider)
    }
}

impl From<DirectoryProvider> for ContentProvider {
    fn from(provider: DirectoryProvider) -> Self {
        ContentProvider::Directory(provider)
    }
}

impl From<ManifestProvider> for ContentProvider {
    fn from(provider: ManifestProvider) -> Self {
        ContentProvider::Manifest(provider)
    }
}
