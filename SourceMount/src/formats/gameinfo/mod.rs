//! `gameinfo.txt` manifest documents
//!
//! A manifest declares, under `GameInfo/FileSystem/SearchPaths`, the places
//! a game loads content from. Each entry is exposed two ways:
//!
//! - [`GameInfo::reference_tokens`] - the raw path strings, untouched
//! - [`GameInfo::search_paths`] - the same entries resolved to existing
//!   directories and archive index files on disk

mod search_paths;

pub use search_paths::{ALL_SOURCE_ENGINE_PATHS, GAMEINFO_PATH, resolve_search_path};

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::formats::keyvalues::{KvNode, parse_keyvalues};

/// Default manifest file name
pub const GAMEINFO_FILE: &str = "gameinfo.txt";

/// One `SearchPaths` line, e.g. `game+mod  hl2/hl2_misc.vpk`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPathEntry {
    /// Path IDs the entry is mounted under (`game+mod`)
    pub kinds: String,
    /// Raw path value
    pub path: String,
}

/// A parsed `gameinfo.txt`
#[derive(Debug, Clone)]
pub struct GameInfo {
    path: PathBuf,
    document: KvNode,
    entries: Vec<SearchPathEntry>,
}

impl GameInfo {
    /// Read and parse a manifest file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::ManifestParse`] if its contents are not a valid manifest.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        Self::parse(&text, path)
    }

    /// Parse manifest text that was read from `path`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestParse`] on syntax errors or when the text has
    /// no `GameInfo` block.
    pub fn parse(text: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let parse_error = |message: String| Error::ManifestParse {
            path: path.clone(),
            message,
        };

        let root = parse_keyvalues(text).map_err(|e| parse_error(e.to_string()))?;
        let document = root
            .get_block("GameInfo")
            .cloned()
            .ok_or_else(|| parse_error("missing \"GameInfo\" block".to_string()))?;

        let entries = document
            .get_path(&["FileSystem", "SearchPaths"])
            .map(|search_paths| {
                search_paths
                    .iter()
                    .filter_map(|(kinds, value)| {
                        value.as_str().map(|p| SearchPathEntry {
                            kinds: kinds.to_string(),
                            path: p.to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            path,
            document,
            entries,
        })
    }

    /// The manifest file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest (what `|gameinfo_path|` expands to)
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Parent of the manifest directory (what `|all_source_engine_paths|`
    /// and relative entries resolve against)
    #[must_use]
    pub fn engine_root(&self) -> &Path {
        let directory = self.directory();
        directory.parent().unwrap_or(directory)
    }

    /// The `GameInfo` block
    #[must_use]
    pub fn document(&self) -> &KvNode {
        &self.document
    }

    /// `game` value
    #[must_use]
    pub fn game(&self) -> Option<&str> {
        self.document.get_str("game")
    }

    /// `title` value
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.document.get_str("title")
    }

    /// All `SearchPaths` entries in declaration order
    #[must_use]
    pub fn entries(&self) -> &[SearchPathEntry] {
        &self.entries
    }

    /// Raw path values in declaration order, before any classification
    pub fn reference_tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// Entries resolved to existing paths, first occurrence wins
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a wildcard directory exists but cannot be read.
    pub fn search_paths(&self, expand_wildcards: bool) -> Result<Vec<PathBuf>> {
        let mut resolved: Vec<PathBuf> = Vec::new();
        for entry in &self.entries {
            for path in resolve_search_path(
                &entry.path,
                self.directory(),
                self.engine_root(),
                expand_wildcards,
            )? {
                if !resolved.contains(&path) {
                    resolved.push(path);
                }
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
"GameInfo"
{
    game    "Addon Test"
    title   "ADDON"
    FileSystem
    {
        SearchPaths
        {
            game        |gameinfo_path|.
            game        base
            game+mod    base/base_misc.vpk
            game        |all_source_engine_paths|platform
            game        custom/*
            game        missing
        }
    }
}
"#;

    #[test]
    fn test_reference_tokens_in_order() {
        let info = GameInfo::parse(MANIFEST, "/g/addon/gameinfo.txt").unwrap();
        assert_eq!(info.game(), Some("Addon Test"));
        assert_eq!(info.title(), Some("ADDON"));
        let tokens: Vec<_> = info.reference_tokens().collect();
        assert_eq!(
            tokens,
            vec![
                "|gameinfo_path|.",
                "base",
                "base/base_misc.vpk",
                "|all_source_engine_paths|platform",
                "custom/*",
                "missing",
            ]
        );
        assert_eq!(info.entries()[2].kinds, "game+mod");
    }

    #[test]
    fn test_missing_gameinfo_block() {
        let err = GameInfo::parse("Other { }", "/g/x/gameinfo.txt").unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
    }

    #[test]
    fn test_syntax_error_reported_as_manifest_error() {
        let err = GameInfo::parse("GameInfo {", "/g/x/gameinfo.txt").unwrap_err();
        assert!(matches!(err, Error::ManifestParse { path, .. } if path == Path::new("/g/x/gameinfo.txt")));
    }

    #[test]
    fn test_search_paths_resolution() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for dir in ["addon", "base", "platform", "custom/zeta", "custom/alpha"] {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }
        std::fs::write(root.join("base/base_misc_dir.vpk"), b"").unwrap();
        std::fs::write(root.join("custom/extra_dir.vpk"), b"").unwrap();
        std::fs::write(root.join("custom/notes.txt"), b"").unwrap();
        std::fs::write(root.join("addon/gameinfo.txt"), MANIFEST).unwrap();

        let info = GameInfo::load(root.join("addon/gameinfo.txt")).unwrap();
        let paths = info.search_paths(true).unwrap();
        assert_eq!(
            paths,
            vec![
                root.join("addon"),
                root.join("base"),
                root.join("base/base_misc_dir.vpk"),
                root.join("platform"),
                root.join("custom/alpha"),
                root.join("custom/extra_dir.vpk"),
                root.join("custom/zeta"),
            ]
        );

        let unexpanded = info.search_paths(false).unwrap();
        assert!(!unexpanded.contains(&root.join("custom/alpha")));
    }
}
