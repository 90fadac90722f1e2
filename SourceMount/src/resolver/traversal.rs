//! Depth-first, cycle-safe traversal of the game reference graph

use std::path::{Path, PathBuf};

use super::Diagnostic;
use super::reference::PathReference;
use super::scanner::{find_archive_indexes, scanned_archive_id};
use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::formats::gameinfo::GameInfo;
use crate::formats::vpk;
use crate::provider::{DirectoryProvider, ManifestProvider, VpkProvider};
use crate::registry::ProviderRegistry;
use crate::utils::path::final_segment;

/// One in-flight resolution. Owns the registry exclusively for its lifetime;
/// the registry's key set doubles as the visited set.
pub(super) struct Traversal<'a> {
    pub config: &'a ResolverConfig,
    pub registry: &'a mut ProviderRegistry,
    pub diagnostics: &'a mut Vec<Diagnostic>,
}

impl Traversal<'_> {
    fn record(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Whether `path` already failed to load during this traversal
    fn already_skipped(&self, path: &Path) -> bool {
        self.diagnostics.iter().any(|d| match d {
            Diagnostic::ArchiveSkipped { path: skipped, .. }
            | Diagnostic::ManifestSkipped { path: skipped, .. } => skipped == path,
            Diagnostic::ReservedToken { .. } => false,
        })
    }

    /// Resolve game `name` under `root` and everything it references
    pub fn resolve_game(&mut self, root: &Path, name: &str) -> Result<()> {
        if name.is_empty() || self.registry.contains(name) {
            return Ok(());
        }

        let game_dir = root.join(name);
        let manifest_path = game_dir.join(&self.config.manifest_name);
        if !manifest_path.is_file() {
            tracing::debug!("No manifest at {}, skipping", manifest_path.display());
            return Ok(());
        }
        if self.already_skipped(&manifest_path) {
            return Ok(());
        }

        let gameinfo = match GameInfo::load(&manifest_path) {
            Ok(gameinfo) => gameinfo,
            Err(e @ Error::ManifestParse { .. }) => {
                self.record(Diagnostic::ManifestSkipped {
                    path: manifest_path,
                    reason: e.to_string(),
                });
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        tracing::debug!("Resolving game {:?} at {}", name, game_dir.display());

        let tokens: Vec<String> = gameinfo.reference_tokens().map(str::to_string).collect();
        let search_paths = if self.config.follow_search_paths {
            gameinfo.search_paths(self.config.expand_wildcards)?
        } else {
            Vec::new()
        };

        self.registry.register(name, ManifestProvider::new(gameinfo));

        self.scan_archives(&game_dir)?;

        for token in &tokens {
            self.resolve_reference(root, &manifest_path, token)?;
        }

        for path in &search_paths {
            self.resolve_search_path(path)?;
        }

        Ok(())
    }

    /// Register every `*_dir.vpk` directly inside `dir`
    pub fn scan_archives(&mut self, dir: &Path) -> Result<()> {
        for index in find_archive_indexes(dir)? {
            let id = scanned_archive_id(dir, &index);
            self.register_archive(id, &index)?;
        }
        Ok(())
    }

    fn resolve_reference(&mut self, root: &Path, manifest_path: &Path, token: &str) -> Result<()> {
        match PathReference::classify(token) {
            PathReference::Reserved(token) => {
                self.record(Diagnostic::ReservedToken {
                    token,
                    manifest: manifest_path.to_path_buf(),
                });
            }
            PathReference::AbsoluteDirectory(dir) => {
                self.registry.register(final_segment(&dir), DirectoryProvider::new(dir));
            }
            PathReference::Archive(path) => {
                if !self.resolve_archive_reference(root, &path)? {
                    tracing::debug!("Archive reference {:?} not found", token);
                }
            }
            PathReference::NestedGame(name) => {
                let has_manifest = root.join(&name).join(&self.config.manifest_name).is_file();
                if has_manifest || !self.resolve_archive_reference(root, Path::new(&name))? {
                    self.resolve_game(root, &name)?;
                }
            }
        }
        Ok(())
    }

    /// Register the index file for an archive reference, given as is
    /// (absolute) or relative to `root`. Returns whether the file exists.
    fn resolve_archive_reference(&mut self, root: &Path, path: &Path) -> Result<bool> {
        let index = vpk::normalize_index_path(path);
        let existing = if index.is_absolute() && index.is_file() {
            Some(index)
        } else {
            Some(root.join(&index)).filter(|p| p.is_file())
        };

        match existing {
            Some(index_path) => {
                self.register_archive(vpk::archive_stem(&index_path), &index_path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// A manifest-bearing directory takes precedence over the archive suffix
    fn resolve_search_path(&mut self, path: &Path) -> Result<()> {
        if path.is_dir() && path.join(&self.config.manifest_name).is_file() {
            // Resolve as game `name` under its parent so the manifest read is
            // `path/gameinfo.txt`, not `path/name/gameinfo.txt`
            if let Some(root) = path.parent() {
                return self.resolve_game(root, &final_segment(path));
            }
        }

        let is_archive = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(vpk::EXTENSION));
        if is_archive {
            return self.register_archive(vpk::archive_stem(path), path);
        }

        self.registry.register(final_segment(path), DirectoryProvider::new(path));
        Ok(())
    }

    /// Open and register an archive; invalid archives are skipped
    fn register_archive(&mut self, id: String, index_path: &Path) -> Result<()> {
        if self.registry.contains(&id) {
            tracing::debug!(
                "Provider id {:?} already registered, not opening {}",
                id,
                index_path.display()
            );
            return Ok(());
        }
        if self.already_skipped(index_path) {
            return Ok(());
        }

        match VpkProvider::open(index_path) {
            Ok(provider) => {
                let provider = provider.with_crc_verification(self.config.verify_crc);
                self.registry.register(id, provider);
                Ok(())
            }
            Err(e) if e.is_format_error() => {
                self.record(Diagnostic::ArchiveSkipped {
                    path: PathBuf::from(index_path),
                    reason: e.to_string(),
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
