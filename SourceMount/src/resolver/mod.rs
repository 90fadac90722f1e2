//! Layered content resolution
//!
//! Resolving a game walks its `gameinfo.txt` and everything it references,
//! registering each content source it finds in a [`ProviderRegistry`]:
//!
//! 1. The manifest itself is registered under the game's name.
//! 2. Every `*_dir.vpk` in the game directory is registered as
//!    `{dirName}_{archiveStem}`.
//! 3. Each `SearchPaths` token is classified: reserved markers are skipped
//!    with a warning, absolute directories and `.vpk` references are
//!    registered, anything else is resolved as another game.
//! 4. Each computed search path is registered (or recursed into, when it
//!    hosts its own manifest).
//!
//! Registration is first-wins, so the earliest declared source for an id
//! keeps priority, and an id already present stops recursion (cycles
//! terminate).
//!
//! # Usage
//!
//! ```no_run
//! use sourcemount::resolver::ContentResolver;
//!
//! let resolution = ContentResolver::new().resolve_with_diagnostics("/games/hl2", "ep2")?;
//! for (id, provider) in resolution.registry.iter() {
//!     println!("{id}: {} {}", provider.kind(), provider.location().display());
//! }
//! for warning in &resolution.diagnostics {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok::<(), sourcemount::Error>(())
//! ```

mod reference;
mod scanner;
mod traversal;

pub use reference::PathReference;
pub use scanner::{find_archive_indexes, scanned_archive_id};

use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::registry::ProviderRegistry;
use traversal::Traversal;

/// A non-fatal event during resolution. Each one is also logged as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A `|marker|` path reference was skipped
    ReservedToken { token: String, manifest: PathBuf },
    /// An archive failed header validation and was skipped
    ArchiveSkipped { path: PathBuf, reason: String },
    /// A manifest exists but could not be parsed; its branch was skipped
    ManifestSkipped { path: PathBuf, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ReservedToken { token, manifest } => write!(
                f,
                "skipping reserved path {token:?} in {}",
                manifest.display()
            ),
            Diagnostic::ArchiveSkipped { path, reason } => {
                write!(f, "skipping archive {}: {reason}", path.display())
            }
            Diagnostic::ManifestSkipped { path, reason } => {
                write!(f, "skipping manifest {}: {reason}", path.display())
            }
        }
    }
}

/// Registry plus everything that was skipped while building it
#[derive(Debug, Default)]
pub struct Resolution {
    pub registry: ProviderRegistry,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves games into provider registries
#[derive(Debug, Clone, Default)]
pub struct ContentResolver {
    config: ResolverConfig,
}

impl ContentResolver {
    /// A resolver with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve game `name` under `root` into a fresh registry
    ///
    /// # Errors
    ///
    /// Only environment failures ([`crate::Error::Io`]) propagate. Missing
    /// manifests, unparsable manifests, invalid archives and reserved
    /// references are absorbed (see [`ContentResolver::resolve_with_diagnostics`]).
    pub fn resolve<P: AsRef<Path>>(&self, root: P, name: &str) -> Result<ProviderRegistry> {
        self.resolve_with_diagnostics(root, name)
            .map(|resolution| resolution.registry)
    }

    /// Like [`ContentResolver::resolve`], also returning what was skipped
    pub fn resolve_with_diagnostics<P: AsRef<Path>>(
        &self,
        root: P,
        name: &str,
    ) -> Result<Resolution> {
        let root = root.as_ref();
        tracing::info!("Resolving game {:?} under {}", name, root.display());

        let mut resolution = Resolution::default();
        self.resolve_into(root, name, &mut resolution.registry, &mut resolution.diagnostics)?;

        tracing::info!(
            "Resolved {} providers for {:?} ({} skipped)",
            resolution.registry.len(),
            name,
            resolution.diagnostics.len()
        );
        Ok(resolution)
    }

    /// Resolve into an existing registry
    ///
    /// Ids already present in `registry` are treated as visited.
    pub fn resolve_into<P: AsRef<Path>>(
        &self,
        root: P,
        name: &str,
        registry: &mut ProviderRegistry,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        Traversal {
            config: &self.config,
            registry,
            diagnostics,
        }
        .resolve_game(root.as_ref(), name)
    }

    /// Register the archives directly inside `dir` without reading any manifest
    pub fn scan_archives<P: AsRef<Path>>(
        &self,
        dir: P,
        registry: &mut ProviderRegistry,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        Traversal {
            config: &self.config,
            registry,
            diagnostics,
        }
        .scan_archives(dir.as_ref())
    }

    /// Resolve several independent `(root, name)` requests in parallel
    ///
    /// Each request gets its own registry; results keep the request order.
    pub fn resolve_all(&self, requests: &[(PathBuf, String)]) -> Vec<Result<Resolution>> {
        requests
            .par_iter()
            .map(|(root, name)| self.resolve_with_diagnostics(root, name))
            .collect()
    }
}

/// Resolve with the default configuration
///
/// # Errors
///
/// See [`ContentResolver::resolve`].
pub fn resolve<P: AsRef<Path>>(root: P, name: &str) -> Result<ProviderRegistry> {
    ContentResolver::new().resolve(root, name)
}
