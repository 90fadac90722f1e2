//! # SourceMount
//!
//! A pure-Rust library for mounting Source engine game content.
//!
//! A game is described by its `gameinfo.txt`, which references other games,
//! VPK archives, and search-path directories, each of which may host a
//! manifest of its own. `SourceMount` walks that (possibly cyclic) graph once
//! per node and produces a flat, priority-ordered registry of content
//! providers.
//!
//! ## Supported Formats
//!
//! - **gameinfo.txt** - `KeyValues` manifests and their search paths
//! - **VPK** - version 1 and 2 archive bundles, including multi-part data files
//!
//! ## Quick Start
//!
//! ### Resolving a game
//!
//! ```no_run
//! use sourcemount::resolver::resolve;
//!
//! // Games live under a common root: /games/hl2/hl2, /games/hl2/ep2, ...
//! let registry = resolve("/games/hl2", "ep2")?;
//! for (id, provider) in registry.iter() {
//!     println!("{id}: {}", provider.location().display());
//! }
//!
//! // Read a file from the highest-priority provider that has it
//! let data = registry.read("scripts/weapon_pistol.txt")?;
//! # Ok::<(), sourcemount::Error>(())
//! ```
//!
//! ### Working with VPK archives
//!
//! ```no_run
//! use sourcemount::formats::vpk::VpkArchive;
//!
//! let archive = VpkArchive::open("hl2/hl2_misc_dir.vpk")?;
//! println!("Found {} files", archive.len());
//! let data = archive.read("scripts/game_sounds.txt", true)?;
//! # Ok::<(), sourcemount::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `sourcemount` command-line binary

pub mod config;
pub mod detect;
pub mod error;
pub mod formats;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::ResolverConfig;
    pub use crate::detect::{DetectedGame, find_game};
    pub use crate::error::{Error, Result};
    pub use crate::formats::gameinfo::GameInfo;
    pub use crate::formats::vpk::{VpkArchive, VpkWriter};
    pub use crate::provider::{
        ContentProvider, DirectoryProvider, ManifestProvider, ProviderKind, VpkProvider,
    };
    pub use crate::registry::ProviderRegistry;
    pub use crate::resolver::{ContentResolver, Diagnostic, PathReference, Resolution, resolve};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
