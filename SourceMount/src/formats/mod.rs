//! File format handlers for Source engine content
//!
//! - [`keyvalues`] - the brace-delimited text format
//! - [`gameinfo`] - `gameinfo.txt` manifests built on top of it
//! - [`vpk`] - VPK archive bundles

pub mod gameinfo;
pub mod keyvalues;
pub mod vpk;

// Re-export main document types
pub use gameinfo::{GameInfo, SearchPathEntry};
pub use keyvalues::{KvNode, KvValue, parse_keyvalues};
pub use vpk::{VpkArchive, VpkEntry, VpkHeader, VpkWriter};
