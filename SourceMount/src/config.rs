//! Resolver configuration
//!
//! Defaults match the stock engine layout. A config file is plain TOML:
//!
//! ```toml
//! manifest_name = "gameinfo.txt"
//! follow_search_paths = true
//! expand_wildcards = true
//! verify_crc = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formats::gameinfo::GAMEINFO_FILE;

/// Options controlling content resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// File name of a game manifest
    pub manifest_name: String,
    /// Resolve the manifest's computed search paths after its references
    pub follow_search_paths: bool,
    /// Expand `dir/*` search path entries
    pub expand_wildcards: bool,
    /// Verify entry CRCs when reading from archives
    pub verify_crc: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            manifest_name: GAMEINFO_FILE.to_string(),
            follow_search_paths: true,
            expand_wildcards: true,
            verify_crc: true,
        }
    }
}

impl ResolverConfig {
    /// Load a config from a TOML file; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::InvalidConfig`] if it is not valid TOML for this struct.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text).map_err(|message| Error::InvalidConfig {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ResolverConfig::from_toml("verify_crc = false").unwrap();
        assert_eq!(
            config,
            ResolverConfig {
                verify_crc: false,
                ..ResolverConfig::default()
            }
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sourcemount.toml");
        std::fs::write(&path, "manifest = \"x\"").unwrap();

        let err = ResolverConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
