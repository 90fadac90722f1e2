//! Command execution implementations

use super::Commands;
use super::definitions::VpkCommands;
use super::{detect, find, resolve, vpk};
use crate::config::ResolverConfig;
use crate::utils::expand_tilde;

use std::path::{Path, PathBuf};

/// Expand a leading `~` in a path argument
fn expand(path: &Path) -> PathBuf {
    expand_tilde(&path.to_string_lossy())
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, config: &ResolverConfig) -> anyhow::Result<()> {
        match self {
            Commands::Resolve { root, game, json } => {
                resolve::execute(&expand(root), game, *json, config)
            }
            Commands::Detect { path, resolve } => detect::execute(&expand(path), *resolve, config),
            Commands::Find {
                root,
                game,
                file,
                output,
            } => find::execute(
                &expand(root),
                game,
                file,
                output.as_deref().map(expand).as_deref(),
                config,
            ),
            Commands::Vpk { command } => command.execute(config),
        }
    }
}

impl VpkCommands {
    /// Execute the selected VPK command.
    ///
    /// # Errors
    /// Returns an error if the underlying archive operation fails.
    pub fn execute(&self, config: &ResolverConfig) -> anyhow::Result<()> {
        match self {
            VpkCommands::List {
                source,
                detailed,
                count,
            } => vpk::list(&expand(source), *detailed, *count),
            VpkCommands::Extract {
                source,
                file,
                destination,
                no_verify,
            } => vpk::extract(
                &expand(source),
                file,
                &expand(destination),
                config.verify_crc && !no_verify,
            ),
            VpkCommands::Create {
                source,
                destination,
                version,
            } => vpk::create(&expand(source), &expand(destination), *version),
        }
    }
}
