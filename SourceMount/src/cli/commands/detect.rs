//! CLI command for detecting the game that owns a path

use std::path::Path;

use console::style;

use crate::config::ResolverConfig;
use crate::detect::find_game_with_manifest;
use crate::resolver::ContentResolver;

use super::resolve::print_resolution;

pub fn execute(path: &Path, resolve: bool, config: &ResolverConfig) -> anyhow::Result<()> {
    let Some(game) = find_game_with_manifest(path, &config.manifest_name) else {
        anyhow::bail!(
            "No {} found in {} or any parent directory",
            config.manifest_name,
            path.display()
        );
    };

    println!("{}  {}", style("game").dim(), style(&game.name).bold());
    println!("{}  {}", style("root").dim(), game.root.display());

    if resolve {
        let resolution =
            ContentResolver::with_config(config.clone()).resolve_with_diagnostics(&game.root, &game.name)?;
        println!();
        print_resolution(&resolution);
    }

    Ok(())
}
