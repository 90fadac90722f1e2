//! CLI command for locating a file through a game's providers

use std::path::Path;

use console::style;

use crate::cli::output::{DISK, format_size, styled_kind};
use crate::config::ResolverConfig;
use crate::resolver::ContentResolver;

pub fn execute(
    root: &Path,
    game: &str,
    file: &str,
    output: Option<&Path>,
    config: &ResolverConfig,
) -> anyhow::Result<()> {
    let registry = ContentResolver::with_config(config.clone()).resolve(root, game)?;

    let Some((id, provider)) = registry.find(file) else {
        anyhow::bail!("{file} not found in any of {} providers for {game}", registry.len());
    };

    println!(
        "{}  {}  {}",
        styled_kind(provider.kind()),
        style(id).bold(),
        provider.location().display()
    );

    if let Some(output) = output {
        let data = provider
            .read(file)?
            .ok_or_else(|| anyhow::anyhow!("{file} disappeared from {id}"))?;
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output, &data)?;
        println!(
            "{DISK}Wrote {} to {}",
            format_size(data.len() as u64),
            output.display()
        );
    }

    Ok(())
}
