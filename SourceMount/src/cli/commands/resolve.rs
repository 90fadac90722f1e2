//! CLI command for resolving a game into its providers

use std::path::Path;
use std::time::Instant;

use console::style;

use crate::cli::output::{LINK, LOOKING_GLASS, print_done, print_step, styled_kind};
use crate::config::ResolverConfig;
use crate::resolver::{ContentResolver, Resolution};

pub fn execute(root: &Path, game: &str, json: bool, config: &ResolverConfig) -> anyhow::Result<()> {
    let started = Instant::now();
    let resolver = ContentResolver::with_config(config.clone());

    if json {
        let resolution = resolver.resolve_with_diagnostics(root, game)?;
        let report = serde_json::json!({
            "root": root,
            "game": game,
            "providers": resolution.registry.summary(),
            "diagnostics": resolution.diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_step(1, 2, &LOOKING_GLASS, &format!("Resolving {game} under {}...", root.display()));
    let resolution = resolver.resolve_with_diagnostics(root, game)?;

    print_step(2, 2, &LINK, &format!("{} providers", resolution.registry.len()));
    print_resolution(&resolution);

    print_done(started.elapsed());
    Ok(())
}

pub(crate) fn print_resolution(resolution: &Resolution) {
    if resolution.registry.is_empty() {
        println!("  {}", style("no providers (missing manifest?)").dim());
    }

    for (index, (id, provider)) in resolution.registry.iter().enumerate() {
        println!(
            "  {:>3}  {}  {:<24}  {}",
            index + 1,
            styled_kind(provider.kind()),
            style(id).bold(),
            provider.location().display()
        );
    }

    for diagnostic in &resolution.diagnostics {
        println!("  {} {diagnostic}", style("warning:").yellow().bold());
    }
}
