//! SourceMount CLI - Command-line interface for Source engine content mounting

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::config::ResolverConfig;
use crate::utils::expand_tilde;

#[derive(Parser)]
#[command(name = "sourcemount")]
#[command(about = "SourceMount: resolve Source engine games into content providers", long_about = None)]
#[command(version)]
struct Cli {
    /// Resolver configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn log_filter(&self) -> EnvFilter {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
        let level = match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        EnvFilter::new(level)
    }
}

/// Run the SourceMount CLI
///
/// # Errors
/// Returns an error if the config file is invalid or the command fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ResolverConfig::load(expand_tilde(&path.to_string_lossy()))?,
        None => ResolverConfig::default(),
    };

    cli.command.execute(&config)?;

    Ok(())
}
