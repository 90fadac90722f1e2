//! Subcommand enum definitions for CLI

use clap::Subcommand;
use std::path::PathBuf;

/// VPK archive commands
#[derive(Subcommand)]
pub enum VpkCommands {
    /// List files in a VPK archive
    List {
        /// Archive index file (`*_dir.vpk`, or the bare base name)
        source: PathBuf,

        /// Show size, CRC and location for each entry
        #[arg(short, long)]
        detailed: bool,

        /// Only print the number of entries
        #[arg(short, long)]
        count: bool,
    },

    /// Extract a single file from a VPK archive
    Extract {
        /// Archive index file
        source: PathBuf,

        /// Path of the file inside the archive
        file: String,

        /// Output file
        destination: PathBuf,

        /// Skip CRC verification
        #[arg(long)]
        no_verify: bool,
    },

    /// Create a single-file VPK archive from a directory
    Create {
        /// Directory to pack
        source: PathBuf,

        /// Output archive (`_dir` is appended when missing)
        destination: PathBuf,

        /// VPK version to write (1 or 2)
        #[arg(long, default_value_t = 2)]
        version: u32,
    },
}
