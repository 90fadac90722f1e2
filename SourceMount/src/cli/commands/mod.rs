use clap::Subcommand;
use std::path::PathBuf;

pub mod definitions;
mod execute;

pub mod detect;
pub mod find;
pub mod resolve;
pub mod vpk;

use definitions::VpkCommands;

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a game and print its providers in priority order
    Resolve {
        /// Directory containing the game directories
        root: PathBuf,

        /// Game directory name (e.g. "ep2")
        game: String,

        /// Emit the registry and diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the game that contains a path
    Detect {
        /// Any file or directory inside a game
        path: PathBuf,

        /// Also resolve the detected game
        #[arg(short, long)]
        resolve: bool,
    },

    /// Locate a file through a game's providers
    Find {
        /// Directory containing the game directories
        root: PathBuf,

        /// Game directory name
        game: String,

        /// File path inside the game (e.g. "scripts/game_sounds.txt")
        file: String,

        /// Write the file's contents here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// VPK archive operations
    Vpk {
        #[command(subcommand)]
        command: VpkCommands,
    },
}
