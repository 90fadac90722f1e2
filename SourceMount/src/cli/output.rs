//! CLI output helpers
//!
//! Step indicators with emojis (ASCII fallback on plain terminals) and
//! human-readable sizes.

use std::time::Duration;

use console::{Emoji, style};

use crate::provider::ProviderKind;

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Package - for archive operations
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Link - for linking/mounting operations
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");

/// Print a step indicator: `[1/3] 📦 Message...`
pub fn print_step(current: usize, total: usize, emoji: &Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 12ms`
pub fn print_done(elapsed: Duration) {
    println!("{SPARKLE} Done in {elapsed:.2?}");
}

/// Provider kind, colored for terminal display
#[must_use]
pub fn styled_kind(kind: ProviderKind) -> String {
    let label = format!("{:<9}", kind.as_str());
    match kind {
        ProviderKind::Manifest => style(label).green().to_string(),
        ProviderKind::Vpk => style(label).cyan().to_string(),
        ProviderKind::Directory => style(label).yellow().to_string(),
    }
}

/// Format byte size for human-readable output
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}K", bytes as f64 / 1024.0)
    } else {
        format!("{bytes}")
    }
}
