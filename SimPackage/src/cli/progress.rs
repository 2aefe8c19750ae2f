//! CLI progress display utilities
//!
//! Step indicators, emojis and the index progress bar.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::dbpf::{DecodePhase, DecodeProgress};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Print a step indicator: `[1/1] 🔍 Message...`
pub fn print_step(current: usize, total: usize, emoji: &Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Progress bar style for determinate progress
///
/// Format: `Reading index [████████░░░░░░░░] 50/100`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .expect("valid template")
        .progress_chars("##-")
}

/// Create a hidden-until-used bar for index decoding
#[must_use]
pub fn index_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(bar_style());
    pb.set_message(DecodePhase::ReadingIndex.as_str());
    pb
}

/// Forward a decode progress update to a progress bar
pub fn update_bar(pb: &ProgressBar, progress: &DecodeProgress) {
    match progress.phase {
        DecodePhase::ReadingIndex => {
            if pb.length() != Some(progress.total as u64) {
                pb.set_length(progress.total as u64);
            }
            pb.set_position(progress.current as u64);
        }
        phase => pb.set_message(phase.as_str()),
    }
}
