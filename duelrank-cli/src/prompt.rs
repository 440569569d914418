/// Text rendering for one duel on the terminal.
use duelrank_core::Progress;

use crate::parse::Keybinds;

/// Width of the progress bar in characters, excluding brackets.
pub const PROGRESS_BAR_WIDTH: usize = 30;

/// Render a `[#####.....]` bar for a progress snapshot.
pub fn progress_bar(progress: &Progress, width: usize) -> String {
    let filled = ((progress.fraction() * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Build the question shown for one comparison.
///
/// Left is the ranked challenger, right is the item being placed.
pub fn build_prompt(
    challenger: &str,
    challengee: &str,
    progress: &Progress,
    keys: &Keybinds,
    show_bar: bool,
) -> String {
    let counter = format!("{} / {}", progress.progress, progress.max_progress);
    let header = if show_bar {
        format!("{counter} {}", progress_bar(progress, PROGRESS_BAR_WIDTH))
    } else {
        counter
    };

    format!(
        "\n{header}\n\
         Which do you prefer?\n  \
         [{left}] {challenger}\n  \
         [{right}] {challengee}\n\
         ({quit} to quit) > ",
        left = keys.left,
        right = keys.right,
        quit = keys.quit,
    )
}
