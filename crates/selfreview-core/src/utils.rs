//! Path helpers and log-field shortening.

use std::path::PathBuf;

/// `~/.selfreview`, or `./.selfreview` when no home directory is known.
pub fn get_data_path() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".selfreview")
}

/// `~/.selfreview/history`, where the REPL keeps its line history.
pub fn get_history_path() -> PathBuf {
    get_data_path().join("history")
}

/// Cut `text` to at most `max_chars` characters, ending in `...` when cut.
pub fn truncate_string(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some(_) => {
            let keep = max_chars.saturating_sub(3);
            let end = text.char_indices().nth(keep).map_or(text.len(), |(i, _)| i);
            format!("{}...", &text[..end])
        }
    }
}
