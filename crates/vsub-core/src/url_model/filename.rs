//! Base filename convention for subtitle output.

use super::sanitize::{sanitize_title, truncate_to_bytes, NAME_MAX};
use crate::metadata::TitleEntry;

fn episode_tag(entry: &TitleEntry) -> String {
    entry
        .episode_number
        .map(|n| format!(".S01E{n:02}"))
        .unwrap_or_default()
}

/// Sanitized title, shortened so that title + `suffix` fits in NAME_MAX bytes.
fn fit(entry: &TitleEntry, suffix: &str) -> String {
    let title = sanitize_title(&entry.title);
    let budget = NAME_MAX.saturating_sub(suffix.len());
    format!("{}{}", truncate_to_bytes(&title, budget), suffix)
}

/// `<Title>.S01E<NN>` for episodes, `<Title>` for movies.
pub fn base_filename(entry: &TitleEntry) -> String {
    fit(entry, &episode_tag(entry))
}

/// `<base>.<language>.srt`, with the title cut short when the whole name
/// would exceed NAME_MAX. The episode tag and language are never cut.
pub fn subtitle_filename(entry: &TitleEntry, language: &str) -> String {
    let suffix = format!("{}.{}.srt", episode_tag(entry), sanitize_title(language));
    fit(entry, &suffix)
}
