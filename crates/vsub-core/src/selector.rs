//! Episode selection (`-e 4`, `-e 3-5`) and language filtering (`-l en`, `-l all`).

use std::fmt;

use crate::error::{Result, VsubError};
use crate::metadata::TitleEntry;

/// Which episodes of a series to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeSelector {
    /// No selector given: keep everything.
    All,
    Single(u32),
    /// Inclusive on both ends. `start > end` selects nothing.
    Range { start: u32, end: u32 },
    /// Input that is neither a number nor `start-end`. Matches no episode.
    Unmatched(String),
}

fn parse_number(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl EpisodeSelector {
    pub fn parse(input: Option<&str>) -> Self {
        let raw = match input.map(str::trim) {
            None | Some("") => return EpisodeSelector::All,
            Some(raw) => raw,
        };
        if let Some((start, end)) = raw.split_once('-') {
            return match (parse_number(start), parse_number(end)) {
                (Some(start), Some(end)) => EpisodeSelector::Range { start, end },
                _ => EpisodeSelector::Unmatched(raw.to_string()),
            };
        }
        match parse_number(raw) {
            Some(n) => EpisodeSelector::Single(n),
            None => EpisodeSelector::Unmatched(raw.to_string()),
        }
    }

    pub fn matches(&self, episode: u32) -> bool {
        match self {
            EpisodeSelector::All => true,
            EpisodeSelector::Single(n) => episode == *n,
            EpisodeSelector::Range { start, end } => (*start..=*end).contains(&episode),
            EpisodeSelector::Unmatched(_) => false,
        }
    }

    /// Keeps the entries whose episode number matches, preserving order.
    /// Entries without a number survive only the `All` selector.
    pub fn apply(&self, entries: Vec<TitleEntry>) -> Vec<TitleEntry> {
        if *self == EpisodeSelector::All {
            return entries;
        }
        if let EpisodeSelector::Unmatched(raw) = self {
            tracing::warn!(selector = %raw, "episode selector is not N or N-M; nothing selected");
        }
        entries
            .into_iter()
            .filter(|e| e.episode_number.is_some_and(|n| self.matches(n)))
            .collect()
    }
}

impl fmt::Display for EpisodeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpisodeSelector::All => write!(f, "all"),
            EpisodeSelector::Single(n) => write!(f, "{n}"),
            EpisodeSelector::Range { start, end } => write!(f, "{start}-{end}"),
            EpisodeSelector::Unmatched(raw) => write!(f, "{raw}"),
        }
    }
}

/// Requested subtitle language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageFilter {
    All,
    /// Lower-cased language code.
    Only(String),
}

impl LanguageFilter {
    /// `all` (any case) selects every language; anything else, including an
    /// empty string, is a code that must be offered by every entry.
    pub fn parse(input: &str) -> Self {
        let code = input.trim().to_lowercase();
        if code == "all" {
            LanguageFilter::All
        } else {
            LanguageFilter::Only(code)
        }
    }

    pub fn matches(&self, language: &str) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(code) => code.eq_ignore_ascii_case(language),
        }
    }

    /// Fails with `LanguageUnavailable` when a specific code is not offered for `entry`.
    pub fn check(&self, entry: &TitleEntry) -> Result<()> {
        match self {
            LanguageFilter::Only(code)
                if !entry.available_languages.iter().any(|l| self.matches(l)) =>
            {
                Err(VsubError::LanguageUnavailable {
                    requested: code.clone(),
                    available: entry.available_languages.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Languages of `entry` to download, in the entry's order.
    pub fn select<'a>(&'a self, entry: &'a TitleEntry) -> impl Iterator<Item = &'a str> + 'a {
        entry
            .available_languages
            .iter()
            .map(String::as_str)
            .filter(move |l| self.matches(l))
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageFilter::All => write!(f, "all"),
            LanguageFilter::Only(code) => write!(f, "{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episodes(range: std::ops::RangeInclusive<u32>) -> Vec<TitleEntry> {
        range
            .map(|n| TitleEntry {
                id: format!("{n}v"),
                title: "Show".to_string(),
                episode_number: Some(n),
                available_languages: vec!["en".to_string()],
            })
            .collect()
    }

    fn numbers(entries: &[TitleEntry]) -> Vec<u32> {
        entries.iter().filter_map(|e| e.episode_number).collect()
    }

    #[test]
    fn parse_variants() {
        assert_eq!(EpisodeSelector::parse(None), EpisodeSelector::All);
        assert_eq!(EpisodeSelector::parse(Some("")), EpisodeSelector::All);
        assert_eq!(EpisodeSelector::parse(Some("4")), EpisodeSelector::Single(4));
        assert_eq!(EpisodeSelector::parse(Some("04")), EpisodeSelector::Single(4));
        assert_eq!(
            EpisodeSelector::parse(Some("3-5")),
            EpisodeSelector::Range { start: 3, end: 5 }
        );
        assert_eq!(
            EpisodeSelector::parse(Some(" 3 - 5 ")),
            EpisodeSelector::Range { start: 3, end: 5 }
        );
    }

    #[test]
    fn parse_malformed_is_unmatched() {
        for raw in ["abc", "+4", "-3", "3-", "1-2-3", "3-x", "4.5"] {
            assert_eq!(
                EpisodeSelector::parse(Some(raw)),
                EpisodeSelector::Unmatched(raw.to_string()),
                "input {raw}"
            );
        }
    }

    #[test]
    fn range_selects_inclusive() {
        let kept = EpisodeSelector::parse(Some("3-5")).apply(episodes(1..=10));
        assert_eq!(numbers(&kept), vec![3, 4, 5]);
    }

    #[test]
    fn single_selects_one() {
        let kept = EpisodeSelector::parse(Some("4")).apply(episodes(1..=10));
        assert_eq!(numbers(&kept), vec![4]);
    }

    #[test]
    fn no_selector_keeps_all_in_order() {
        let all = episodes(1..=10);
        let kept = EpisodeSelector::All.apply(all.clone());
        assert_eq!(kept, all);
    }

    #[test]
    fn malformed_and_reversed_select_nothing() {
        assert!(EpisodeSelector::parse(Some("abc")).apply(episodes(1..=10)).is_empty());
        assert!(EpisodeSelector::parse(Some("5-3")).apply(episodes(1..=10)).is_empty());
    }

    #[test]
    fn language_parse() {
        assert_eq!(LanguageFilter::parse("all"), LanguageFilter::All);
        assert_eq!(LanguageFilter::parse("ALL"), LanguageFilter::All);
        assert_eq!(LanguageFilter::parse("EN"), LanguageFilter::Only("en".to_string()));
        assert_eq!(LanguageFilter::parse(""), LanguageFilter::Only(String::new()));
    }

    #[test]
    fn empty_language_is_unavailable() {
        let entry = entry_with(&["en"]);
        assert!(matches!(
            LanguageFilter::parse("").check(&entry),
            Err(VsubError::LanguageUnavailable { requested, .. }) if requested.is_empty()
        ));
    }

    fn entry_with(langs: &[&str]) -> TitleEntry {
        TitleEntry {
            id: "1v".to_string(),
            title: "Show".to_string(),
            episode_number: Some(1),
            available_languages: langs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn unavailable_language_lists_available() {
        let entry = entry_with(&["en", "ko"]);
        match LanguageFilter::parse("de").check(&entry) {
            Err(VsubError::LanguageUnavailable {
                requested,
                available,
            }) => {
                assert_eq!(requested, "de");
                assert_eq!(available, vec!["en", "ko"]);
            }
            other => panic!("expected LanguageUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn select_all_and_one() {
        let entry = entry_with(&["en", "ko"]);
        let all: Vec<&str> = LanguageFilter::All.select(&entry).collect();
        assert_eq!(all, vec!["en", "ko"]);
        let ko = LanguageFilter::parse("KO");
        assert!(ko.check(&entry).is_ok());
        assert_eq!(ko.select(&entry).collect::<Vec<_>>(), vec!["ko"]);
    }
}
