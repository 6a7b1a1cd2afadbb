//! Response shapes for the container and episode-listing endpoints.
//!
//! Only the fields the downloader needs are modeled; everything else in the
//! payload is ignored.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Completion threshold (percent). A track must be strictly above this to be downloadable.
pub const COMPLETION_THRESHOLD: f64 = 90.0;

/// `subtitle_completions`: language code -> completion percentage.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SubtitleCompletions(pub BTreeMap<String, Option<f64>>);

impl SubtitleCompletions {
    /// Languages whose completion is strictly above [`COMPLETION_THRESHOLD`], sorted by code.
    pub fn ready_languages(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, pct)| matches!(pct, Some(p) if *p > COMPLETION_THRESHOLD))
            .map(|(lang, _)| lang.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Titles {
    #[serde(default)]
    pub en: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchNow {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeCount {
    #[serde(default)]
    pub count: Option<u32>,
}

/// `GET containers/{id}.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerInfo {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub titles: Option<Titles>,
    #[serde(default)]
    pub watch_now: Option<WatchNow>,
    #[serde(default)]
    pub episodes: Option<EpisodeCount>,
    #[serde(default)]
    pub planned_episodes: Option<u32>,
    #[serde(default)]
    pub subtitle_completions: Option<SubtitleCompletions>,
}

impl ContainerInfo {
    pub fn english_title(&self) -> Option<&str> {
        self.titles.as_ref().and_then(|t| t.en.as_deref())
    }

    /// Aired episode count, or the planned count when the aired count is zero.
    pub fn total_episodes(&self) -> u32 {
        match self.episodes.as_ref().and_then(|e| e.count) {
            Some(0) | None => self.planned_episodes.unwrap_or(0),
            Some(n) => n,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: String,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub subtitle_completions: Option<SubtitleCompletions>,
}

/// `GET containers/{id}/episodes.json?page=N`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EpisodePage {
    #[serde(default)]
    pub response: Vec<Episode>,
}
