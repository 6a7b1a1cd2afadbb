//! Title metadata: one container lookup, then the paginated episode listing for series.

use crate::api::models::{ContainerInfo, Episode, SubtitleCompletions};
use crate::api::{VikiApi, PAGE_SIZE};
use crate::error::{FetchFailure, Result, Stage, VsubError};
use crate::http::HttpFetch;
use crate::url_model::{ContentKind, ContentRef};

/// One downloadable unit: a movie, or a single episode of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEntry {
    /// Video id used for the subtitle endpoint.
    pub id: String,
    /// Display title of the container (shared by every episode).
    pub title: String,
    /// `None` for movies.
    pub episode_number: Option<u32>,
    /// Languages whose track is complete enough to download.
    pub available_languages: Vec<String>,
}

/// Result of the metadata stage.
#[derive(Debug, Clone)]
pub struct ResolvedTitle {
    /// Canonical id: the container id for series, the watch-now video id for movies.
    pub id: String,
    pub title: String,
    pub kind: ContentKind,
    pub entries: Vec<TitleEntry>,
}

/// Number of listing pages needed for `total_episodes`.
pub fn page_count(total_episodes: u32) -> u32 {
    total_episodes.div_ceil(PAGE_SIZE)
}

fn ready(completions: Option<&SubtitleCompletions>) -> Vec<String> {
    completions
        .map(SubtitleCompletions::ready_languages)
        .unwrap_or_default()
}

/// Fetches container metadata and, for series, every episode page in order.
pub fn fetch_title<F: HttpFetch>(api: &VikiApi<F>, content: &ContentRef) -> Result<ResolvedTitle> {
    let info = api.container_info(&content.id)?;
    let kind = ContentKind::from_api_type(&info.kind);
    if kind != content.kind {
        tracing::debug!(url_kind = %content.kind, api_type = %info.kind, "content kind differs from URL");
    }

    let title = info
        .english_title()
        .map(str::to_string)
        .or_else(|| info.id.clone())
        .unwrap_or_else(|| content.id.clone());

    match kind {
        ContentKind::Movie => resolve_movie(&info, title),
        ContentKind::Series => {
            let id = info.id.clone().unwrap_or_else(|| content.id.clone());
            let entries = fetch_episodes(api, &content.id, &title, info.total_episodes())?;
            Ok(ResolvedTitle {
                id,
                title,
                kind,
                entries,
            })
        }
    }
}

fn resolve_movie(info: &ContainerInfo, title: String) -> Result<ResolvedTitle> {
    let id = info
        .watch_now
        .as_ref()
        .map(|w| w.id.clone())
        .ok_or_else(|| VsubError::fetch(Stage::Title, FetchFailure::MissingField("watch_now.id")))?;
    let entry = TitleEntry {
        id: id.clone(),
        title: title.clone(),
        episode_number: None,
        available_languages: ready(info.subtitle_completions.as_ref()),
    };
    Ok(ResolvedTitle {
        id,
        title,
        kind: ContentKind::Movie,
        entries: vec![entry],
    })
}

/// Requests pages `1..=page_count(total)` and concatenates them in request order.
pub fn fetch_episodes<F: HttpFetch>(
    api: &VikiApi<F>,
    container_id: &str,
    title: &str,
    total_episodes: u32,
) -> Result<Vec<TitleEntry>> {
    let pages = page_count(total_episodes);
    tracing::debug!(container_id, total_episodes, pages, "fetching episode list");

    let mut entries = Vec::new();
    for page in 1..=pages {
        let listing = api.episode_page(container_id, page)?;
        tracing::debug!(page, episodes = listing.response.len(), "episode page");
        entries.extend(listing.response.into_iter().filter_map(|ep| to_entry(ep, title)));
    }
    Ok(entries)
}

fn to_entry(episode: Episode, title: &str) -> Option<TitleEntry> {
    let Some(number) = episode.number else {
        tracing::warn!(video_id = %episode.id, "episode has no number; skipping");
        return None;
    };
    Some(TitleEntry {
        available_languages: ready(episode.subtitle_completions.as_ref()),
        id: episode.id,
        title: title.to_string(),
        episode_number: Some(number),
    })
}
