//! Viki API client: endpoint construction and response decoding.

pub mod models;

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{FetchFailure, Result, Stage, VsubError};
use crate::http::HttpFetch;
use models::{ContainerInfo, EpisodePage};

/// Fixed page size for the episode listing.
pub const PAGE_SIZE: u32 = 50;

/// Outcome of a subtitle request that got past URL construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleFetch {
    /// 2xx: raw SubRip bytes.
    Body(Vec<u8>),
    /// Non-2xx status or transport failure, with a short reason.
    Failed(String),
}

pub struct VikiApi<F> {
    fetcher: F,
    base_url: String,
    app_id: String,
}

impl<F: HttpFetch> VikiApi<F> {
    pub fn new(fetcher: F, config: &ApiConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path);
        let params = params
            .iter()
            .copied()
            .chain(std::iter::once(("app", self.app_id.as_str())));
        Ok(Url::parse_with_params(&raw, params)?)
    }

    fn get_json<T: DeserializeOwned>(&self, stage: Stage, url: &Url) -> Result<T> {
        let response = self
            .fetcher
            .get(url)
            .map_err(|e| VsubError::fetch(stage, e))?;
        if !response.is_success() {
            return Err(VsubError::fetch(
                stage,
                FetchFailure::Status(response.status),
            ));
        }
        serde_json::from_slice(&response.body).map_err(|e| VsubError::fetch(stage, e))
    }

    /// Container metadata (`containers/{id}.json`).
    pub fn container_info(&self, container_id: &str) -> Result<ContainerInfo> {
        let url = self.endpoint(&format!("containers/{container_id}.json"), &[])?;
        self.get_json(Stage::Title, &url)
    }

    /// One page of the ascending episode listing. Pages start at 1.
    pub fn episode_page(&self, container_id: &str, page: u32) -> Result<EpisodePage> {
        let page = page.to_string();
        let per_page = PAGE_SIZE.to_string();
        let url = self.endpoint(
            &format!("containers/{container_id}/episodes.json"),
            &[
                ("direction", "asc"),
                ("with_upcoming", "true"),
                ("sort", "number"),
                ("blocked", "true"),
                ("only_ids", "false"),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ],
        )?;
        self.get_json(Stage::VideoList, &url)
    }

    /// Subtitle body for one video and language. Only URL construction can fail here;
    /// HTTP and transport failures are reported in [`SubtitleFetch::Failed`].
    pub fn subtitle(&self, video_id: &str, language: &str) -> Result<SubtitleFetch> {
        let url = self.endpoint(
            &format!("videos/{video_id}/auth_subtitles/{language}.srt"),
            &[],
        )?;
        Ok(match self.fetcher.get(&url) {
            Ok(response) if response.is_success() => SubtitleFetch::Body(response.body),
            Ok(response) => SubtitleFetch::Failed(format!("HTTP {}", response.status)),
            Err(e) => SubtitleFetch::Failed(e.to_string()),
        })
    }
}
