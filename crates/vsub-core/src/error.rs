//! Error taxonomy for a vsub run.
//!
//! Every variant here is fatal for the invocation. Per-download failures on
//! the subtitle endpoint are not errors; they are collected in
//! [`crate::download::DownloadReport`].

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which metadata request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Container info (`containers/{id}.json`).
    Title,
    /// Paginated episode listing (`containers/{id}/episodes.json`).
    VideoList,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Title => write!(f, "title"),
            Stage::VideoList => write!(f, "video list"),
        }
    }
}

/// Underlying cause of a failed metadata request.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),

    #[error("HTTP {0}")]
    Status(u32),

    #[error("JSON decode: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field `{0}`")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum VsubError {
    #[error("invalid URL '{input}': expected a series (/tv/<id>) or movie (/movies/<id>) URL")]
    InvalidUrl { input: String },

    #[error("error during {stage}: {source}")]
    MetadataFetch {
        stage: Stage,
        #[source]
        source: FetchFailure,
    },

    #[error("'{requested}' subtitle is not available; available subtitles: {available:?}")]
    LanguageUnavailable {
        requested: String,
        available: Vec<String>,
    },

    #[error("cannot build endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VsubError {
    pub(crate) fn fetch(stage: Stage, source: impl Into<FetchFailure>) -> Self {
        VsubError::MetadataFetch {
            stage,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VsubError>;
