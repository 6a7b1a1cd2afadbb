//! Subtitle download and persistence.
//!
//! Strictly sequential: one request in flight, entries in order, languages in
//! the entry's order. A failed (entry, language) pair is recorded and skipped;
//! only an unavailable requested language or a local write error aborts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{SubtitleFetch, VikiApi};
use crate::error::{Result, VsubError};
use crate::http::HttpFetch;
use crate::metadata::TitleEntry;
use crate::selector::LanguageFilter;
use crate::url_model::subtitle_filename;

/// A subtitle that could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDownload {
    pub video_id: String,
    pub language: String,
    pub reason: String,
}

/// Outcome of a batch, in attempt order.
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<FailedDownload>,
}

impl DownloadReport {
    pub fn attempts(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// `<output_dir>/<base>.<language>.srt`
pub fn subtitle_path(output_dir: &Path, entry: &TitleEntry, language: &str) -> PathBuf {
    output_dir.join(subtitle_filename(entry, language))
}

pub struct SubtitleDownloader<'a, F> {
    api: &'a VikiApi<F>,
    output_dir: PathBuf,
}

impl<'a, F: HttpFetch> SubtitleDownloader<'a, F> {
    pub fn new(api: &'a VikiApi<F>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Downloads every matching language of every entry.
    ///
    /// `on_result` is called after each attempt so callers can report progress
    /// while the batch is still running.
    pub fn run<C>(
        &self,
        entries: &[TitleEntry],
        language: &LanguageFilter,
        mut on_result: C,
    ) -> Result<DownloadReport>
    where
        C: FnMut(std::result::Result<&Path, &FailedDownload>),
    {
        let mut report = DownloadReport::default();
        for entry in entries {
            language.check(entry)?;
            for lang in language.select(entry) {
                match self.download_one(entry, lang)? {
                    Ok(path) => {
                        on_result(Ok(path.as_path()));
                        report.written.push(path);
                    }
                    Err(failure) => {
                        on_result(Err(&failure));
                        report.failed.push(failure);
                    }
                }
            }
        }
        Ok(report)
    }

    /// Outer `Result` is fatal (endpoint or filesystem); inner is the per-item outcome.
    fn download_one(
        &self,
        entry: &TitleEntry,
        language: &str,
    ) -> Result<std::result::Result<PathBuf, FailedDownload>> {
        match self.api.subtitle(&entry.id, language)? {
            SubtitleFetch::Body(body) => {
                fs::create_dir_all(&self.output_dir).map_err(|source| VsubError::Io {
                    path: self.output_dir.clone(),
                    source,
                })?;
                let path = subtitle_path(&self.output_dir, entry, language);
                fs::write(&path, &body).map_err(|source| VsubError::Io {
                    path: path.clone(),
                    source,
                })?;
                tracing::info!(video_id = %entry.id, language, path = %path.display(), bytes = body.len(), "subtitle written");
                Ok(Ok(path))
            }
            SubtitleFetch::Failed(reason) => {
                tracing::warn!(video_id = %entry.id, language, %reason, "subtitle download failed");
                Ok(Err(FailedDownload {
                    video_id: entry.id.clone(),
                    language: language.to_string(),
                    reason,
                }))
            }
        }
    }
}
