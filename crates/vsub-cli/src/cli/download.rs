//! The linear pipeline: resolve title, list episodes, filter, download.

use anyhow::Result;
use std::path::Path;
use vsub_core::api::VikiApi;
use vsub_core::config::VsubConfig;
use vsub_core::download::{DownloadReport, SubtitleDownloader};
use vsub_core::http::{CurlFetcher, HttpFetch};
use vsub_core::metadata;
use vsub_core::url_model::ContentKind;

use super::Request;

/// How a run that did not hit a fatal error ended.
#[derive(Debug)]
pub enum Outcome {
    /// The episode selector kept no entries; nothing was requested.
    NothingMatched,
    Finished(DownloadReport),
}

pub fn run_download(request: &Request, cfg: &VsubConfig, output_dir: &Path) -> Result<Outcome> {
    let api = VikiApi::new(CurlFetcher::new(&cfg.api, &cfg.http), &cfg.api);
    run_pipeline(&api, request, output_dir)
}

pub fn run_pipeline<F: HttpFetch>(
    api: &VikiApi<F>,
    request: &Request,
    output_dir: &Path,
) -> Result<Outcome> {
    tracing::info!(
        id = %request.content.id,
        episodes = %request.episodes,
        language = %request.language,
        "resolving title"
    );
    let resolved = metadata::fetch_title(api, &request.content)?;
    println!("ID: {}", resolved.id);
    println!("Title: {}", resolved.title);
    println!("Type: {}", resolved.kind);

    // A movie has a single entry without an episode number; the selector does not apply.
    let entries = match resolved.kind {
        ContentKind::Series => request.episodes.apply(resolved.entries),
        ContentKind::Movie => resolved.entries,
    };
    if entries.is_empty() {
        println!("No episodes matched '{}'.", request.episodes);
        return Ok(Outcome::NothingMatched);
    }

    let downloader = SubtitleDownloader::new(api, output_dir);
    let report = downloader.run(&entries, &request.language, |outcome| match outcome {
        Ok(path) => println!("Downloaded: {}", path.display()),
        Err(failed) => eprintln!(
            "Failed to download subtitle for video ID {}, language {} ({})",
            failed.video_id, failed.language, failed.reason
        ),
    })?;

    println!(
        "{} subtitle(s) written to {}, {} failed",
        report.written.len(),
        downloader.output_dir().display(),
        report.failed.len()
    );
    Ok(Outcome::Finished(report))
}
