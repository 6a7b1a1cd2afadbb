//! CLI for the vsub subtitle downloader.

mod download;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vsub_core::config;
use vsub_core::selector::{EpisodeSelector, LanguageFilter};
use vsub_core::url_model::ContentRef;

use download::run_download;

/// Download subtitle tracks of a Viki series or movie as .srt files.
#[derive(Debug, Parser)]
#[command(name = "vsub")]
#[command(about = "Download Viki subtitles for a series or movie", long_about = None)]
pub struct Cli {
    /// Series (/tv/<id>) or movie (/movies/<id>) page URL.
    pub url: String,

    /// Episode number (e.g. 4) or inclusive range (e.g. 1-5). Defaults to every episode.
    #[arg(short, long)]
    pub episode: Option<String>,

    /// Subtitle language code (e.g. en), or "all".
    #[arg(short, long, default_value = "all")]
    pub language: String,

    /// Directory for .srt files. Overrides `output_dir` from the config file.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Everything a run needs, parsed from the command line.
#[derive(Debug)]
pub struct Request {
    pub content: ContentRef,
    pub episodes: EpisodeSelector,
    pub language: LanguageFilter,
}

impl Cli {
    /// Validates the arguments that can be checked without the network.
    pub fn request(&self) -> Result<Request> {
        Ok(Request {
            content: ContentRef::parse(&self.url)?,
            episodes: EpisodeSelector::parse(self.episode.as_deref()),
            language: LanguageFilter::parse(&self.language),
        })
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let request = cli.request()?;

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let output_dir = match cli.output_dir {
            Some(dir) => dir,
            None => cfg.resolve_output_dir(&std::env::current_dir()?),
        };

        run_download(&request, &cfg, &output_dir)?;
        Ok(())
    }
}

/// Process exit status for a finished run: 0 unless a fatal error aborted it.
/// Per-item download failures are part of a successful run.
pub fn exit_status(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
