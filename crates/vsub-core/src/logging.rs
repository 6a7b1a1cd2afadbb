//! Logging init: append-only file under the XDG state dir, or stderr.
//!
//! User-facing progress goes to stdout from the CLI; this log carries the
//! request-level detail (URLs, page numbers, per-item failures).

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info,vsub=debug,vsub_core=debug";

/// `~/.local/state/vsub/vsub.log`
pub fn default_log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vsub")?;
    Ok(xdg_dirs.get_state_home().join("vsub").join("vsub.log"))
}

/// Resolves the filter directive from an optional `RUST_LOG` value.
fn filter_for(env: Option<&str>) -> EnvFilter {
    env.and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Opens `path` for appending, creating parent directories as needed.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))
}

/// Installs the global subscriber writing to `path`.
/// Returns Err before installing anything if the file cannot be opened,
/// so the caller can still fall back to [`init_logging_stderr`].
pub fn init_logging(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_for(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("vsub logging initialized at {}", path.display());
    Ok(())
}

/// Installs the global subscriber writing to stderr.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
