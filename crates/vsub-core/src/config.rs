use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Platform API identity: base URL, app id and the fixed header set sent on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, without trailing slash (e.g. `https://api.viki.io/v4`).
    pub base_url: String,
    /// Value of the `app` query parameter.
    pub app_id: String,
    pub referer: String,
    /// Sent as `X-Viki-App-Ver`.
    pub app_version: String,
    /// Sent as `X-Viki-Device-ID`.
    pub device_id: String,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.viki.io/v4".to_string(),
            app_id: "100000a".to_string(),
            referer: "https://www.viki.com/".to_string(),
            app_version: "2.151.1".to_string(),
            device_id: "239083520d".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl ApiConfig {
    /// Header lines in `Name: value` form, in the order they are sent.
    pub fn header_lines(&self) -> Vec<String> {
        vec![
            format!("Referer: {}", self.referer.trim()),
            format!("X-Viki-App-Ver: {}", self.app_version.trim()),
            format!("X-Viki-Device-ID: {}", self.device_id.trim()),
            format!("User-Agent: {}", self.user_agent.trim()),
        ]
    }
}

/// Transport timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, body included.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// Global configuration loaded from `~/.config/vsub/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VsubConfig {
    /// Where subtitle files are written. Relative paths resolve against the working directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for VsubConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            api: ApiConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl VsubConfig {
    /// Output directory resolved against `cwd` when relative.
    pub fn resolve_output_dir(&self, cwd: &Path) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            cwd.join(&self.output_dir)
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vsub")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VsubConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<VsubConfig> {
    match fs::read_to_string(path) {
        Ok(data) => {
            VsubConfig::from_toml(&data).with_context(|| format!("invalid config {}", path.display()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let cfg = VsubConfig::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, toml::to_string_pretty(&cfg)?)?;
            tracing::info!("created default config at {}", path.display());
            Ok(cfg)
        }
        Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
    }
}

impl VsubConfig {
    /// Parses and validates a config document.
    pub fn from_toml(data: &str) -> Result<Self> {
        let cfg: VsubConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects values that would only fail later, mid-run: a base URL that
    /// cannot carry the endpoint paths, an empty app id, or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.api.base_url)
            .with_context(|| format!("api.base_url '{}' is not a URL", self.api.base_url))?;
        ensure!(
            matches!(base.scheme(), "http" | "https"),
            "api.base_url must be http or https, got '{}'",
            base.scheme()
        );
        ensure!(base.query().is_none(), "api.base_url must not carry a query string");
        ensure!(!self.api.app_id.trim().is_empty(), "api.app_id is empty");
        ensure!(self.http.connect_timeout_secs > 0, "http.connect_timeout_secs must be > 0");
        ensure!(self.http.timeout_secs > 0, "http.timeout_secs must be > 0");
        Ok(())
    }
}
