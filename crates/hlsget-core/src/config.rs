use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Browser-like User-Agent sent with every segment request unless the config
/// file overrides it.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/64.0.3282.167 Safari/537.36";

/// Global configuration loaded from `~/.config/hlsget/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HlsgetConfig {
    /// Number of concurrent download workers. A `--workers` flag overrides this.
    pub workers: usize,
    /// User-Agent header sent with every segment request.
    pub user_agent: String,
}

impl Default for HlsgetConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hlsget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HlsgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HlsgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HlsgetConfig = toml::from_str(&data)?;
    Ok(cfg)
}
