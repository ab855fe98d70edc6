use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "attendance-tui";
const API_URL_ENV: &str = "ATTENDANCE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceConfig {
    /// Base URL of the attendance backend, without trailing slash.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upper bound on every backend call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How often the QR display fetches a fresh code.
    #[serde(default = "default_qr_refresh_secs")]
    pub qr_refresh_secs: u64,
    /// Where downloaded attendance workbooks are written.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_api_url() -> String {
    "https://finbackend-r3ex.onrender.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_qr_refresh_secs() -> u64 {
    30
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            qr_refresh_secs: default_qr_refresh_secs(),
            export_dir: default_export_dir(),
        }
    }
}

fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join(APP_DIR))
}

impl AttendanceConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(root_path()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(root_path()?.join("attendance-tui.log"))
    }

    /// Load config from disk, then apply environment overrides. Returns the
    /// default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::from_toml(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }

        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn qr_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.qr_refresh_secs.max(1))
    }
}
