//! Configuration and defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::reconcile::DuplicatePolicy;

/// Paginated beatmap catalog endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://synthriderz.com/api/beatmaps";

/// Host prepended to each entry's relative `download_url`
pub const DEFAULT_DOWNLOAD_HOST: &str = "https://synthriderz.com";

/// Custom songs folder on the headset
pub const DEFAULT_DEVICE_FOLDER: &str = "/sdcard/SynthRidersUC/CustomSongs/";

/// Local adb server address
pub const DEFAULT_ADB_SERVER_ADDR: &str = "127.0.0.1:5037";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Configuration for synth-sync
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Catalog endpoint queried with `?page=<n>`
    pub api_endpoint: String,
    /// Host that relative download URLs are resolved against
    pub download_host: String,
    /// Target folder on the device
    pub device_folder: String,
    /// Per-request timeout for catalog pages
    pub request_timeout_secs: u64,
    /// Upper bound on catalog pages fetched at once
    pub max_concurrent_requests: usize,
    /// How repeated catalog names are reported as missing
    pub duplicate_policy: DuplicatePolicy,
    /// adb executable, resolved through `PATH` when not absolute
    pub adb_path: PathBuf,
    /// Address probed to decide whether the adb server is up
    pub adb_server_addr: String,
    /// Where downloads are written before being pushed (system temp dir if unset)
    pub staging_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            download_host: DEFAULT_DOWNLOAD_HOST.to_string(),
            device_folder: DEFAULT_DEVICE_FOLDER.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            duplicate_policy: DuplicatePolicy::default(),
            adb_path: PathBuf::from("adb"),
            adb_server_addr: DEFAULT_ADB_SERVER_ADDR.to_string(),
            staging_dir: None,
        }
    }
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("synth-sync").join("config.json"))
    }

    /// Load config from disk, falling back to defaults if missing or unreadable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        Self::from_json(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config at {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Parse a config document; absent fields take their defaults
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Save config to disk
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
            std::fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.api_endpoint.trim().is_empty() {
            return Err(Error::Config("api_endpoint must not be empty".to_string()));
        }
        if self.device_folder.trim().is_empty() {
            return Err(Error::Config("device_folder must not be empty".to_string()));
        }
        if self.max_concurrent_requests == 0 {
            return Err(Error::Config(
                "max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Staging directory for downloads
    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
