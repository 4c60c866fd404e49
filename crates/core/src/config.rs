use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::digest::DigestAlgorithm;
use crate::error::{IntegrityError, IntegrityResult};
use crate::store::{IntegrityStore, DEFAULT_STORE_FILE};

/// Default seconds between check passes.
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_store() -> String {
    DEFAULT_STORE_FILE.to_string()
}

/// Serializable monitor configuration.
///
/// Lives in a user-chosen `.json`, `.yaml`, or `.yml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Files to track. Kept exactly as written; an empty list is legal.
    pub paths: Vec<String>,
    #[serde(default)]
    pub algorithm: DigestAlgorithm,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Baseline store location. Relative paths resolve against the config file's directory.
    #[serde(default = "default_store")]
    pub store: String,
    /// Also report tracked paths that appeared after the baseline was taken.
    #[serde(default)]
    pub report_added: bool,
}

impl MonitorConfig {
    pub fn new(paths: Vec<String>) -> Self {
        Self {
            paths,
            algorithm: DigestAlgorithm::default(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            store: default_store(),
            report_added: false,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Reject values the monitor cannot run with.
    pub fn validate(&self) -> IntegrityResult<()> {
        if self.interval_secs == 0 {
            return Err(IntegrityError::InvalidConfig(
                "interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.store.trim().is_empty() {
            return Err(IntegrityError::InvalidConfig("store must not be empty".to_string()));
        }
        if let Some(idx) = self.paths.iter().position(|p| p.trim().is_empty()) {
            return Err(IntegrityError::InvalidConfig(format!("paths[{idx}] is empty")));
        }
        Ok(())
    }

    /// Resolve the store location against `base_dir` when it is relative.
    pub fn store_path(&self, base_dir: &Path) -> PathBuf {
        let store = Path::new(&self.store);
        if store.is_absolute() {
            store.to_path_buf()
        } else {
            base_dir.join(store)
        }
    }

    /// Build the store this config describes.
    pub fn integrity_store(&self, base_dir: &Path) -> IntegrityStore {
        IntegrityStore::new(self.store_path(base_dir), self.algorithm)
    }

    /// Serialize in the format implied by `path`'s extension.
    pub fn to_string_for(&self, path: &Path) -> IntegrityResult<String> {
        let invalid = |reason: String| IntegrityError::InvalidConfig(reason);
        match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| invalid(e.to_string())),
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| invalid(e.to_string())),
        }
    }
}

/// Config file encodings, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> IntegrityResult<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            _ => Err(IntegrityError::InvalidConfig(format!(
                "Unsupported config extension for {}; use .json, .yaml, or .yml",
                path.display()
            ))),
        }
    }
}

/// Read, parse, and validate a monitor config.
pub fn load_config(path: &Path) -> IntegrityResult<MonitorConfig> {
    let unreadable =
        |reason: String| IntegrityError::ConfigUnreadable { path: path.to_path_buf(), reason };

    let format = ConfigFormat::from_path(path)?;
    let body = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
    let config: MonitorConfig = match format {
        ConfigFormat::Json => serde_json::from_str(&body).map_err(|e| unreadable(e.to_string()))?,
        ConfigFormat::Yaml => serde_yaml::from_str(&body).map_err(|e| unreadable(e.to_string()))?,
    };
    config.validate()?;
    Ok(config)
}

/// Directory relative store paths resolve against for a config at `config_path`.
pub fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
