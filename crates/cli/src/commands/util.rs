use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hashguard_core::config::{config_base_dir, load_config, MonitorConfig};
use hashguard_core::IntegrityStore;

use crate::canonicalize_or_current;

/// A loaded config plus the directory its relative store path resolves against.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub base_dir: PathBuf,
    pub config: MonitorConfig,
}

impl LoadedConfig {
    pub fn store(&self) -> IntegrityStore {
        self.config.integrity_store(&self.base_dir)
    }
}

/// Load and validate the monitor config at `config`.
pub fn load_monitor_config(config: &str) -> Result<LoadedConfig> {
    let path = canonicalize_or_current(config)?;
    let loaded = load_config(&path)
        .with_context(|| format!("Failed to load config at {}", path.display()))?;
    let base_dir = config_base_dir(&path);
    tracing::debug!(
        config = %path.display(),
        tracked = loaded.paths.len(),
        algorithm = %loaded.algorithm,
        "config loaded"
    );
    Ok(LoadedConfig { path, base_dir, config: loaded })
}

/// Render a path for display relative to `base` when it lives underneath it.
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).display().to_string()
}
