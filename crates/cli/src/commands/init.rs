use std::fs;

use anyhow::{anyhow, Context, Result};
use hashguard_core::config::MonitorConfig;
use hashguard_core::DigestAlgorithm;

use crate::canonicalize_or_current;

/// Options for writing a new monitor config.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub paths: Vec<String>,
    pub algorithm: Option<String>,
    pub interval_secs: Option<u64>,
    pub store: Option<String>,
    pub report_added: bool,
    pub force: bool,
}

/// Write a monitor config file (JSON or YAML, by extension).
pub fn init_command(config: &str, options: InitOptions) -> Result<()> {
    let config_path = canonicalize_or_current(config)?;

    if config_path.exists() && !options.force {
        return Err(anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }

    let mut monitor_config = MonitorConfig::new(options.paths);
    if let Some(alg) = options.algorithm {
        monitor_config.algorithm = alg.parse::<DigestAlgorithm>()?;
    }
    if let Some(interval) = options.interval_secs {
        monitor_config.interval_secs = interval;
    }
    if let Some(store) = options.store {
        monitor_config.store = store;
    }
    monitor_config.report_added = options.report_added;
    monitor_config.validate()?;

    let body = monitor_config.to_string_for(&config_path)?;
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
    }
    fs::write(&config_path, body)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    println!("Wrote hashguard config:");
    println!("  Config: {}", config_path.display());
    println!("  Paths: {}", monitor_config.paths.len());
    println!("  Algorithm: {}", monitor_config.algorithm);
    println!("  Interval: {}s", monitor_config.interval_secs);
    println!("  Store: {}", monitor_config.store);

    Ok(())
}
