use anyhow::{Context, Result};
use hashguard_core::Established;

use crate::commands::{display_relative, load_monitor_config};

/// Establish (or re-establish) the baseline for the configured paths.
///
/// A store that cannot be written is reported as a warning: the in-memory
/// baseline is still valid, it just will not survive this process.
pub fn baseline_command(config: &str) -> Result<Established> {
    let loaded = load_monitor_config(config)?;
    let store = loaded.store();

    let established = store
        .establish_baseline(&loaded.config.paths)
        .context("Failed to compute baseline digests")?;

    println!("Baseline established:");
    println!("  Algorithm: {}", store.algorithm());
    println!("  Tracked: {}", established.baseline.len());
    println!("  Store: {}", display_relative(store.location(), &loaded.base_dir));
    if !established.skipped.is_empty() {
        println!("  Not monitored (missing):");
        for path in &established.skipped {
            println!("    - {path}");
        }
    }
    if let Some(err) = &established.persist_error {
        eprintln!("Warning: {err}");
    }

    Ok(established)
}
