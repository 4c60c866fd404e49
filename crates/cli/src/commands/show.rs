use anyhow::{Context, Result};

use crate::commands::{display_relative, load_monitor_config};

/// Print the persisted baseline.
pub fn show_command(config: &str, json: bool) -> Result<()> {
    let loaded = load_monitor_config(config)?;
    let store = loaded.store();
    let baseline = store.load_baseline().context("Failed to load baseline")?;

    if json {
        let serialized = serde_json::to_string_pretty(&baseline)?;
        println!("{}", serialized);
        return Ok(());
    }

    let algorithm = baseline.algorithm.map(|a| a.to_string());
    println!("Baseline: {}", display_relative(store.location(), &loaded.base_dir));
    println!("  Algorithm: {}", algorithm.as_deref().unwrap_or("(untagged)"));
    println!("  Created: {}", baseline.created_at.as_deref().unwrap_or("(unknown)"));
    println!("Files ({}):", baseline.len());
    if baseline.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for (path, digest) in baseline.iter() {
        println!("  - {path}  {digest}");
    }

    Ok(())
}
