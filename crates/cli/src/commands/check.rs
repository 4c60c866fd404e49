use anyhow::{Context, Result};
use hashguard_core::report::{ConsoleReporter, JsonReporter, Reporter};
use hashguard_core::CheckReport;

use crate::commands::load_monitor_config;

/// Run a single check pass against the persisted baseline and print it.
pub fn check_command(config: &str, json: bool) -> Result<CheckReport> {
    let loaded = load_monitor_config(config)?;
    let store = loaded.store();

    let baseline = store.load_baseline().context("Failed to load baseline")?;
    let report = if loaded.config.report_added {
        store.scan(&baseline, &loaded.config.paths)
    } else {
        store.check(&baseline)
    }
    .context("Integrity check failed")?;

    if json {
        JsonReporter::new(std::io::stdout()).report(&report)?;
    } else {
        ConsoleReporter::stdout().report(&report)?;
    }

    Ok(report)
}
