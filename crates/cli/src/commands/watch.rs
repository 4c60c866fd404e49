use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use hashguard_core::monitor::Monitor;
use hashguard_core::report::ConsoleReporter;
use hashguard_core::schedule::{Schedule, ScheduleSummary, ThreadSleeper};

use crate::commands::load_monitor_config;

/// Establish a baseline, then check it every configured interval.
///
/// Runs until the process is terminated unless `max_cycles` is given.
pub fn watch_command(
    config: &str,
    max_cycles: Option<u64>,
    skip_baseline: bool,
) -> Result<ScheduleSummary> {
    let loaded = load_monitor_config(config)?;
    let mut monitor =
        Monitor::from_config(&loaded.config, &loaded.base_dir, ConsoleReporter::stdout());

    if !skip_baseline {
        let established = monitor.establish().context("Failed to compute baseline digests")?;
        if let Some(err) = &established.persist_error {
            eprintln!("Warning: {err}; checking against the in-memory baseline");
        }
    }

    let schedule = Schedule::every(loaded.config.interval()).with_max_cycles(max_cycles);
    let stop = AtomicBool::new(false);
    Ok(monitor.watch(&schedule, &stop, &mut ThreadSleeper))
}
