use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hashguard::commands::{
    baseline_command, check_command, init_command, show_command, watch_command, InitOptions,
};
use hashguard::init_logging;

/// Digest-based file integrity monitor.
///
/// This CLI is a thin wrapper around `hashguard-core` (exposed in code as
/// `hashguard_core`). All substantive logic lives in the library.
#[derive(Parser, Debug)]
#[command(name = "hashguard", version, about = "Digest-based file integrity monitor", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a new monitor config (JSON or YAML, chosen by extension).
    Init {
        /// Config file to write.
        #[arg(long, default_value = "hashguard.json")]
        config: String,

        /// File to track. Repeat for each file.
        #[arg(long = "path")]
        paths: Vec<String>,

        /// Digest algorithm (sha224, sha256, sha384, sha512).
        #[arg(long)]
        algorithm: Option<String>,

        /// Seconds between checks when watching.
        #[arg(long)]
        interval: Option<u64>,

        /// Baseline store location (relative to the config file).
        #[arg(long)]
        store: Option<String>,

        /// Also report tracked files that appear after the baseline was taken.
        #[arg(long, default_value_t = false)]
        report_added: bool,

        /// Overwrite an existing config.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Digest the configured files and replace the persisted baseline.
    Baseline {
        #[arg(long, default_value = "hashguard.json")]
        config: String,
    },

    /// Run one check pass against the persisted baseline.
    Check {
        #[arg(long, default_value = "hashguard.json")]
        config: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Exit with status 1 when any anomaly is found.
        #[arg(long, default_value_t = false)]
        fail_on_anomaly: bool,
    },

    /// Establish a baseline, then check it on the configured interval.
    Watch {
        #[arg(long, default_value = "hashguard.json")]
        config: String,

        /// Stop after this many check passes.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_cycles: Option<u64>,

        /// Reuse the persisted baseline instead of establishing a new one.
        #[arg(long, default_value_t = false)]
        skip_baseline: bool,
    },

    /// Print the persisted baseline.
    Show {
        #[arg(long, default_value = "hashguard.json")]
        config: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Init { config, paths, algorithm, interval, store, report_added, force } => {
            let options = InitOptions {
                paths,
                algorithm,
                interval_secs: interval,
                store,
                report_added,
                force,
            };
            init_command(&config, options)?;
        }
        Command::Baseline { config } => {
            baseline_command(&config)?;
        }
        Command::Check { config, json, fail_on_anomaly } => {
            let report = check_command(&config, json)?;
            if fail_on_anomaly && !report.is_intact() {
                return Ok(ExitCode::from(1));
            }
        }
        Command::Watch { config, max_cycles, skip_baseline } => {
            watch_command(&config, max_cycles, skip_baseline)?;
        }
        Command::Show { config, json } => show_command(&config, json)?,
    }

    Ok(ExitCode::SUCCESS)
}
