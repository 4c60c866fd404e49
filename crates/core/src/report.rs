//! Reporters: turn a structured [`CheckReport`] into output.
//!
//! The store never formats anything itself; any sink that implements
//! [`Reporter`] can be attached to a monitoring loop.

use std::io::{self, Write};

use crate::model::CheckReport;

/// Receives the result of every check pass.
pub trait Reporter {
    fn report(&mut self, report: &CheckReport) -> io::Result<()>;
}

/// Human-readable alert listing.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, report: &CheckReport) -> io::Result<()> {
        if report.is_intact() {
            writeln!(self.out, "All files intact.")?;
        } else {
            writeln!(self.out, "File Integrity Check Alert:")?;
            for anomaly in &report.anomalies {
                writeln!(self.out, "- {}: {}", anomaly.path, anomaly.classification)?;
            }
        }
        self.out.flush()
    }
}

/// One pretty-printed JSON document per pass.
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, report: &CheckReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Emits one `tracing` event per anomaly (warn) or a single intact event (info).
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, report: &CheckReport) -> io::Result<()> {
        if report.is_intact() {
            tracing::info!(checked = report.files_checked, "all files intact");
        }
        for anomaly in &report.anomalies {
            tracing::warn!(
                path = %anomaly.path,
                classification = anomaly.classification.label(),
                "integrity anomaly"
            );
        }
        Ok(())
    }
}
