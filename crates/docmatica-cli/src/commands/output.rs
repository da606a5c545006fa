//! Streaming reporters for lint results.

use docmatica_core::{Reporter, ScanSummary, Violation};
use serde::Serialize;
use std::io::{self, Write};

use crate::OutputFormat;

/// Builds the reporter for `format`, writing to `out`.
pub fn reporter<W: Write + Send + 'static>(format: OutputFormat, out: W) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Text => Box::new(LineReporter::new(out, Style::Text)),
        OutputFormat::Compact => Box::new(LineReporter::new(out, Style::Compact)),
        OutputFormat::Json => Box::new(JsonReporter { out }),
    }
}

#[derive(Clone, Copy)]
enum Style {
    Text,
    Compact,
}

/// Writes one human-readable line per violation.
struct LineReporter<W> {
    out: W,
    style: Style,
}

impl<W> LineReporter<W> {
    fn new(out: W, style: Style) -> Self {
        Self { out, style }
    }
}

impl<W: Write + Send> Reporter for LineReporter<W> {
    fn violation(&mut self, display_path: &str, violation: &Violation) -> io::Result<()> {
        match self.style {
            Style::Text => writeln!(self.out, "{display_path}: {}", violation.message),
            Style::Compact => writeln!(
                self.out,
                "{display_path}: [{}] {}",
                violation.code, violation.message
            ),
        }
    }

    fn finish(&mut self, summary: &ScanSummary) -> io::Result<()> {
        log_summary(summary);
        self.out.flush()
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    path: &'a str,
    code: &'a str,
    rule: &'a str,
    message: &'a str,
}

/// Writes one JSON object per line per violation.
struct JsonReporter<W> {
    out: W,
}

impl<W: Write + Send> Reporter for JsonReporter<W> {
    fn violation(&mut self, display_path: &str, violation: &Violation) -> io::Result<()> {
        let line = JsonLine {
            path: display_path,
            code: &violation.code,
            rule: &violation.rule,
            message: &violation.message,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)
    }

    fn finish(&mut self, summary: &ScanSummary) -> io::Result<()> {
        log_summary(summary);
        self.out.flush()
    }
}

fn log_summary(summary: &ScanSummary) {
    tracing::info!(
        "Found {} violation(s) in {} entries ({} skipped, {} unreadable)",
        summary.violations,
        summary.entries_checked,
        summary.entries_skipped,
        summary.walk_errors
    );
}
