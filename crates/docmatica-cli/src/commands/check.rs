//! Default command: scan a docs tree and report violations.

use anyhow::{Context, Result};
use docmatica_core::{RuleBox, ScanError, Scanner};
use docmatica_rules::{default_rules, rule_by_name};
use std::path::Path;
use std::process::ExitCode;

use crate::{config_resolver, OutputFormat, FATAL_EXIT};

/// Arguments of a scan run.
pub struct CheckArgs<'a> {
    /// Directory to lint; the current directory when absent.
    pub path: Option<&'a Path>,
    /// Explicit configuration file.
    pub config: Option<&'a Path>,
    /// Report format.
    pub format: OutputFormat,
    /// Comma-separated rule filter.
    pub rules: Option<&'a str>,
    /// Worker count override.
    pub jobs: Option<usize>,
}

/// Runs a scan and maps its verdict to the process exit code.
pub fn run(args: &CheckArgs<'_>) -> Result<ExitCode> {
    let docs_dir = match args.path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().context("Unable to get current working directory")?,
    };
    let config = config_resolver::resolve(&docs_dir, args.config).load()?;

    let mut builder = Scanner::builder().config(config);
    if let Some(path) = args.path {
        builder = builder.root(path);
    }
    if let Some(jobs) = args.jobs {
        builder = builder.parallelism(jobs);
    }

    let rules = match args.rules {
        Some(filter) => filter_rules(filter),
        None => default_rules(),
    };
    builder = builder.rules(rules);

    let scanner = match builder.build() {
        Ok(scanner) => scanner,
        Err(err) => return Ok(fatal(err)),
    };

    tracing::info!(
        "Linting {} with {} rules",
        scanner.root().display(),
        scanner.rule_count()
    );

    let mut reporter = super::output::reporter(args.format, std::io::stdout());
    match scanner.run(reporter.as_mut()) {
        Ok(summary) => Ok(if summary.verdict.is_failed() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }),
        Err(err) => Ok(fatal(err)),
    }
}

/// Prints a fatal scan error and returns the fatal exit code.
fn fatal(err: ScanError) -> ExitCode {
    eprintln!("{:?}", miette::Report::new(err));
    ExitCode::from(FATAL_EXIT)
}

fn filter_rules(filter: &str) -> Vec<RuleBox> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let rule = rule_by_name(name);
            if rule.is_none() {
                tracing::warn!("Unknown rule: {}", name);
            }
            rule
        })
        .collect()
}
