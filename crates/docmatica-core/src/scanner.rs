//! Scan driver: walker, rule workers and aggregator wired together.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::aggregator::{Aggregator, Reporter};
use crate::config::Config;
use crate::context::EntryContext;
use crate::policy::Policy;
use crate::rule::{Rule, RuleBox};
use crate::types::{Entry, ScanSummary, Verdict, Violation};
use crate::utils::paths;
use crate::walker::Walker;

/// Worker count used when the host parallelism cannot be queried.
const FALLBACK_PARALLELISM: usize = 4;

/// Errors that abort a scan.
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    /// The current working directory could not be determined.
    #[error("Unable to get current working directory: {0}")]
    #[diagnostic(code(docmatica::cwd))]
    CurrentDir(#[source] std::io::Error),

    /// The scan root could not be resolved.
    #[error("Unable to resolve scan root {path}: {source}")]
    #[diagnostic(
        code(docmatica::root),
        help("pass an existing directory with --path, or run from inside the docs checkout")
    )]
    Root {
        /// Path that failed to resolve.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The scan root is not a directory.
    #[error("Scan root {path} is not a directory")]
    #[diagnostic(code(docmatica::root))]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// The report could not be written.
    #[error("Failed to write report: {0}")]
    #[diagnostic(code(docmatica::report))]
    Report(#[source] std::io::Error),
}

/// Builder for configuring a [`Scanner`].
#[derive(Default)]
pub struct ScannerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    config: Option<Config>,
    parallelism: Option<usize>,
}

impl ScannerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to scan.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the scanner.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed rules to the scanner.
    #[must_use]
    pub fn rules<I: IntoIterator<Item = RuleBox>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the number of rule workers, overriding the configuration.
    #[must_use]
    pub fn parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }

    /// Builds the scanner.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be resolved or is not a
    /// directory.
    pub fn build(self) -> Result<Scanner, ScanError> {
        let config = self.config.unwrap_or_default();

        let root = match self.root.or_else(|| config.scan.root.clone()) {
            Some(root) if root.is_absolute() => paths::normalize(&root),
            Some(root) => paths::absolutize(&root, &working_dir()?),
            None => working_dir()?,
        };

        // Symlinks stay unresolved; the walk starts from the path as given.
        match std::fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(ScanError::NotADirectory { path: root }),
            Err(source) => return Err(ScanError::Root { path: root, source }),
        }

        let rules = self
            .rules
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        let parallelism = self
            .parallelism
            .or(config.scan.parallelism)
            .unwrap_or_else(|| {
                thread::available_parallelism().map_or(FALLBACK_PARALLELISM, NonZeroUsize::get)
            })
            .max(1);

        Ok(Scanner {
            root,
            rules,
            policy: config.policy,
            parallelism,
        })
    }
}

/// Returns the working directory as the user reached it.
///
/// `$PWD` is preferred when it names the same directory as the process
/// working directory, which keeps symlinked names intact.
fn working_dir() -> Result<PathBuf, ScanError> {
    let physical = std::env::current_dir().map_err(ScanError::CurrentDir)?;
    let logical = std::env::var_os("PWD")
        .map(PathBuf::from)
        .filter(|pwd| pwd.is_absolute())
        .filter(|pwd| same_dir(pwd, &physical));
    Ok(logical.map_or(physical, |pwd| paths::normalize(&pwd)))
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Runs one complete scan of a docs tree.
///
/// Use [`Scanner::builder()`] to construct an instance.
pub struct Scanner {
    root: PathBuf,
    rules: Vec<RuleBox>,
    policy: Policy,
    parallelism: usize,
}

impl Scanner {
    /// Creates a new builder for configuring a scanner.
    #[must_use]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// Returns the resolved scan root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the number of rule workers.
    #[must_use]
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Scans the tree, streaming violations to `reporter` as they arrive.
    ///
    /// The walker feeds entries to a pool of rule workers; their violations
    /// flow to a single aggregator thread. The verdict is taken only after
    /// every worker has exited and the aggregator has drained its intake.
    ///
    /// # Errors
    ///
    /// Returns an error only if the reporter fails to write.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<ScanSummary, ScanError> {
        info!(
            "Scanning {} with {} rules on {} workers",
            self.root.display(),
            self.rules.len(),
            self.parallelism
        );

        let (entry_tx, entry_rx) = unbounded::<Entry>();
        let (violation_tx, violation_rx) = unbounded::<Violation>();

        let (stats, tally) = thread::scope(|scope| {
            let aggregator = {
                let root = self.root.as_path();
                let reporter = &mut *reporter;
                let intake = violation_rx;
                scope.spawn(move || Aggregator::new(root, reporter).drain(&intake))
            };

            let workers: Vec<_> = (0..self.parallelism)
                .map(|id| {
                    let entries = entry_rx.clone();
                    let violations = violation_tx.clone();
                    scope.spawn(move || self.evaluate(id, &entries, &violations))
                })
                .collect();
            drop(entry_rx);

            let stats = Walker::new(&self.root, &self.policy).walk(|entry| {
                if let Err(err) = entry_tx.send(entry) {
                    warn!("No rule worker left for {}", err.into_inner().path.display());
                }
            });
            drop(entry_tx);

            for worker in workers {
                if let Err(payload) = worker.join() {
                    std::panic::resume_unwind(payload);
                }
            }
            drop(violation_tx);

            match aggregator.join() {
                Ok(tally) => (stats, tally),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        });

        let summary = ScanSummary {
            entries_checked: stats.dispatched,
            entries_skipped: stats.skipped,
            walk_errors: stats.errors,
            violations: tally.violations,
            verdict: Verdict::from_count(tally.violations),
        };

        if let Some(err) = tally.report_error {
            return Err(ScanError::Report(err));
        }
        reporter.finish(&summary).map_err(ScanError::Report)?;

        info!(
            "Scan complete: {} violations in {} entries",
            summary.violations, summary.entries_checked
        );

        Ok(summary)
    }

    /// Worker loop: evaluates every rule against each received entry.
    fn evaluate(&self, id: usize, entries: &Receiver<Entry>, violations: &Sender<Violation>) {
        for entry in entries {
            debug!("worker {}: checking {}", id, entry.path.display());
            let ctx = EntryContext::new(&entry, &self.root, &self.policy);
            for rule in &self.rules {
                for violation in rule.check(&ctx) {
                    if violations.send(violation).is_err() {
                        warn!("Aggregator gone, dropping violation for {}", entry.path.display());
                    }
                }
            }
        }
    }
}
