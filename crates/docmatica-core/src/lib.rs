//! # docmatica-core
//!
//! Core framework for linting a tree of reStructuredText documents.
//!
//! This crate provides the pieces a docmatica run is assembled from:
//!
//! - [`Rule`] trait for per-entry rules
//! - [`Policy`] for the static exclusion policy and naming constants
//! - [`AnchorChecker`] for the page anchor / back-to-top state machine
//! - [`Walker`] for the directory traversal
//! - [`Aggregator`] and [`Reporter`] for collecting concurrent findings
//! - [`Scanner`] for driving a complete run to a [`Verdict`]
//!
//! ## Example
//!
//! ```ignore
//! use docmatica_core::{Config, Scanner};
//!
//! let scanner = Scanner::builder()
//!     .root("./archivematica-docs")
//!     .config(Config::default())
//!     .rules(docmatica_rules::default_rules())
//!     .build()?;
//!
//! let summary = scanner.run(&mut reporter)?;
//! std::process::exit(summary.verdict.exit_code());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregator;
mod anchor;
mod config;
mod context;
mod policy;
mod rule;
mod scanner;
mod types;
mod walker;

/// Utility modules for rule implementations.
pub mod utils;

pub use aggregator::{Aggregator, Reporter, Tally};
pub use anchor::{AnchorChecker, AnchorOutcome, AnchorState};
pub use config::{Config, ConfigError, RuleConfig, ScanConfig};
pub use context::EntryContext;
pub use policy::{Decision, Policy};
pub use rule::{Rule, RuleBox};
pub use scanner::{ScanError, Scanner, ScannerBuilder};
pub use types::{Entry, ScanSummary, Verdict, Violation};
pub use walker::{WalkStats, Walker};
