//! Core types for scan entries, violations and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::paths;

/// One file-system node visited during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path to the node.
    pub path: PathBuf,
    /// Base name of the node.
    pub name: String,
    /// Whether the node is a directory.
    pub is_dir: bool,
    /// Depth below the scan root (the root itself is 0).
    pub depth: usize,
}

impl Entry {
    /// Creates a new entry, deriving the base name from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, is_dir: bool, depth: usize) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            is_dir,
            depth,
        }
    }

    /// Creates an entry from a `walkdir` directory entry.
    #[must_use]
    pub fn from_dir_entry(dent: &walkdir::DirEntry) -> Self {
        let mut entry = Self::new(dent.path(), dent.file_type().is_dir(), dent.depth());
        if entry.name.is_empty() {
            entry.name = dent.file_name().to_string_lossy().into_owned();
        }
        entry
    }

    /// Returns the extension without its leading dot.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    /// Returns the base name without its extension.
    #[must_use]
    pub fn stem(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }

    /// Returns the name of the directory directly containing this entry.
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        paths::parent_name(&self.path)
    }
}

/// A rule violation found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "DM001").
    pub code: String,
    /// Rule name (e.g., "file-type").
    pub rule: String,
    /// Absolute path of the offending entry.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No violation was reported.
    Clean,
    /// At least one violation was reported.
    Failed,
}

impl Verdict {
    /// Derives the verdict from the number of violations seen.
    #[must_use]
    pub fn from_count(violations: usize) -> Self {
        if violations == 0 {
            Self::Clean
        } else {
            Self::Failed
        }
    }

    /// Returns true if the run found violations.
    #[must_use]
    pub fn is_failed(self) -> bool {
        self == Self::Failed
    }

    /// Process exit code for this verdict.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Clean => 0,
            Self::Failed => 1,
        }
    }
}

/// Counters and verdict of a finished scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Entries handed to rule evaluation.
    pub entries_checked: usize,
    /// Entries skipped by the exclusion policy.
    pub entries_skipped: usize,
    /// Traversal errors that were logged and skipped.
    pub walk_errors: usize,
    /// Violations reported.
    pub violations: usize,
    /// Final verdict.
    pub verdict: Verdict,
}
