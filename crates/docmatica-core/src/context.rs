//! Context types for rule execution.

use std::path::Path;

use crate::policy::Policy;
use crate::types::{Entry, Violation};
use crate::utils::paths;

/// Context provided to per-entry rules.
#[derive(Debug, Clone, Copy)]
pub struct EntryContext<'a> {
    /// The entry being checked.
    pub entry: &'a Entry,
    /// Root of the scan.
    pub root: &'a Path,
    /// Policy the run is evaluated against.
    pub policy: &'a Policy,
}

impl<'a> EntryContext<'a> {
    /// Creates a new entry context.
    #[must_use]
    pub fn new(entry: &'a Entry, root: &'a Path, policy: &'a Policy) -> Self {
        Self {
            entry,
            root,
            policy,
        }
    }

    /// Returns true if the entry is a markup document.
    #[must_use]
    pub fn is_markup(&self) -> bool {
        self.policy.is_markup(self.entry)
    }

    /// Returns the entry path rendered relative to the scan root.
    #[must_use]
    pub fn relative_path(&self) -> String {
        paths::relative_display(&self.entry.path, self.root)
    }

    /// Builds a violation for this entry.
    #[must_use]
    pub fn violation(&self, code: &str, rule: &str, message: impl Into<String>) -> Violation {
        Violation::new(code, rule, self.entry.path.clone(), message)
    }
}
