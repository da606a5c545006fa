//! Rule trait for defining lint rules.

use crate::context::EntryContext;
use crate::types::Violation;

/// A per-entry lint rule.
///
/// Rules are evaluated concurrently, one entry at a time, and must not keep
/// state between calls to [`Rule::check`].
///
/// # Example
///
/// ```ignore
/// use docmatica_core::{EntryContext, Rule, Violation};
///
/// pub struct NoEmptyNames;
///
/// impl Rule for NoEmptyNames {
///     fn name(&self) -> &'static str { "no-empty-names" }
///     fn code(&self) -> &'static str { "DM100" }
///
///     fn check(&self, ctx: &EntryContext) -> Vec<Violation> {
///         if ctx.entry.name.is_empty() {
///             vec![ctx.violation(self.code(), self.name(), "Entry has no name.")]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "file-type").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DM001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single entry and returns any violations found.
    fn check(&self, ctx: &EntryContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
