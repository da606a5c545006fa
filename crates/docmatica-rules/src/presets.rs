//! Rule sets.

use crate::{BackToTopAnchor, ChapterPlacement, FileType};
use docmatica_core::RuleBox;

/// Returns every built-in rule, in code order.
///
/// Includes:
/// - `file-type` (DM001)
/// - `chapter-placement` (DM002)
/// - `back-to-top-anchor` (DM003)
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FileType::new()),
        Box::new(ChapterPlacement::new()),
        Box::new(BackToTopAnchor::new()),
    ]
}

/// Looks a rule up by name or code.
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    default_rules()
        .into_iter()
        .find(|rule| rule.name() == name || rule.code().eq_ignore_ascii_case(name))
}
