//! Rule keeping pages inside chapter directories.
//!
//! A manual root (and the docs root) may only hold its landing pages:
//!
//! - `index.rst` in the docs root or any manual root
//! - `contents.rst` in the docs root
//!
//! Every other page must live one level deeper, in a chapter directory.
//! Directories listed in `extra_chapter_roots` get no landing page at all.
//! Pages outside the chapter roots are not checked.

use docmatica_core::{EntryContext, Rule, Violation};

/// Rule code for chapter-placement.
pub const CODE: &str = "DM002";

/// Rule name for chapter-placement.
pub const NAME: &str = "chapter-placement";

const MESSAGE: &str = "Not found in chapter directory.";

const INDEX_STEM: &str = "index";
const CONTENTS_STEM: &str = "contents";

/// Requires pages to be nested within chapter directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChapterPlacement;

impl ChapterPlacement {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ChapterPlacement {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Pages must be nested in chapter directories, except index/contents pages"
    }

    fn check(&self, ctx: &EntryContext<'_>) -> Vec<Violation> {
        if !ctx.is_markup() {
            return vec![];
        }

        let policy = ctx.policy;
        let Some(parent) = ctx.entry.parent_name() else {
            return vec![];
        };
        if !policy.is_chapter_root(parent) {
            return vec![];
        }

        match ctx.entry.stem() {
            Some(INDEX_STEM) if policy.is_landing_root(parent) => vec![],
            Some(CONTENTS_STEM) if parent == policy.docs_root => vec![],
            _ => vec![ctx.violation(CODE, NAME, MESSAGE)],
        }
    }
}
