//! Static exclusion policy and naming constants for a docs tree.

use serde::{Deserialize, Serialize};

use crate::types::Entry;

/// Placeholder replaced with the page anchor in [`Policy::back_to_top`].
pub const ANCHOR_PLACEHOLDER: &str = "{anchor}";

/// What the walker should do with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Dispatch the entry for rule evaluation.
    Include,
    /// Skip the entry but keep descending if it is a directory.
    SkipEntry,
    /// Skip the entry and everything below it.
    SkipSubtree,
}

/// Naming constants the walker and rules are evaluated against.
///
/// The defaults describe the `archivematica-docs` repository layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Name of the top-level docs directory.
    pub docs_root: String,
    /// Names of the manual root directories.
    pub manuals: Vec<String>,
    /// Further directories that may not hold pages directly, with no landing
    /// page exemption (for example `images`).
    pub extra_chapter_roots: Vec<String>,
    /// Directories skipped when directly inside `docs_root`.
    pub ignored_dirs: Vec<String>,
    /// File names skipped when directly inside `docs_root`.
    pub ignored_files: Vec<String>,
    /// Name of the directories allowed to hold images.
    pub images_dir: String,
    /// Image extensions allowed inside `images_dir`.
    pub image_extensions: Vec<String>,
    /// Extension of markup documents.
    pub markup_extension: String,
    /// Template of the back-to-top line; `{anchor}` is replaced with the page label.
    pub back_to_top: String,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            docs_root: "archivematica-docs".to_string(),
            manuals: vec![
                "admin-manual".to_string(),
                "getting-started".to_string(),
                "user-manual".to_string(),
            ],
            extra_chapter_roots: Vec::new(),
            ignored_dirs: vec!["locale".to_string(), "_static".to_string()],
            ignored_files: vec![
                "requirements.txt".to_string(),
                "README.md".to_string(),
                "Makefile".to_string(),
                "LICENCE".to_string(),
                "issue_template.md".to_string(),
                "conf.py".to_string(),
            ],
            images_dir: "images".to_string(),
            image_extensions: vec!["png".to_string(), "svg".to_string()],
            markup_extension: "rst".to_string(),
            back_to_top: format!(":ref:`Back to the top <{ANCHOR_PLACEHOLDER}>`"),
        }
    }
}

impl Policy {
    /// Classifies an entry for the walker.
    ///
    /// The scan root itself is always included.
    #[must_use]
    pub fn classify(&self, entry: &Entry) -> Decision {
        if entry.depth == 0 {
            return Decision::Include;
        }

        let skip = if entry.is_dir {
            Decision::SkipSubtree
        } else {
            Decision::SkipEntry
        };

        if entry.name.starts_with('.') || entry.name.starts_with('_') {
            return skip;
        }

        if entry.parent_name() == Some(self.docs_root.as_str()) {
            if entry.is_dir && self.ignored_dirs.contains(&entry.name) {
                return Decision::SkipSubtree;
            }
            if self.ignored_files.contains(&entry.name) {
                return Decision::SkipEntry;
            }
        }

        Decision::Include
    }

    /// Returns true if pages directly inside `name` are subject to chapter
    /// placement.
    #[must_use]
    pub fn is_chapter_root(&self, name: &str) -> bool {
        self.is_landing_root(name) || self.extra_chapter_roots.iter().any(|r| r == name)
    }

    /// Returns true if `name` is the docs root or a manual root, the
    /// directories allowed to hold an `index` page.
    #[must_use]
    pub fn is_landing_root(&self, name: &str) -> bool {
        name == self.docs_root || self.manuals.iter().any(|m| m == name)
    }

    /// Returns true if the entry is a markup document.
    #[must_use]
    pub fn is_markup(&self, entry: &Entry) -> bool {
        !entry.is_dir && entry.extension().is_some_and(|e| self.is_markup_extension(e))
    }

    /// Returns true if `ext` (without dot) is the markup extension.
    #[must_use]
    pub fn is_markup_extension(&self, ext: &str) -> bool {
        strip_dot(&self.markup_extension) == ext
    }

    /// Returns true if `ext` (without dot) is an allowed image extension.
    #[must_use]
    pub fn is_image_extension(&self, ext: &str) -> bool {
        self.image_extensions.iter().any(|e| strip_dot(e) == ext)
    }

    /// Renders the expected back-to-top line for `anchor`.
    #[must_use]
    pub fn back_to_top_line(&self, anchor: &str) -> String {
        self.back_to_top.replace(ANCHOR_PLACEHOLDER, anchor)
    }
}

fn strip_dot(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}
