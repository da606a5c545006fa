//! Rule restricting which kinds of files may appear in the docs tree.
//!
//! # Allowed Files
//!
//! - Directories
//! - Markup documents (`.rst`)
//! - Images (`.png`, `.svg`) directly inside an `images` directory

use docmatica_core::{EntryContext, Rule, Violation};

/// Rule code for file-type.
pub const CODE: &str = "DM001";

/// Rule name for file-type.
pub const NAME: &str = "file-type";

/// Requires markup files, or images placed in an images directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileType;

impl FileType {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn message(ctx: &EntryContext<'_>) -> String {
        let policy = ctx.policy;
        let images = policy
            .image_extensions
            .iter()
            .map(|e| format!(".{}", e.trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join(" or ");
        format!(
            "Does not have a .{} file extension or a {} extension while nested in an '{}' directory.",
            policy.markup_extension.trim_start_matches('.'),
            images,
            policy.images_dir,
        )
    }
}

impl Rule for FileType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Files must be .rst, or .png/.svg inside an images directory"
    }

    fn check(&self, ctx: &EntryContext<'_>) -> Vec<Violation> {
        let entry = ctx.entry;
        if entry.is_dir {
            return vec![];
        }

        let Some(ext) = entry.extension() else {
            return vec![ctx.violation(CODE, NAME, Self::message(ctx))];
        };

        if ctx.policy.is_markup_extension(ext) {
            return vec![];
        }
        if entry.parent_name() == Some(ctx.policy.images_dir.as_str())
            && ctx.policy.is_image_extension(ext)
        {
            return vec![];
        }

        vec![ctx.violation(CODE, NAME, Self::message(ctx))]
    }
}
