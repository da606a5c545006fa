//! # docmatica-rules
//!
//! Built-in lint rules for docmatica.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DM001 | `file-type` | Only `.rst` files, or `.png`/`.svg` inside an `images` directory |
//! | DM002 | `chapter-placement` | Pages live in chapter directories, not at a manual root |
//! | DM003 | `back-to-top-anchor` | Pages open with an anchor and end with a link back to it |
//!
//! ## Usage
//!
//! ```ignore
//! use docmatica_core::Scanner;
//! use docmatica_rules::{FileType, BackToTopAnchor};
//!
//! let scanner = Scanner::builder()
//!     .root("./archivematica-docs")
//!     .rule(FileType::new())
//!     .rule(BackToTopAnchor::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod back_to_top_anchor;
mod chapter_placement;
mod file_type;
mod presets;

pub use back_to_top_anchor::BackToTopAnchor;
pub use chapter_placement::ChapterPlacement;
pub use file_type::FileType;
pub use presets::{default_rules, rule_by_name};

/// Re-export core types for convenience.
pub use docmatica_core::{Rule, Violation};
