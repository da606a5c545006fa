//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "docmatica.toml";

const DEFAULT_CONFIG: &str = r#"# docmatica configuration
#
# Add "docmatica.toml" to policy.ignored_files if this file lives in the
# docs root, otherwise the file-type rule reports it.

[scan]
# Directory to lint, relative to this file (default: current directory)
# root = "."

# Number of rule workers (default: available parallelism)
# parallelism = 8

[policy]
# Top-level docs directory; its direct children are subject to the ignore lists
docs_root = "archivematica-docs"

# Manual roots; together with docs_root these are the chapter roots
manuals = ["admin-manual", "getting-started", "user-manual"]

# Further directories that may not hold pages directly, not even index.rst
# extra_chapter_roots = ["images"]

# Directories skipped when directly inside docs_root
ignored_dirs = ["locale", "_static"]

# Files skipped when directly inside docs_root
ignored_files = [
    "requirements.txt",
    "README.md",
    "Makefile",
    "LICENCE",
    "issue_template.md",
    "conf.py",
]

images_dir = "images"
image_extensions = ["png", "svg"]
markup_extension = "rst"

# Expected last link of every page; {anchor} is the label from the first line
back_to_top = ":ref:`Back to the top <{anchor}>`"

# Rules can be switched off individually
# [rules.chapter-placement]
# enabled = false
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    let path = write_default(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to match your docs layout");
    println!("  2. Run: docmatica");

    Ok(())
}

fn write_default(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);

    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
