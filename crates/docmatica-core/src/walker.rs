//! Directory traversal applying the exclusion policy.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::policy::{Decision, Policy};
use crate::types::Entry;
use crate::utils::paths;

/// Counters collected during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Entries handed to the dispatch callback.
    pub dispatched: usize,
    /// Entries (or subtrees) skipped by the policy.
    pub skipped: usize,
    /// Entries that could not be accessed.
    pub errors: usize,
}

/// Walks a scan root, dispatching every entry the policy includes.
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    root: &'a Path,
    policy: &'a Policy,
}

impl<'a> Walker<'a> {
    /// Creates a walker over `root`.
    #[must_use]
    pub fn new(root: &'a Path, policy: &'a Policy) -> Self {
        Self { root, policy }
    }

    /// Traverses the tree once, calling `dispatch` for each included entry.
    ///
    /// `dispatch` must not block on the evaluation of the entry; the walk
    /// continues as soon as it returns. Inaccessible entries are logged and
    /// skipped.
    pub fn walk<F>(&self, mut dispatch: F) -> WalkStats
    where
        F: FnMut(Entry),
    {
        let mut stats = WalkStats::default();
        let mut it = WalkDir::new(self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(next) = it.next() {
            let dent = match next {
                Ok(dent) => dent,
                Err(err) => {
                    let rpath = err.path().map_or_else(
                        || self.root.display().to_string(),
                        |p| paths::relative_display(p, self.root),
                    );
                    warn!("Error with path {}: {}", rpath, err);
                    stats.errors += 1;
                    continue;
                }
            };

            let entry = Entry::from_dir_entry(&dent);
            match self.policy.classify(&entry) {
                Decision::Include => {
                    stats.dispatched += 1;
                    dispatch(entry);
                }
                Decision::SkipEntry => {
                    debug!("Skipping: {}", entry.path.display());
                    stats.skipped += 1;
                }
                Decision::SkipSubtree => {
                    debug!("Skipping subtree: {}", entry.path.display());
                    stats.skipped += 1;
                    if entry.is_dir {
                        it.skip_current_dir();
                    }
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn walk_rel(root: &Path, policy: &Policy) -> (Vec<String>, WalkStats) {
        let mut seen = Vec::new();
        let stats = Walker::new(root, policy).walk(|e| {
            seen.push(paths::relative_display(&e.path, root));
        });
        (seen, stats)
    }

    #[test]
    fn walks_every_included_entry_once() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "user-manual/transfer/transfer.rst");
        touch(tmp.path(), "user-manual/index.rst");

        let (seen, stats) = walk_rel(tmp.path(), &Policy::default());
        assert_eq!(
            seen,
            vec![
                ".",
                "./user-manual",
                "./user-manual/index.rst",
                "./user-manual/transfer",
                "./user-manual/transfer/transfer.rst",
            ]
        );
        assert_eq!(stats.dispatched, 5);
        assert_eq!(stats.errors, 0);
    }

    #[test]
    fn prunes_hidden_and_underscore_subtrees() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".git/config");
        touch(tmp.path(), "_build/html/index.html");
        touch(tmp.path(), "user-manual/.hidden.rst");
        touch(tmp.path(), "user-manual/index.rst");

        let (seen, _) = walk_rel(tmp.path(), &Policy::default());
        assert_eq!(seen, vec![".", "./user-manual", "./user-manual/index.rst"]);
    }

    #[test]
    fn applies_docs_root_ignore_lists() {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("archivematica-docs");
        touch(&docs, "Makefile");
        touch(&docs, "conf.py");
        touch(&docs, "locale/fr/LC_MESSAGES/index.po");
        touch(&docs, "index.rst");
        touch(&docs, "admin-manual/Makefile");

        let (seen, stats) = walk_rel(&docs, &Policy::default());
        assert_eq!(
            seen,
            vec![
                ".",
                "./admin-manual",
                "./admin-manual/Makefile",
                "./index.rst",
            ]
        );
        assert_eq!(stats.skipped, 3);
    }

    #[test]
    fn missing_root_is_logged_not_fatal() {
        let missing = PathBuf::from("/nonexistent/docmatica-walker-test");
        let (seen, stats) = walk_rel(&missing, &Policy::default());
        assert!(seen.is_empty());
        assert_eq!(stats.errors, 1);
    }

    #[test]
    fn unreadable_directory_mid_walk_is_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a/first.rst");
        touch(tmp.path(), "b/lost.rst");
        touch(tmp.path(), "c.rst");
        touch(tmp.path(), "d/last.rst");

        // The root listing is read up front; `b` vanishes before the walk
        // descends into it.
        let root = tmp.path();
        let mut seen = Vec::new();
        let stats = Walker::new(root, &Policy::default()).walk(|e| {
            let rel = paths::relative_display(&e.path, root);
            if rel == "./a" {
                fs::remove_dir_all(root.join("b")).unwrap();
            }
            seen.push(rel);
        });

        assert_eq!(stats.errors, 1);
        assert!(seen.contains(&"./a/first.rst".to_string()));
        assert!(!seen.contains(&"./b/lost.rst".to_string()));
        assert!(seen.ends_with(&[
            "./c.rst".to_string(),
            "./d".to_string(),
            "./d/last.rst".to_string(),
        ]));
    }
}
