//! Integration test: default rules end-to-end via Scanner.
//!
//! Builds a small `archivematica-docs` tree in a temp directory and checks
//! the full walk → rules → aggregator pipeline.

use docmatica_core::{Config, Reporter, ScanSummary, Scanner, Verdict, Violation};
use docmatica_rules::default_rules;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;

#[derive(Default)]
struct Collect(Vec<(String, String, String)>);

impl Reporter for Collect {
    fn violation(&mut self, display_path: &str, v: &Violation) -> io::Result<()> {
        self.0
            .push((display_path.to_string(), v.code.clone(), v.message.clone()));
        Ok(())
    }
}

fn page(anchor: &str) -> String {
    format!(".. _{anchor}:\n\nTitle\n=====\n\nBody.\n\n:ref:`Back to the top <{anchor}>`\n")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A tree that passes every rule.
fn clean_tree() -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("archivematica-docs");
    write(&docs, "index.rst", &page("home"));
    write(&docs, "contents.rst", &page("contents"));
    write(&docs, "Makefile", "html:\n");
    write(&docs, "conf.py", "project = 'x'\n");
    write(&docs, "README.md", "# docs\n");
    write(&docs, "locale/fr/LC_MESSAGES/index.po", "");
    write(&docs, "_static/custom.css", "");
    write(&docs, ".gitignore", "_build\n");
    write(&docs, "admin-manual/index.rst", &page("admin-top"));
    write(
        &docs,
        "admin-manual/installation/install.rst",
        &page("install"),
    );
    write(&docs, "admin-manual/installation/images/flow.svg", "<svg/>");
    write(&docs, "user-manual/index.rst", &page("user-top"));
    write(&docs, "user-manual/transfer/transfer.rst", &page("transfer"));
    write(&docs, "user-manual/transfer/images/shot.png", "png");
    write(&docs, "user-manual/transfer/_drafts/wip.txt", "");
    (tmp, docs)
}

fn scan(root: &Path) -> (Vec<(String, String, String)>, ScanSummary) {
    let scanner = Scanner::builder()
        .root(root)
        .config(Config::default())
        .rules(default_rules())
        .build()
        .expect("scanner should build");
    let mut sink = Collect::default();
    let summary = scanner.run(&mut sink).expect("scan should succeed");
    let mut found = sink.0;
    found.sort();
    (found, summary)
}

#[test]
fn clean_tree_passes() {
    let (_tmp, docs) = clean_tree();
    let (found, summary) = scan(&docs);
    assert!(found.is_empty(), "unexpected violations: {found:#?}");
    assert_eq!(summary.verdict, Verdict::Clean);
    assert_eq!(summary.verdict.exit_code(), 0);
}

#[test]
fn detects_each_rule() {
    let (_tmp, docs) = clean_tree();
    write(&docs, "user-manual/transfer/images/diagram.txt", "");
    write(&docs, "user-manual/overview.rst", &page("overview"));
    write(
        &docs,
        "admin-manual/installation/upgrade.rst",
        ".. _upgrade:\n\nNo link back.\n",
    );
    write(&docs, "user-manual/ingest/ingest.rst", "Ingest\n======\n");

    let (found, summary) = scan(&docs);
    let found: Vec<(&str, &str)> = found
        .iter()
        .map(|(p, c, _)| (p.as_str(), c.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("./admin-manual/installation/upgrade.rst", "DM003"),
            ("./user-manual/ingest/ingest.rst", "DM003"),
            ("./user-manual/overview.rst", "DM002"),
            ("./user-manual/transfer/images/diagram.txt", "DM001"),
        ]
    );
    assert_eq!(summary.violations, 4);
    assert_eq!(summary.verdict.exit_code(), 1);
}

#[test]
fn manual_index_missing_back_to_top_fails_only_anchor_rule() {
    let (_tmp, docs) = clean_tree();
    write(&docs, "admin-manual/index.rst", ".. _admin-top:\n\nAdmin\n");

    let (found, _) = scan(&docs);
    assert_eq!(
        found,
        vec![(
            "./admin-manual/index.rst".to_string(),
            "DM003".to_string(),
            "'Back to top' link to anchor not found.".to_string(),
        )]
    );
}

#[test]
fn one_file_can_fail_several_rules() {
    let (_tmp, docs) = clean_tree();
    write(&docs, "getting-started/quick.rst", "");

    let (found, _) = scan(&docs);
    let codes: Vec<&str> = found.iter().map(|(_, c, _)| c.as_str()).collect();
    assert_eq!(codes, vec!["DM002", "DM003"]);
    assert!(found
        .iter()
        .all(|(p, _, _)| p == "./getting-started/quick.rst"));
}

#[test]
fn disabled_rule_is_not_run() {
    let (_tmp, docs) = clean_tree();
    write(&docs, "user-manual/overview.rst", &page("overview"));

    let config = Config::parse("[rules.chapter-placement]\nenabled = false\n").unwrap();
    let scanner = Scanner::builder()
        .root(&docs)
        .config(config)
        .rules(default_rules())
        .build()
        .unwrap();
    let mut sink = Collect::default();
    let summary = scanner.run(&mut sink).unwrap();
    assert_eq!(summary.verdict, Verdict::Clean);
}

#[test]
fn repeated_scans_report_identical_sets() {
    let (_tmp, docs) = clean_tree();
    for i in 0..20 {
        write(&docs, &format!("user-manual/stray-{i}.rst"), "");
    }

    let (first, _) = scan(&docs);
    let (second, _) = scan(&docs);
    assert_eq!(first.len(), 40);
    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn symlinked_docs_root_keeps_ignore_lists() {
    let tmp = TempDir::new().unwrap();
    let checkout = tmp.path().join("checkout");
    write(&checkout, "index.rst", &page("home"));
    write(&checkout, "Makefile", "html:\n");
    write(&checkout, "conf.py", "project = 'x'\n");
    write(&checkout, "locale/fr/LC_MESSAGES/index.po", "");
    let docs = tmp.path().join("archivematica-docs");
    std::os::unix::fs::symlink(&checkout, &docs).unwrap();

    let (found, summary) = scan(&docs);
    assert!(found.is_empty(), "unexpected violations: {found:#?}");
    assert_eq!(summary.entries_skipped, 3);
}
