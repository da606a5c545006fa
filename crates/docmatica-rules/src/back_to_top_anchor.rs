//! Rule requiring a page anchor and a back-to-top link to it.
//!
//! # Detected Patterns
//!
//! - First line is not an anchor definition (`.. _label:`)
//! - No line after the anchor reads exactly ``:ref:`Back to the top <label>` ``
//! - The page cannot be opened or read
//!
//! A read failure part-way through still reports the anchor result for the
//! lines read before the failure.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use docmatica_core::{AnchorChecker, EntryContext, Rule, Violation};
use tracing::debug;

/// Rule code for back-to-top-anchor.
pub const CODE: &str = "DM003";

/// Rule name for back-to-top-anchor.
pub const NAME: &str = "back-to-top-anchor";

/// Requires every page to begin with an anchor and link back to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackToTopAnchor;

impl BackToTopAnchor {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BackToTopAnchor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Pages must start with an anchor and end with a 'Back to the top' link to it"
    }

    fn check(&self, ctx: &EntryContext<'_>) -> Vec<Violation> {
        if !ctx.is_markup() {
            return vec![];
        }

        let path = ctx.entry.path.as_path();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                return vec![ctx.violation(CODE, NAME, format!("Unable to open file: {e}"))];
            }
        };

        let mut checker = AnchorChecker::new(ctx.policy);
        let read_result = feed_lines(BufReader::new(file), &mut checker);
        let outcome = checker.finish();
        debug!("{}: {:?}", path.display(), outcome);

        let mut violations = Vec::new();
        if let Some(message) = outcome.message() {
            violations.push(ctx.violation(CODE, NAME, message));
        }
        if let Err(e) = read_result {
            violations.push(ctx.violation(CODE, NAME, format!("Unable to read file: {e}")));
        }
        violations
    }
}

/// Feeds every line of `reader` to `checker`.
///
/// Lines are split on `\n` with a trailing `\r` removed; invalid UTF-8 is
/// replaced rather than rejected.
fn feed_lines<R: BufRead>(mut reader: R, checker: &mut AnchorChecker<'_>) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        checker.feed(&String::from_utf8_lossy(line));
    }
}
