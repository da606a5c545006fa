//! Page anchor and back-to-top link checking.
//!
//! Every page must open with an anchor definition and close with a link
//! back to that anchor:
//!
//! ```text
//! .. _transfer:
//!
//! ...page body...
//!
//! :ref:`Back to the top <transfer>`
//! ```
//!
//! The check is a single forward pass with constant state. Only the first
//! line is inspected for the anchor; every later line is compared verbatim
//! against the expected back-to-top line. The body is never parsed.

use crate::policy::{Policy, ANCHOR_PLACEHOLDER};

/// Message for a page without an anchor on its first line.
pub const MISSING_ANCHOR: &str = "Anchor not found at top of page.";

/// Message for a page whose back-to-top link is missing or mismatched.
pub const MISSING_BACK_TO_TOP: &str = "'Back to top' link to anchor not found.";

/// State of an [`AnchorChecker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorState {
    /// No line has been consumed yet.
    AwaitingFirstLine,
    /// The first line was not an anchor definition. Terminal.
    AnchorMissing,
    /// The first line defined `label`.
    AnchorFound {
        /// Captured anchor label.
        label: String,
        /// Expected back-to-top line for `label`.
        expected: String,
        /// Whether the expected line has been seen.
        backref_found: bool,
    },
}

/// Result of checking one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorOutcome {
    /// Anchor and matching back-to-top link present.
    Valid {
        /// The page anchor.
        label: String,
    },
    /// First line is not an anchor definition.
    MissingAnchor,
    /// Anchor present but never linked back to.
    MissingBackToTop {
        /// The page anchor.
        label: String,
    },
}

impl AnchorOutcome {
    /// Returns true if the page passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Violation message for a failed page, `None` if it passed.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Valid { .. } => None,
            Self::MissingAnchor => Some(MISSING_ANCHOR),
            Self::MissingBackToTop { .. } => Some(MISSING_BACK_TO_TOP),
        }
    }
}

/// Line-fed state machine validating a page's anchor structure.
///
/// # Example
///
/// ```ignore
/// let mut checker = AnchorChecker::new(&policy);
/// for line in content.lines() {
///     checker.feed(line);
/// }
/// assert!(checker.finish().is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct AnchorChecker<'a> {
    template: &'a str,
    state: AnchorState,
}

impl<'a> AnchorChecker<'a> {
    /// Creates a checker using the policy's back-to-top template.
    #[must_use]
    pub fn new(policy: &'a Policy) -> Self {
        Self::with_template(&policy.back_to_top)
    }

    /// Creates a checker with an explicit back-to-top template.
    ///
    /// `{anchor}` in the template is replaced with the captured label.
    #[must_use]
    pub fn with_template(template: &'a str) -> Self {
        Self {
            template,
            state: AnchorState::AwaitingFirstLine,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &AnchorState {
        &self.state
    }

    /// Consumes one line (without its terminator).
    pub fn feed(&mut self, line: &str) {
        if self.state == AnchorState::AwaitingFirstLine {
            self.state = match parse_anchor(line) {
                Some(label) => AnchorState::AnchorFound {
                    label: label.to_string(),
                    expected: self.template.replace(ANCHOR_PLACEHOLDER, label),
                    backref_found: false,
                },
                None => AnchorState::AnchorMissing,
            };
            return;
        }

        if let AnchorState::AnchorFound {
            expected,
            backref_found,
            ..
        } = &mut self.state
        {
            if !*backref_found && line == expected.as_str() {
                *backref_found = true;
            }
        }
    }

    /// Finalizes the check after the last line.
    #[must_use]
    pub fn finish(self) -> AnchorOutcome {
        match self.state {
            AnchorState::AwaitingFirstLine | AnchorState::AnchorMissing => {
                AnchorOutcome::MissingAnchor
            }
            AnchorState::AnchorFound {
                label,
                backref_found: true,
                ..
            } => AnchorOutcome::Valid { label },
            AnchorState::AnchorFound { label, .. } => AnchorOutcome::MissingBackToTop { label },
        }
    }

    /// Runs a full check over `lines`.
    #[must_use]
    pub fn check_lines<I, S>(template: &'a str, lines: I) -> AnchorOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut checker = Self::with_template(template);
        for line in lines {
            checker.feed(line.as_ref());
        }
        checker.finish()
    }
}

/// Extracts the label from an anchor definition line such as `.. _label:`.
///
/// The line must split into exactly two whitespace-separated fields.
fn parse_anchor(line: &str) -> Option<&str> {
    let mut fields = line.split_whitespace();
    let (Some(".."), Some(target), None) = (fields.next(), fields.next(), fields.next()) else {
        return None;
    };
    target.strip_prefix('_')?.strip_suffix(':')
}
