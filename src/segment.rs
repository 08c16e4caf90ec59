//! Splitting text into `INSERT` statement candidates and passthrough text.
//!
//! Detection is purely textual: an `INSERT` inside a string literal or a
//! comment is picked up like any other, and a `;` inside a string ends the
//! candidate early.

use std::sync::LazyLock;

use regex::Regex;

/// `INSERT` followed by a space, up to the nearest `;`, across lines.
static STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(?i-u:INSERT ).+?;").expect("valid statement regex"));

/// A contiguous slice of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// Text that starts with `INSERT` and is handed to the parser.
    Statement(&'a str),
    /// Text copied to the output unchanged.
    Passthrough(&'a str),
}

impl<'a> Fragment<'a> {
    /// Classify a slice: anything starting with `INSERT` (any case) is a statement.
    #[must_use]
    pub fn classify(text: &'a str) -> Self {
        if is_statement(text) {
            Fragment::Statement(text)
        } else {
            Fragment::Passthrough(text)
        }
    }

    /// The underlying text.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self {
            Fragment::Statement(text) | Fragment::Passthrough(text) => text,
        }
    }

    /// Whether this fragment is a statement candidate.
    #[must_use]
    pub fn is_statement(&self) -> bool {
        matches!(self, Fragment::Statement(_))
    }
}

/// Whether `text` starts with the keyword `INSERT`, ignoring case.
#[must_use]
pub fn is_statement(text: &str) -> bool {
    text.get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("INSERT"))
}

/// Split `text` into fragments.
///
/// Concatenating the returned fragments in order reproduces `text` exactly.
/// Empty slices are never returned.
#[must_use]
pub fn segment(text: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut last = 0;

    for found in STATEMENT.find_iter(text) {
        if found.start() > last {
            fragments.push(Fragment::classify(&text[last..found.start()]));
        }
        fragments.push(Fragment::classify(found.as_str()));
        last = found.end();
    }
    if last < text.len() {
        fragments.push(Fragment::classify(&text[last..]));
    }

    fragments
}
