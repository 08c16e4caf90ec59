//! Ensuring a statement candidate says `INSERT ... INTO` before it is parsed.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::sql::LetterCase;

/// Leading `INSERT` plus any MySQL modifiers, then an optional `INTO`.
static LEADING_INSERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)^(INSERT\b(?:\s+(?:LOW_PRIORITY|DELAYED|HIGH_PRIORITY|IGNORE)\b)*)(\s+INTO\b)?")
        .expect("valid leading INSERT regex")
});

/// Insert the `INTO` keyword after a leading `INSERT` (and its modifiers) when it is missing.
///
/// Text that does not start with the `INSERT` keyword, or that already has
/// `INTO`, is returned borrowed and unchanged. The added keyword follows the
/// letter case of the leading `INSERT`. Applying this twice is the same as
/// applying it once.
#[must_use]
pub fn normalize(statement: &str) -> Cow<'_, str> {
    let Some(caps) = LEADING_INSERT.captures(statement) else {
        return Cow::Borrowed(statement);
    };
    if caps.get(2).is_some() {
        return Cow::Borrowed(statement);
    }
    let Some(head) = caps.get(1) else {
        return Cow::Borrowed(statement);
    };

    let into = match LetterCase::of(&statement[..6]) {
        LetterCase::Lower => " into",
        LetterCase::Upper => " INTO",
    };
    let mut normalized = String::with_capacity(statement.len() + into.len());
    normalized.push_str(head.as_str());
    normalized.push_str(into);
    normalized.push_str(&statement[head.end()..]);
    Cow::Owned(normalized)
}
