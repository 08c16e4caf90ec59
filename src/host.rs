//! Applying a conversion to an editable document.
//!
//! The host owns the text and the selection. [`run`] converts the selected
//! span (or the whole document when nothing is selected) and replaces it in
//! one call, only after the conversion has fully succeeded.

use core::ops::Range;

use tracing::debug;

use crate::codec::SqlCodec;
use crate::convert::Direction;
use crate::errors::Error;
use crate::pipeline::Converter;

/// An editable text document.
pub trait Document {
    /// The full document text.
    fn text(&self) -> &str;

    /// The selected byte range, if any.
    fn selection(&self) -> Option<Range<usize>>;

    /// Replace the bytes in `range` with `text`.
    fn replace(&mut self, range: Range<usize>, text: &str);
}

/// A [`Document`] backed by a `String`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    selection: Option<Range<usize>>,
}

impl TextBuffer {
    /// A buffer with no selection.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: None,
        }
    }

    /// Select the byte range `selection`.
    #[must_use]
    pub fn with_selection(mut self, selection: Range<usize>) -> Self {
        self.selection = Some(selection);
        self
    }

    /// The buffer contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the buffer and return its contents.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl Document for TextBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    fn replace(&mut self, range: Range<usize>, text: &str) {
        let start = range.start;
        self.text.replace_range(range, text);
        self.selection = Some(start..start + text.len());
    }
}

/// Convert the selection of `document` in `direction` and write the result back.
///
/// Returns the byte range the converted text occupies afterwards.
///
/// # Errors
///
/// * [`Error::NoTarget`] if there is no document.
/// * [`Error::InvalidSelection`] if the selection is out of bounds or splits a character.
/// * Any conversion error, in which case the document is left untouched.
pub fn run<D, C>(
    document: Option<&mut D>,
    converter: &Converter<C>,
    direction: Direction,
) -> Result<Range<usize>, Error>
where
    D: Document + ?Sized,
    C: SqlCodec,
{
    let document = document.ok_or(Error::NoTarget)?;
    let range = target_span(&*document)?;

    let converted = converter.convert(&document.text()[range.clone()], direction)?;
    debug!(
        start = range.start,
        end = range.end,
        replacement = converted.len(),
        "replacing document span"
    );

    let start = range.start;
    document.replace(range, &converted);
    Ok(start..start + converted.len())
}

/// The byte range [`run`] would convert: the selection, or the whole document
/// when the selection is absent or empty.
///
/// # Errors
///
/// [`Error::InvalidSelection`] if the selection is out of bounds or does not
/// fall on character boundaries.
pub fn target_span<D: Document + ?Sized>(document: &D) -> Result<Range<usize>, Error> {
    let text = document.text();
    match document.selection() {
        Some(range) if range.start == range.end && range.end <= text.len() => Ok(0..text.len()),
        Some(range) if text.get(range.clone()).is_none() => Err(Error::InvalidSelection {
            start: range.start,
            end: range.end,
            len: text.len(),
        }),
        Some(range) => Ok(range),
        None => Ok(0..text.len()),
    }
}
