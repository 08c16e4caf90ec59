//! The parse/serialize seam used by the conversion pipeline.

use crate::sql::{FormatOptions, FormatSql, InsertStatement, ParseError, parse_inserts};

/// Turns statement text into trees and trees back into text.
///
/// The pipeline only talks to this trait, so a different SQL dialect or a
/// third-party parser can be plugged into [`Converter`](crate::Converter).
pub trait SqlCodec {
    /// Parse `sql` into its `INSERT` statements, in source order.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if `sql` is not a sequence of supported statements.
    fn parse(&self, sql: &str) -> Result<Vec<InsertStatement>, ParseError>;

    /// Render a single statement, without a trailing `;`.
    fn format(&self, statement: &InsertStatement) -> String;
}

/// The built-in MySQL codec, parsing with sqlparser's MySQL dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySqlCodec {
    options: FormatOptions,
}

impl MySqlCodec {
    /// A codec with default formatting options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec that renders with `options`.
    #[must_use]
    pub fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }

    /// The formatting options in use.
    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }
}

impl SqlCodec for MySqlCodec {
    fn parse(&self, sql: &str) -> Result<Vec<InsertStatement>, ParseError> {
        parse_inserts(sql)
    }

    fn format(&self, statement: &InsertStatement) -> String {
        statement.format_sql(&self.options)
    }
}

impl<C: SqlCodec + ?Sized> SqlCodec for &C {
    fn parse(&self, sql: &str) -> Result<Vec<InsertStatement>, ParseError> {
        (**self).parse(sql)
    }

    fn format(&self, statement: &InsertStatement) -> String {
        (**self).format(statement)
    }
}
