//! The conversion pipeline: segment, normalize, parse, convert, format, reassemble.

use tracing::{debug, warn};

use crate::codec::{MySqlCodec, SqlCodec};
use crate::convert::Direction;
use crate::errors::Error;
use crate::normalize::normalize;
use crate::segment::{Fragment, segment};
use crate::sql::InsertStatement;

/// What to do when a single statement cannot be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Fail the whole conversion on the first bad statement.
    #[default]
    Abort,
    /// Copy the bad statement to the output unchanged and keep going.
    Skip,
}

/// Pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertOptions {
    /// Behavior on a statement that fails to parse or convert.
    pub failure_policy: FailurePolicy,
}

/// Converts every `INSERT` statement found in a block of text.
///
/// # Example
///
/// ```
/// use sql_insert_form::{Converter, Direction};
///
/// let converter = Converter::mysql();
/// let out = converter
///     .convert("insert into users (id, name) values (1, 'hoge');", Direction::ToSet)
///     .unwrap();
/// assert_eq!(out, "insert into users set id = 1, name = 'hoge';");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter<C = MySqlCodec> {
    codec: C,
    options: ConvertOptions,
}

impl Converter {
    /// A converter using the built-in [`MySqlCodec`] with default options.
    #[must_use]
    pub fn mysql() -> Self {
        Self::new(MySqlCodec::new())
    }
}

impl<C: SqlCodec> Converter<C> {
    /// A converter that parses and formats with `codec`.
    #[must_use]
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            options: ConvertOptions::default(),
        }
    }

    /// Replace the pipeline settings.
    #[must_use]
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// The codec in use.
    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The pipeline settings in use.
    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the `INSERT` statements of `text` in `direction`.
    ///
    /// Text outside of statements is copied unchanged. Each converted
    /// statement is terminated with `;`, and statements that came from the
    /// same fragment are separated by `";\n"`.
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::Abort`], the first statement that fails to parse
    /// or convert fails the call and no output is produced.
    pub fn convert(&self, text: &str, direction: Direction) -> Result<String, Error> {
        let mut out = String::with_capacity(text.len());

        for fragment in segment(text) {
            match fragment {
                Fragment::Passthrough(passthrough) => out.push_str(passthrough),
                Fragment::Statement(statement) => {
                    match self.convert_statement(statement, direction) {
                        Ok(converted) => out.push_str(&converted),
                        Err(err) if self.options.failure_policy == FailurePolicy::Skip => {
                            warn!(error = %err, statement, "leaving statement unconverted");
                            out.push_str(statement);
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }

        Ok(out)
    }

    /// Parse and convert the `INSERT` statements of `text` without formatting them.
    ///
    /// Statements skipped under [`FailurePolicy::Skip`] are left out.
    ///
    /// # Errors
    ///
    /// Same as [`Converter::convert`].
    pub fn statements(
        &self,
        text: &str,
        direction: Direction,
    ) -> Result<Vec<InsertStatement>, Error> {
        let mut statements = Vec::new();

        for statement in segment(text)
            .into_iter()
            .filter_map(|fragment| match fragment {
                Fragment::Statement(statement) => Some(statement),
                Fragment::Passthrough(_) => None,
            })
        {
            match self.parse_and_apply(statement, direction) {
                Ok(converted) => statements.extend(converted),
                Err(err) if self.options.failure_policy == FailurePolicy::Skip => {
                    warn!(error = %err, statement, "leaving statement unconverted");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(statements)
    }

    fn parse_and_apply(
        &self,
        statement: &str,
        direction: Direction,
    ) -> Result<Vec<InsertStatement>, Error> {
        let normalized = normalize(statement);
        let parsed = self.codec.parse(&normalized)?;
        debug!(
            statements = parsed.len(),
            ?direction,
            "parsed statement fragment"
        );
        direction.apply(parsed)
    }

    fn convert_statement(&self, statement: &str, direction: Direction) -> Result<String, Error> {
        let converted = self.parse_and_apply(statement, direction)?;
        let mut out = converted
            .iter()
            .map(|stmt| self.codec.format(stmt))
            .collect::<Vec<_>>()
            .join(";\n");
        out.push(';');
        Ok(out)
    }
}
