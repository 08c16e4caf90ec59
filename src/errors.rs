//! Submodule defining the errors used across the crate.

use crate::sql::ParseError;

/// Errors that can occur while converting `INSERT` statements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A `VALUES`-form statement has no column list, so there is nothing to pair the values with.
    #[error("INSERT into `{table}` has no column list; cannot convert to SET form")]
    MissingColumns {
        /// Target table of the offending statement.
        table: String,
    },
    /// The first `VALUES` row has fewer values than there are columns.
    #[error("INSERT into `{table}` lists {columns} columns but its first row has {values} values")]
    ColumnCountMismatch {
        /// Target table of the offending statement.
        table: String,
        /// Number of columns.
        columns: usize,
        /// Number of values in the first row.
        values: usize,
    },
    /// There is no document or text to operate on.
    #[error("No active editing context")]
    NoTarget,
    /// The selection does not address a valid span of the document.
    #[error("Selection {start}..{end} is not a valid range of a {len}-byte document")]
    InvalidSelection {
        /// Selection start offset.
        start: usize,
        /// Selection end offset.
        end: usize,
        /// Document length in bytes.
        len: usize,
    },
    /// The statement text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
