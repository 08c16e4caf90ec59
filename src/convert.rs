//! Migrating statement trees between the `SET` shape and the `VALUES` shape.

use tracing::debug;

use crate::errors::Error;
use crate::sql::{Assignment, InsertPayload, InsertStatement, base_name};

/// Which way to flip the statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// `SET a = 1` becomes `(a) VALUES (1)`.
    ToValues,
    /// `(a) VALUES (1)` becomes `SET a = 1`.
    ToSet,
}

impl Direction {
    /// Convert every statement of the sequence in this direction.
    ///
    /// # Errors
    ///
    /// See [`values_to_set`]; converting to the `VALUES` form cannot fail.
    pub fn apply(self, statements: Vec<InsertStatement>) -> Result<Vec<InsertStatement>, Error> {
        match self {
            Direction::ToValues => Ok(set_to_values(statements)),
            Direction::ToSet => values_to_set(statements),
        }
    }
}

/// Rewrite every `SET`-form statement into the single-row `VALUES` form.
///
/// Statements already in `VALUES` form are returned unchanged.
#[must_use]
pub fn set_to_values(statements: Vec<InsertStatement>) -> Vec<InsertStatement> {
    statements.into_iter().map(InsertStatement::into_values_form).collect()
}

/// Rewrite every `VALUES`-form statement into the `SET` form.
///
/// Statements already in `SET` form are returned unchanged. Only the first
/// row of a multi-row `VALUES` list is used; the other rows are dropped, as
/// are values of the first row beyond the last column.
///
/// # Errors
///
/// * [`Error::MissingColumns`] if a statement has no column list.
/// * [`Error::ColumnCountMismatch`] if the first row has fewer values than columns.
pub fn values_to_set(statements: Vec<InsertStatement>) -> Result<Vec<InsertStatement>, Error> {
    statements
        .into_iter()
        .map(InsertStatement::into_set_form)
        .collect()
}

impl InsertStatement {
    /// This statement in `VALUES` form.
    #[must_use]
    pub fn into_values_form(self) -> Self {
        let InsertPayload::Set(assignments) = self.payload else {
            return self;
        };

        let (columns, row): (Vec<_>, Vec<_>) = assignments
            .into_iter()
            .map(|assignment| (assignment.column, assignment.value))
            .unzip();

        Self {
            payload: InsertPayload::Values {
                columns,
                rows: vec![row],
            },
            ..self
        }
    }

    /// This statement in `SET` form.
    ///
    /// # Errors
    ///
    /// * [`Error::MissingColumns`] if the statement has no column list.
    /// * [`Error::ColumnCountMismatch`] if the first row has fewer values than columns.
    pub fn into_set_form(self) -> Result<Self, Error> {
        let InsertPayload::Values { columns, rows } = self.payload else {
            return Ok(self);
        };

        if columns.is_empty() {
            return Err(Error::MissingColumns {
                table: base_name(&self.table).to_owned(),
            });
        }

        let total_rows = rows.len();
        let first_row = rows.into_iter().next().unwrap_or_default();
        if first_row.len() < columns.len() {
            return Err(Error::ColumnCountMismatch {
                table: base_name(&self.table).to_owned(),
                columns: columns.len(),
                values: first_row.len(),
            });
        }
        if total_rows > 1 {
            debug!(
                table = base_name(&self.table),
                dropped = total_rows - 1,
                "SET form holds a single row; extra VALUES rows dropped"
            );
        }
        if first_row.len() > columns.len() {
            debug!(
                table = base_name(&self.table),
                dropped = first_row.len() - columns.len(),
                "values beyond the last column dropped"
            );
        }

        let assignments = columns
            .into_iter()
            .zip(first_row)
            .map(|(column, value)| Assignment::new(column, value))
            .collect();

        Ok(Self {
            payload: InsertPayload::Set(assignments),
            ..self
        })
    }
}
