//! Statement trees consumed by the converters and the formatter.
//!
//! Value expressions and names are sqlparser nodes. The payload of an
//! `INSERT` is a tagged variant, so a tree can never carry both a `SET`
//! clause and a column/`VALUES` clause at the same time.

use sqlparser::ast::{self, Expr, Ident, ObjectName};

/// Letter case of the keywords a statement was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterCase {
    /// `INSERT INTO ...`
    #[default]
    Upper,
    /// `insert into ...`
    Lower,
}

impl LetterCase {
    /// Classify a keyword as written in the source.
    ///
    /// Anything that is not entirely lower case counts as upper case.
    #[must_use]
    pub fn of(word: &str) -> Self {
        if word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_uppercase) {
            LetterCase::Lower
        } else {
            LetterCase::Upper
        }
    }
}

/// Create an unqualified [`ObjectName`] such as a table name.
#[must_use]
pub fn object_name(name: &str) -> ObjectName {
    ObjectName(vec![ast::ObjectNamePart::Identifier(Ident::new(name))])
}

/// The last part of `name`, i.e. the unqualified table name.
///
/// Returns an empty string if the name has no parts.
#[must_use]
pub fn base_name(name: &ObjectName) -> &str {
    name.0.last().map_or("", |part| match part {
        ast::ObjectNamePart::Identifier(ident) => ident.value.as_str(),
        ast::ObjectNamePart::Function(func) => func.name.value.as_str(),
    })
}

/// One `column = value` item of a `SET` list or of `ON DUPLICATE KEY UPDATE`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Qualifier of the column when written as `t.col` or `db.t.col`.
    pub qualifier: Vec<Ident>,
    /// The assigned column.
    pub column: Ident,
    /// The assigned value.
    pub value: Expr,
}

impl Assignment {
    /// An unqualified assignment.
    #[must_use]
    pub fn new(column: Ident, value: Expr) -> Self {
        Self {
            qualifier: Vec::new(),
            column,
            value,
        }
    }
}

/// The data clause of an `INSERT`: exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertPayload {
    /// `SET a = 1, b = 2`
    Set(Vec<Assignment>),
    /// `(a, b) VALUES (1, 2), (3, 4)`
    Values {
        /// Column list; empty for a positional insert.
        columns: Vec<Ident>,
        /// Rows of values, aligned positionally with `columns`.
        rows: Vec<Vec<Expr>>,
    },
}

/// MySQL scheduling modifier of an `INSERT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    /// `LOW_PRIORITY`
    Low,
    /// `DELAYED`
    Delayed,
    /// `HIGH_PRIORITY`
    High,
}

impl From<ast::MysqlInsertPriority> for Priority {
    fn from(priority: ast::MysqlInsertPriority) -> Self {
        match priority {
            ast::MysqlInsertPriority::LowPriority => Priority::Low,
            ast::MysqlInsertPriority::Delayed => Priority::Delayed,
            ast::MysqlInsertPriority::HighPriority => Priority::High,
        }
    }
}

/// A parsed `INSERT` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertStatement {
    /// Case of the leading `INSERT` keyword as written.
    pub keyword_case: LetterCase,
    /// Optional scheduling modifier.
    pub priority: Option<Priority>,
    /// Whether `IGNORE` was given.
    pub ignore: bool,
    /// Target table.
    pub table: ObjectName,
    /// `SET` list or columns and rows.
    pub payload: InsertPayload,
    /// `ON DUPLICATE KEY UPDATE` assignments; empty when absent.
    pub on_duplicate_update: Vec<Assignment>,
}

impl InsertStatement {
    /// A plain `INSERT INTO table ...` with no modifiers.
    #[must_use]
    pub fn new(table: ObjectName, payload: InsertPayload) -> Self {
        Self {
            keyword_case: LetterCase::Upper,
            priority: None,
            ignore: false,
            table,
            payload,
            on_duplicate_update: Vec::new(),
        }
    }

    /// The unqualified name of the target table.
    #[must_use]
    pub fn table_name(&self) -> &str {
        base_name(&self.table)
    }

    /// Whether the statement is in `SET` form.
    #[must_use]
    pub fn is_set_form(&self) -> bool {
        matches!(self.payload, InsertPayload::Set(_))
    }
}
