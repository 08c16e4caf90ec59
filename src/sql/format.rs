//! SQL output formatting.
//!
//! The statement skeleton is written here so keywords can follow the
//! configured case. Value expressions are rendered by sqlparser's `Display`.

use core::fmt::Display;

use sqlparser::ast::{Expr, Ident, ObjectName, ObjectNamePart};

use super::ast::{Assignment, InsertPayload, InsertStatement, LetterCase, Priority};

/// How keywords are cased in formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeywordCase {
    /// `INSERT INTO t SET ...`
    Upper,
    /// `insert into t set ...`
    Lower,
    /// Follow the case the statement's own `INSERT` keyword was written in.
    #[default]
    Preserve,
}

/// Formatter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatOptions {
    /// Keyword letter case.
    pub keyword_case: KeywordCase,
    /// Backtick every table and column name, not only those quoted in the source.
    pub quote_identifiers: bool,
}

/// Accumulates formatted SQL text for one statement.
pub struct SqlWriter<'a> {
    out: String,
    case: LetterCase,
    options: &'a FormatOptions,
}

impl<'a> SqlWriter<'a> {
    /// Create a writer; `source_case` is used when keywords preserve their case.
    #[must_use]
    pub fn new(options: &'a FormatOptions, source_case: LetterCase) -> Self {
        let case = match options.keyword_case {
            KeywordCase::Upper => LetterCase::Upper,
            KeywordCase::Lower => LetterCase::Lower,
            KeywordCase::Preserve => source_case,
        };
        Self {
            out: String::new(),
            case,
            options,
        }
    }

    /// Consume the writer and return the text.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    /// Append text verbatim.
    pub fn raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Append a value through its `Display` impl.
    pub fn display(&mut self, value: &impl Display) {
        self.out.push_str(&value.to_string());
    }

    /// Append an upper-case keyword in the configured case.
    pub fn keyword(&mut self, keyword: &str) {
        match self.case {
            LetterCase::Upper => self.out.push_str(keyword),
            LetterCase::Lower => self.out.push_str(&keyword.to_ascii_lowercase()),
        }
    }

    /// Append a table or column name, quoting it when required.
    pub fn ident(&mut self, ident: &Ident) {
        if ident.quote_style.is_none() && self.options.quote_identifiers {
            self.display(&Ident::with_quote('`', ident.value.as_str()));
        } else {
            self.display(ident);
        }
    }

    /// Append a dotted name.
    pub fn object_name(&mut self, name: &ObjectName) {
        for (i, part) in name.0.iter().enumerate() {
            if i > 0 {
                self.out.push('.');
            }
            match part {
                ObjectNamePart::Identifier(ident) => self.ident(ident),
                ObjectNamePart::Function(_) => self.display(part),
            }
        }
    }

    /// Append items separated by `", "`.
    pub fn comma_separated<T: FormatSql>(&mut self, items: &[T]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            item.write_sql(self);
        }
    }
}

/// Trait for types that can be formatted as SQL.
pub trait FormatSql {
    /// Append this value's SQL to `w`.
    fn write_sql(&self, w: &mut SqlWriter<'_>);

    /// Format this value as a SQL string.
    ///
    /// With [`KeywordCase::Preserve`] a standalone fragment is upper-cased.
    fn format_sql(&self, options: &FormatOptions) -> String {
        let mut w = SqlWriter::new(options, LetterCase::Upper);
        self.write_sql(&mut w);
        w.finish()
    }
}

impl FormatSql for Ident {
    fn write_sql(&self, w: &mut SqlWriter<'_>) {
        w.ident(self);
    }
}

impl FormatSql for Expr {
    fn write_sql(&self, w: &mut SqlWriter<'_>) {
        w.display(self);
    }
}

impl FormatSql for Assignment {
    fn write_sql(&self, w: &mut SqlWriter<'_>) {
        for part in &self.qualifier {
            w.ident(part);
            w.raw(".");
        }
        w.ident(&self.column);
        w.raw(" = ");
        w.display(&self.value);
    }
}

/// A parenthesized row of values.
struct Row<'a>(&'a [Expr]);

impl FormatSql for Row<'_> {
    fn write_sql(&self, w: &mut SqlWriter<'_>) {
        w.raw("(");
        w.comma_separated(self.0);
        w.raw(")");
    }
}

impl FormatSql for InsertStatement {
    fn write_sql(&self, w: &mut SqlWriter<'_>) {
        w.keyword("INSERT");
        if let Some(priority) = self.priority {
            w.raw(" ");
            w.keyword(match priority {
                Priority::Low => "LOW_PRIORITY",
                Priority::Delayed => "DELAYED",
                Priority::High => "HIGH_PRIORITY",
            });
        }
        if self.ignore {
            w.raw(" ");
            w.keyword("IGNORE");
        }
        w.raw(" ");
        w.keyword("INTO");
        w.raw(" ");
        w.object_name(&self.table);

        match &self.payload {
            InsertPayload::Set(assignments) => {
                w.raw(" ");
                w.keyword("SET");
                w.raw(" ");
                w.comma_separated(assignments);
            }
            InsertPayload::Values { columns, rows } => {
                if !columns.is_empty() {
                    w.raw(" (");
                    w.comma_separated(columns);
                    w.raw(")");
                }
                w.raw(" ");
                w.keyword("VALUES");
                w.raw(" ");
                let rows: Vec<Row<'_>> = rows.iter().map(|row| Row(row.as_slice())).collect();
                w.comma_separated(&rows);
            }
        }

        if !self.on_duplicate_update.is_empty() {
            w.raw(" ");
            w.keyword("ON DUPLICATE KEY UPDATE");
            w.raw(" ");
            w.comma_separated(&self.on_duplicate_update);
        }
    }

    fn format_sql(&self, options: &FormatOptions) -> String {
        let mut w = SqlWriter::new(options, self.keyword_case);
        self.write_sql(&mut w);
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use sqlparser::ast::{BinaryOperator, Value, ValueWithSpan};
    use sqlparser::tokenizer::Span;

    use super::*;
    use crate::sql::ast::object_name;

    fn upper() -> FormatOptions {
        FormatOptions {
            keyword_case: KeywordCase::Upper,
            quote_identifiers: false,
        }
    }

    fn value(value: Value) -> Expr {
        Expr::Value(ValueWithSpan {
            value,
            span: Span::empty(),
        })
    }

    fn number(n: &str) -> Expr {
        value(Value::Number(n.into(), false))
    }

    fn text(s: &str) -> Expr {
        value(Value::SingleQuotedString(s.into()))
    }

    #[test]
    fn test_format_identifiers() {
        let opts = upper();
        assert_eq!(Ident::new("users").format_sql(&opts), "users");
        assert_eq!(
            Ident::with_quote('`', "my`table").format_sql(&opts),
            "`my``table`"
        );

        let quoting = FormatOptions {
            quote_identifiers: true,
            ..opts
        };
        assert_eq!(Ident::new("users").format_sql(&quoting), "`users`");
    }

    #[test]
    fn test_format_set_form() {
        let ins = InsertStatement::new(
            object_name("users"),
            InsertPayload::Set(vec![
                Assignment::new(Ident::new("id"), number("1")),
                Assignment::new(Ident::new("name"), text("hoge")),
            ]),
        );
        assert_eq!(
            ins.format_sql(&upper()),
            "INSERT INTO users SET id = 1, name = 'hoge'"
        );
    }

    #[test]
    fn test_format_values_form_multi_row() {
        let ins = InsertStatement::new(
            object_name("users"),
            InsertPayload::Values {
                columns: vec![Ident::new("id"), Ident::new("name")],
                rows: vec![
                    vec![number("1"), text("hoge")],
                    vec![number("2"), text("fuga")],
                ],
            },
        );
        assert_eq!(
            ins.format_sql(&upper()),
            "INSERT INTO users (id, name) VALUES (1, 'hoge'), (2, 'fuga')"
        );
    }

    #[test]
    fn test_format_modifiers_and_on_duplicate() {
        let mut ins = InsertStatement::new(
            object_name("t"),
            InsertPayload::Values {
                columns: vec![],
                rows: vec![vec![number("1")]],
            },
        );
        ins.priority = Some(Priority::Delayed);
        ins.ignore = true;
        ins.on_duplicate_update = vec![Assignment::new(
            Ident::new("a"),
            Expr::BinaryOp {
                left: Box::new(Expr::Identifier(Ident::new("a"))),
                op: BinaryOperator::Plus,
                right: Box::new(number("1")),
            },
        )];
        assert_eq!(
            ins.format_sql(&upper()),
            "INSERT DELAYED IGNORE INTO t VALUES (1) ON DUPLICATE KEY UPDATE a = a + 1"
        );
    }

    #[test]
    fn test_keyword_case_preserve_follows_statement() {
        let mut ins = InsertStatement::new(
            object_name("t"),
            InsertPayload::Set(vec![Assignment::new(Ident::new("a"), number("1"))]),
        );
        ins.keyword_case = LetterCase::Lower;

        assert_eq!(
            ins.format_sql(&FormatOptions::default()),
            "insert into t set a = 1"
        );
        assert_eq!(ins.format_sql(&upper()), "INSERT INTO t SET a = 1");
    }

    #[test]
    fn test_quote_identifiers_skips_values() {
        let ins = InsertStatement::new(
            object_name("t"),
            InsertPayload::Set(vec![Assignment::new(
                Ident::new("a"),
                Expr::Identifier(Ident::new("b")),
            )]),
        );
        let quoting = FormatOptions {
            quote_identifiers: true,
            ..upper()
        };
        assert_eq!(ins.format_sql(&quoting), "INSERT INTO `t` SET `a` = b");
    }

    #[test]
    fn test_format_qualified_assignment() {
        let assignment = Assignment {
            qualifier: vec![Ident::new("u")],
            column: Ident::new("id"),
            value: value(Value::Placeholder("?".into())),
        };
        assert_eq!(assignment.format_sql(&upper()), "u.id = ?");
    }
}
