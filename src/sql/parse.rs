//! Reading `INSERT` statements out of sqlparser's MySQL syntax tree.

use sqlparser::ast::{
    self, AssignmentTarget, ObjectNamePart, OnInsert, SetExpr, Statement, TableObject,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::{Parser, ParserError};
use sqlparser::tokenizer::{Token, Tokenizer, Whitespace};

use super::ast::{Assignment, InsertPayload, InsertStatement, LetterCase, Priority};

/// Expression nesting depth at which parsing gives up.
pub const RECURSION_LIMIT: usize = 50;

/// Errors raised while turning statement text into trees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text is not valid MySQL.
    #[error("{0}")]
    Syntax(String),
    /// Expressions nest deeper than [`RECURSION_LIMIT`].
    #[error("Statement nests deeper than {limit} levels")]
    TooDeep {
        /// The nesting limit that was hit.
        limit: usize,
    },
    /// Valid MySQL that has no `SET`/`VALUES` counterpart.
    #[error("Unsupported {construct}")]
    Unsupported {
        /// Name of the construct.
        construct: &'static str,
    },
    /// Failure reported by a third-party codec.
    #[error("{0}")]
    Codec(String),
}

impl From<ParserError> for ParseError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::RecursionLimitExceeded => ParseError::TooDeep {
                limit: RECURSION_LIMIT,
            },
            other => ParseError::Syntax(other.to_string()),
        }
    }
}

fn unsupported(construct: &'static str) -> ParseError {
    ParseError::Unsupported { construct }
}

/// Whether `token` is a `/*! ... */` comment, whose body MySQL executes.
fn is_executable_comment(token: &Token) -> bool {
    matches!(token, Token::Whitespace(Whitespace::MultiLineComment(body)) if body.starts_with('!'))
}

/// Parse every statement of `sql` as a MySQL `INSERT`, in source order.
///
/// String literals keep their raw body, so escapes are written back exactly
/// as they appeared.
///
/// # Errors
///
/// * [`ParseError::Syntax`] if `sql` is not valid MySQL.
/// * [`ParseError::TooDeep`] if an expression nests past [`RECURSION_LIMIT`].
/// * [`ParseError::Unsupported`] for statements other than `INSERT`,
///   `INSERT ... SELECT`, executable comments, and other clauses that have
///   no `SET`/`VALUES` counterpart.
pub fn parse_inserts(sql: &str) -> Result<Vec<InsertStatement>, ParseError> {
    let dialect = MySqlDialect {};
    let tokens = Tokenizer::new(&dialect, sql)
        .with_unescape(false)
        .tokenize_with_location()
        .map_err(|err| ParseError::Syntax(err.to_string()))?;
    if tokens.iter().any(|token| is_executable_comment(&token.token)) {
        return Err(unsupported("MySQL executable comment"));
    }

    Parser::new(&dialect)
        .with_recursion_limit(RECURSION_LIMIT)
        .with_tokens_with_locations(tokens)
        .parse_statements()?
        .into_iter()
        .map(InsertStatement::try_from)
        .collect()
}

impl TryFrom<Statement> for InsertStatement {
    type Error = ParseError;

    fn try_from(statement: Statement) -> Result<Self, Self::Error> {
        match statement {
            Statement::Insert(insert) => Self::try_from(insert),
            _ => Err(unsupported("statement other than INSERT")),
        }
    }
}

impl TryFrom<ast::Insert> for InsertStatement {
    type Error = ParseError;

    fn try_from(insert: ast::Insert) -> Result<Self, Self::Error> {
        if insert.table_alias.is_some() || insert.insert_alias.is_some() {
            return Err(unsupported("INSERT alias"));
        }
        if insert.partitioned.is_some() {
            return Err(unsupported("INSERT ... PARTITION"));
        }
        if insert.returning.is_some() {
            return Err(unsupported("INSERT ... RETURNING"));
        }

        let keyword_case = match &insert.insert_token.0.token {
            Token::Word(word) => LetterCase::of(&word.value),
            _ => LetterCase::Upper,
        };

        let table = match insert.table {
            TableObject::TableName(name) => name,
            TableObject::TableFunction(_) => return Err(unsupported("INSERT INTO FUNCTION")),
        };

        let payload = match insert.source {
            None => InsertPayload::Set(
                insert
                    .assignments
                    .into_iter()
                    .map(Assignment::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Some(query) => match *query.body {
                SetExpr::Values(values) => InsertPayload::Values {
                    columns: insert.columns,
                    rows: values.rows,
                },
                _ => return Err(unsupported("INSERT ... SELECT")),
            },
        };

        let on_duplicate_update = match insert.on {
            None => Vec::new(),
            Some(OnInsert::DuplicateKeyUpdate(assignments)) => assignments
                .into_iter()
                .map(Assignment::try_from)
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(unsupported("ON CONFLICT")),
        };

        Ok(InsertStatement {
            keyword_case,
            priority: insert.priority.map(Priority::from),
            ignore: insert.ignore,
            table,
            payload,
            on_duplicate_update,
        })
    }
}

impl TryFrom<ast::Assignment> for Assignment {
    type Error = ParseError;

    fn try_from(assignment: ast::Assignment) -> Result<Self, Self::Error> {
        let AssignmentTarget::ColumnName(name) = assignment.target else {
            return Err(unsupported("tuple assignment"));
        };

        let mut parts = name
            .0
            .into_iter()
            .map(|part| match part {
                ObjectNamePart::Identifier(ident) => Ok(ident),
                ObjectNamePart::Function(_) => Err(unsupported("function in column name")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let column = parts
            .pop()
            .ok_or_else(|| unsupported("empty column name"))?;

        Ok(Assignment {
            qualifier: parts,
            column,
            value: assignment.value,
        })
    }
}
