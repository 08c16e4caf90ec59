//! MySQL `INSERT` statement trees, built on sqlparser.
//!
//! Parsing goes through sqlparser's [`MySqlDialect`](sqlparser::dialect::MySqlDialect)
//! and the result is narrowed to what can be flipped between the two forms:
//! - `INSERT [LOW_PRIORITY | DELAYED | HIGH_PRIORITY] [IGNORE] INTO`
//! - an optional column list followed by one or more `VALUES` rows
//! - a `SET` assignment list
//! - `ON DUPLICATE KEY UPDATE`

mod ast;
mod format;
mod parse;

pub use ast::{
    Assignment, InsertPayload, InsertStatement, LetterCase, Priority, base_name, object_name,
};
pub use format::{FormatOptions, FormatSql, KeywordCase, SqlWriter};
pub use parse::{ParseError, RECURSION_LIMIT, parse_inserts};
pub use sqlparser::ast::{Expr, Ident, ObjectName};
