#![doc = include_str!("../README.md")]
#![deny(clippy::mod_module_files)]

pub mod codec;
pub mod convert;
pub mod errors;
pub mod host;
pub mod normalize;
pub mod pipeline;
pub mod segment;
pub mod sql;

// Re-export main types
pub use codec::{MySqlCodec, SqlCodec};
pub use convert::{Direction, set_to_values, values_to_set};
pub use host::{Document, TextBuffer};
pub use normalize::normalize;
pub use pipeline::{ConvertOptions, Converter, FailurePolicy};
pub use segment::{Fragment, segment};
pub use sql::{
    Assignment, Expr, FormatOptions, FormatSql, Ident, InsertPayload, InsertStatement,
    KeywordCase, ObjectName, ParseError,
};
pub use sqlparser;

// Re-export errors
pub use errors::Error;
