//! Tests for the host boundary with custom documents and codecs.

use std::ops::Range;

use pretty_assertions::assert_eq;
use sql_insert_form::host::{self, Document};
use sql_insert_form::{
    Converter, Direction, Error, InsertStatement, MySqlCodec, ParseError, SqlCodec,
};

/// A document that records every edit it receives.
#[derive(Default)]
struct RecordingDocument {
    text: String,
    selection: Option<Range<usize>>,
    edits: Vec<(Range<usize>, String)>,
}

impl Document for RecordingDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.edits.push((range.clone(), text.to_owned()));
        self.text.replace_range(range, text);
    }
}

/// Wraps the MySQL codec and rejects tables it does not know.
struct AllowListCodec {
    inner: MySqlCodec,
    tables: &'static [&'static str],
}

impl SqlCodec for AllowListCodec {
    fn parse(&self, sql: &str) -> Result<Vec<InsertStatement>, ParseError> {
        let statements = self.inner.parse(sql)?;
        if let Some(unknown) = statements
            .iter()
            .find(|stmt| !self.tables.contains(&stmt.table_name()))
        {
            return Err(ParseError::Codec(format!(
                "unknown table `{}`",
                unknown.table_name()
            )));
        }
        Ok(statements)
    }

    fn format(&self, statement: &InsertStatement) -> String {
        self.inner.format(statement)
    }
}

// =============================================================================
// Document edits
// =============================================================================

#[test]
fn test_single_replace_of_whole_document() {
    let mut doc = RecordingDocument {
        text: "-- a\ninsert into t set a = 1;\n-- b\ninsert into t set b = 2;\n".into(),
        ..Default::default()
    };
    host::run(Some(&mut doc), &Converter::mysql(), Direction::ToValues).unwrap();

    assert_eq!(
        doc.text,
        "-- a\ninsert into t (a) values (1);\n-- b\ninsert into t (b) values (2);\n"
    );
    assert_eq!(doc.edits.len(), 1);
    assert_eq!(doc.edits[0].0, 0..60);
}

#[test]
fn test_selection_limits_the_edit() {
    let text = "insert into t set a = 1;\ninsert into t set b = 2;";
    let mut doc = RecordingDocument {
        text: text.into(),
        selection: Some(0..24),
        ..Default::default()
    };
    let range = host::run(Some(&mut doc), &Converter::mysql(), Direction::ToValues).unwrap();

    assert_eq!(doc.text, "insert into t (a) values (1);\ninsert into t set b = 2;");
    assert_eq!(range, 0..29);
    assert_eq!(doc.edits, vec![(0..24, "insert into t (a) values (1);".to_owned())]);
}

#[test]
fn test_no_edit_on_failure() {
    let mut doc = RecordingDocument {
        text: "insert into t set a = 1;\ninsert into t values (2);".into(),
        ..Default::default()
    };
    let err = host::run(Some(&mut doc), &Converter::mysql(), Direction::ToSet).unwrap_err();

    assert_eq!(err, Error::MissingColumns { table: "t".into() });
    assert!(doc.edits.is_empty());
}

#[test]
fn test_missing_document() {
    let err = host::run::<RecordingDocument, _>(None, &Converter::mysql(), Direction::ToValues)
        .unwrap_err();
    assert_eq!(err, Error::NoTarget);
}

// =============================================================================
// Custom codec
// =============================================================================

#[test]
fn test_custom_codec_errors_propagate() {
    let converter = Converter::new(AllowListCodec {
        inner: MySqlCodec::new(),
        tables: &["users"],
    });

    assert_eq!(
        converter
            .convert("insert users (id) values (1);", Direction::ToSet)
            .unwrap(),
        "insert into users set id = 1;"
    );
    assert_eq!(
        converter
            .convert("insert orders (id) values (1);", Direction::ToSet)
            .unwrap_err(),
        Error::Parse(ParseError::Codec("unknown table `orders`".into()))
    );
}

#[test]
fn test_borrowed_codec() {
    let codec = MySqlCodec::new();
    let converter = Converter::new(&codec);
    assert_eq!(
        converter
            .convert("insert into t (a) values (1);", Direction::ToSet)
            .unwrap(),
        "insert into t set a = 1;"
    );
}
