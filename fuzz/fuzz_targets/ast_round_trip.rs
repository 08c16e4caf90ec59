//! Fuzz test for the form conversion round trip on parsed statement trees.
//!
//! Verifies that for any text the MySQL codec accepts:
//! 1. Formatting a tree and parsing it again reaches a fixpoint
//! 2. Converting a `SET` tree to the `VALUES` form yields one row with one value per column
//! 3. Converting back yields the same assignments with column qualifiers cleared

use honggfuzz::fuzz;
use sql_insert_form::{InsertPayload, MySqlCodec, SqlCodec};

fn main() {
    let codec = MySqlCodec::new();

    loop {
        fuzz!(|data: String| {
            let Ok(statements) = codec.parse(&data) else {
                return;
            };

            for statement in statements {
                let formatted = codec.format(&statement);
                let reparsed = codec
                    .parse(&formatted)
                    .expect("Formatted statements parse again");
                assert_eq!(reparsed.len(), 1);
                assert_eq!(codec.format(&reparsed[0]), formatted);

                let InsertPayload::Set(assignments) = &statement.payload else {
                    continue;
                };

                let values = statement.clone().into_values_form();
                let InsertPayload::Values { columns, rows } = &values.payload else {
                    panic!("SET form must become VALUES form");
                };
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].len(), columns.len());
                assert_eq!(columns.len(), assignments.len());

                let back = values
                    .into_set_form()
                    .expect("Single-row VALUES with columns converts");
                let mut expected = statement.clone();
                if let InsertPayload::Set(items) = &mut expected.payload {
                    for item in items {
                        item.qualifier.clear();
                    }
                }
                assert_eq!(back, expected, "Round trip must only clear qualifiers");
            }
        });
    }
}
