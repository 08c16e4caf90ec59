//! Text conversion fuzzer.
//!
//! Feeds arbitrary text through segmentation and both conversion directions
//! and verifies that:
//! 1. Segmentation is a lossless partition of the input
//! 2. Normalization is idempotent on every statement fragment
//! 3. Conversion never panics, and with the skip policy never fails

use honggfuzz::fuzz;
use sql_insert_form::{
    ConvertOptions, Converter, Direction, FailurePolicy, Fragment, normalize, segment,
};

fn main() {
    let converter = Converter::mysql().with_options(ConvertOptions {
        failure_policy: FailurePolicy::Skip,
    });

    loop {
        fuzz!(|data: String| {
            let fragments = segment(&data);
            let joined: String = fragments.iter().map(Fragment::as_str).collect();
            assert_eq!(joined, data, "Segmentation must reproduce the input");

            for fragment in fragments.iter().filter(|f| f.is_statement()) {
                let once = normalize(fragment.as_str());
                assert_eq!(normalize(&once), once, "Normalization must be idempotent");
            }

            for direction in [Direction::ToSet, Direction::ToValues] {
                converter
                    .convert(&data, direction)
                    .expect("Skip policy never fails");
                let _ = Converter::mysql().convert(&data, direction);
            }
        });
    }
}
