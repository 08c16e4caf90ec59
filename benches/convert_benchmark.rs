//! Benchmark measuring the time to convert SQL dumps between `INSERT` forms.
//!
//! Each scenario builds a dump of N statements interleaved with comments and
//! non-`INSERT` statements, then converts it:
//! - **`to_set`**: multi-column `VALUES` statements to the `SET` form
//! - **`to_values`**: `SET` statements to the `VALUES` form
//! - **`segment`**: statement detection alone, without parsing
//!
//! Dump sizes: 10, 100, 1000 statements.

use std::fmt::Write;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sql_insert_form::{Converter, Direction, segment};

const SIZES: [usize; 3] = [10, 100, 1000];

// ---------------------------------------------------------------------------
// Dump generation
// ---------------------------------------------------------------------------

fn values_dump(statements: usize) -> String {
    let mut dump = String::from("-- generated dump\nSET NAMES utf8mb4;\n\n");
    for i in 0..statements {
        writeln!(
            dump,
            "INSERT INTO users (id, username, email, created_at, is_active) \
             VALUES ({i}, 'user_{i}', 'user_{i}@example.com', {}, {});",
            1_700_000_000 + i,
            i % 2
        )
        .unwrap();
        if i % 10 == 9 {
            writeln!(dump, "UPDATE stats SET seen = seen + 1 WHERE id = {i};").unwrap();
        }
    }
    dump
}

fn set_dump(statements: usize) -> String {
    Converter::mysql()
        .convert(&values_dump(statements), Direction::ToSet)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_convert(c: &mut Criterion) {
    let converter = Converter::mysql();

    let mut group = c.benchmark_group("to_set");
    for size in SIZES {
        let dump = values_dump(size);
        group.throughput(Throughput::Bytes(dump.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dump, |b, dump| {
            b.iter(|| converter.convert(black_box(dump), Direction::ToSet).unwrap());
        });
    }
    group.finish();

    let mut group = c.benchmark_group("to_values");
    for size in SIZES {
        let dump = set_dump(size);
        group.throughput(Throughput::Bytes(dump.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dump, |b, dump| {
            b.iter(|| converter.convert(black_box(dump), Direction::ToValues).unwrap());
        });
    }
    group.finish();
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    for size in SIZES {
        let dump = values_dump(size);
        group.throughput(Throughput::Bytes(dump.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dump, |b, dump| {
            b.iter(|| segment(black_box(dump)).len());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert, bench_segment);
criterion_main!(benches);
