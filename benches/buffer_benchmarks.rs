//! Benchmarks for line buffer operations.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vellum_buffer::LineBuffer;

/// Generates document text for benchmarking.
fn generate_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("Line {}: sample content for buffer benchmarks.\n", i))
        .collect()
}

/// Benchmarks buffer construction from text.
fn bench_buffer_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_creation");

    for size in [100, 1000, 10000].iter() {
        let text = generate_text(*size);

        group.bench_with_input(BenchmarkId::new("from_str", size), &text, |b, text| {
            b.iter(|| {
                let buffer = LineBuffer::from_str(black_box(text));
                black_box(buffer)
            })
        });
    }

    group.finish();
}

/// Benchmarks single-character edits, the hot path of the input loop.
fn bench_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("edits");

    let base = generate_text(1000);

    group.bench_function("insert_char_mid_line", |b| {
        b.iter_with_setup(
            || LineBuffer::from_str(&base),
            |mut buffer| {
                buffer.insert_char(500, 10, black_box('x')).unwrap();
                black_box(buffer)
            },
        )
    });

    group.bench_function("split_then_join", |b| {
        b.iter_with_setup(
            || LineBuffer::from_str(&base),
            |mut buffer| {
                buffer.split_line(500, 10).unwrap();
                buffer.join_with_previous(501).unwrap();
                black_box(buffer)
            },
        )
    });

    group.finish();
}

/// Benchmarks extracting the visible window handed to the lexer each frame.
fn bench_window_text(c: &mut Criterion) {
    let buffer = LineBuffer::from_str(&generate_text(10000));

    c.bench_function("window_text_50_rows", |b| {
        b.iter(|| black_box(buffer.window_text(black_box(5000), 50)))
    });
}

criterion_group!(
    benches,
    bench_buffer_creation,
    bench_edits,
    bench_window_text
);
criterion_main!(benches);
