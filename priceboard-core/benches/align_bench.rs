//! Criterion benchmarks for the view hot paths.
//!
//! Benchmarks:
//! 1. Chart alignment (per-day averaging onto the union axis)
//! 2. Row alignment (exact-timestamp spreadsheet merge)
//! 3. Pooled statistics

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::NaiveDate;
use priceboard_core::domain::{Selection, SourceCollection};
use priceboard_core::sample::{generate, SampleSpec};
use priceboard_core::{align_chart, align_rows, StatsSummary};

fn make_inputs(sources: usize, days: u32) -> (Selection, SourceCollection) {
    let spec = SampleSpec {
        sources,
        days,
        start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        seed: 42,
    };
    let generated = generate(&spec);
    let selection = Selection::new(generated.iter().map(|(name, _)| name.clone()).collect());
    let collection = generated.into_iter().collect();
    (selection, collection)
}

fn bench_align_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_chart");
    for (sources, days) in [(2usize, 90u32), (6, 365)] {
        let (selection, collection) = make_inputs(sources, days);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{sources}x{days}d")),
            &(selection, collection),
            |b, (selection, collection)| {
                b.iter(|| {
                    black_box(align_chart(
                        selection,
                        collection,
                        selection.reference_source(),
                    ))
                })
            },
        );
    }
    group.finish();
}

fn bench_align_rows(c: &mut Criterion) {
    let (selection, collection) = make_inputs(6, 365);
    c.bench_function("align_rows/6x365d", |b| {
        b.iter(|| black_box(align_rows(&selection, &collection)))
    });
}

fn bench_stats(c: &mut Criterion) {
    let (selection, collection) = make_inputs(6, 365);
    c.bench_function("stats/6x365d", |b| {
        b.iter(|| black_box(StatsSummary::compute(&selection, &collection)))
    });
}

criterion_group!(benches, bench_align_chart, bench_align_rows, bench_stats);
criterion_main!(benches);
