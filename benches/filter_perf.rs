//! Criterion benchmarks for the filter and classification paths.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use skillmatrix::core::catalog::Catalog;
use skillmatrix::core::proficiency::ProficiencyScale;
use skillmatrix::search::{CategorySelector, FilterState, MatrixView, filter_catalog};
use skillmatrix::test_utils::fixtures::catalog_with_proficiencies;

fn synthetic_catalog(size: usize) -> Catalog {
    #[allow(clippy::cast_possible_truncation)]
    let values: Vec<u8> = (0..size).map(|i| (i % 101) as u8).collect();
    catalog_with_proficiencies(&values)
}

fn filter_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_catalog");

    let builtin = Catalog::builtin().expect("builtin catalog parses");
    let all = CategorySelector::All;
    group.bench_function("builtin_term", |b| {
        b.iter(|| filter_catalog(builtin.categories(), black_box(Some("sec")), &all, false));
    });

    let tagged = CategorySelector::Tag("compliance".to_string());
    group.bench_function("builtin_tag", |b| {
        b.iter(|| filter_catalog(builtin.categories(), None, black_box(&tagged), false));
    });

    for size in [100, 1_000, 10_000] {
        let catalog = synthetic_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("synthetic", size), &catalog, |b, catalog| {
            b.iter(|| filter_catalog(catalog.categories(), black_box(Some("skill 9")), &all, true));
        });
    }

    group.finish();
}

fn view_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_view");

    let builtin = Catalog::builtin().expect("builtin catalog parses");
    let state = FilterState::new();
    group.bench_function("builtin_unfiltered", |b| {
        b.iter(|| MatrixView::build(black_box(&builtin), &state));
    });

    let catalog = synthetic_catalog(1_000);
    let state = FilterState::new().with_search("skill 1");
    group.bench_function("synthetic_1000", |b| {
        b.iter(|| MatrixView::build(black_box(&catalog), &state));
    });

    group.finish();
}

fn classify_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let scale = ProficiencyScale::default();
    let inputs: Vec<i32> = (-20..=120).collect();
    group.throughput(Throughput::Elements(inputs.len() as u64));
    group.bench_function("sweep", |b| {
        b.iter(|| {
            inputs
                .iter()
                .map(|&p| scale.classify(black_box(p)).level)
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

criterion_group!(benches, filter_benchmarks, view_benchmarks, classify_benchmarks);
criterion_main!(benches);
