//! Performance benchmarks for the state store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use statestash::{codec, FormMode, StateService, StateServiceConfig, UiState};

fn sample_state(i: u32) -> UiState {
    UiState::default()
        .with_form(FormMode::Edit)
        .with_filter("status", "active")
        .with_filter("genre", "fantasy")
        .with_page(i + 2, 20)
        .with_selected(i64::from(i))
}

/// Benchmark key derivation alone
fn bench_key_derivation(c: &mut Criterion) {
    let state = sample_state(0);
    c.bench_function("codec_key", |b| {
        b.iter(|| black_box(codec::key(black_box(&state))));
    });
}

/// Benchmark store and retrieve with varying table sizes.
///
/// Each operation sweeps the table, so cost grows with the live entry count.
fn bench_table_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_size");

    for size in [10u32, 100, 1_000, 10_000] {
        let service = StateService::new(StateServiceConfig::default());
        for i in 0..size {
            service.store(&sample_state(i), None);
        }
        let probe = sample_state(size / 2);
        let key = service.store(&probe, None);

        group.bench_with_input(BenchmarkId::new("store", size), &size, |b, _| {
            b.iter(|| black_box(service.store(&probe, None)));
        });

        group.bench_with_input(BenchmarkId::new("retrieve", size), &size, |b, _| {
            b.iter(|| black_box(service.retrieve(&key)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_key_derivation, bench_table_size);

criterion_main!(benches);
