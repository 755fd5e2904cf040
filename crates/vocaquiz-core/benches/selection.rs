use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use vocaquiz_core::catalog::Catalog;
use vocaquiz_core::model::WordEntry;
use vocaquiz_core::options::generate_options;
use vocaquiz_core::selector::select_next_set;

fn make_catalog(n: usize) -> Catalog {
    Catalog::new(
        (1..=n)
            .map(|i| WordEntry::new(i.to_string(), format!("word-{i}"), format!("meaning-{i}")))
            .collect(),
    )
}

fn bench_select_next_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_next_set");
    let catalog = make_catalog(5_000);
    let mut rng = StdRng::seed_from_u64(42);

    group.bench_function("no_review", |b| {
        let incorrect = BTreeSet::new();
        b.iter(|| select_next_set(black_box(&catalog), black_box(&incorrect), 10, &mut rng))
    });

    group.bench_function("review_500", |b| {
        let incorrect: BTreeSet<String> = (1..=500).map(|i| (i * 7).to_string()).collect();
        b.iter(|| select_next_set(black_box(&catalog), black_box(&incorrect), 10, &mut rng))
    });

    group.finish();
}

fn bench_generate_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_options");
    let mut rng = StdRng::seed_from_u64(7);

    for size in [10usize, 1_000, 5_000] {
        let catalog = make_catalog(size);
        let correct = catalog.entries()[0].clone();
        group.bench_function(format!("pool={size}"), |b| {
            b.iter(|| generate_options(black_box(&correct), black_box(catalog.entries()), 4, &mut rng))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select_next_set, bench_generate_options);
criterion_main!(benches);
