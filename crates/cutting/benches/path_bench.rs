//! Benchmarks for cutting path optimization.
//!
//! Measures nearest-neighbor construction and 2-opt improvement at various
//! point counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cutquote_core::{Drawing, Entity};
use cutquote_cutting::{optimize_path, CuttingConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn scattered_circles(n: usize) -> Drawing {
    let mut rng = StdRng::seed_from_u64(12345);
    Drawing::from_entities(
        (0..n)
            .map(|_| Entity::circle((rng.gen_range(0.0..2000.0), rng.gen_range(0.0..1000.0)), 5.0))
            .collect(),
    )
}

fn bench_optimize_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize_path");
    group.sample_size(10);

    for &n in &[50, 200, 800] {
        let drawing = scattered_circles(n);
        let config = CuttingConfig::default();

        group.bench_with_input(BenchmarkId::new("circles", n), &(drawing, config), |b, (d, cfg)| {
            b.iter(|| black_box(optimize_path(black_box(d), cfg)))
        });
    }
    group.finish();
}

fn bench_nearest_neighbor_only(c: &mut Criterion) {
    let drawing = scattered_circles(2000);
    let config = CuttingConfig::new().with_max_2opt_iterations(0);
    c.bench_function("nearest_neighbor_2000", |b| {
        b.iter(|| black_box(optimize_path(black_box(&drawing), &config)))
    });
}

criterion_group!(benches, bench_optimize_path, bench_nearest_neighbor_only);
criterion_main!(benches);
