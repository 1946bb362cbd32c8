//! Benchmarks for the density stepper and renderer.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use epistemic_topology::{
    compute::{FieldStats, FieldStore, step_grid},
    render::{PixelBuffer, Renderer},
    schema::{SeedSet, SimulationParams},
};

fn params(size: usize) -> SimulationParams {
    SimulationParams {
        grid_size: size,
        ..SimulationParams::default()
    }
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_grid");

    for size in [50, 100, 200, 400] {
        let params = params(size);
        let store = FieldStore::new(params, SeedSet::default());
        let grid = store.grid().clone();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| step_grid(black_box(&grid), black_box(&params)));
            },
        );
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_stats");

    for size in [100, 400] {
        let mut store = FieldStore::new(params(size), SeedSet::default());
        store.run(20);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| FieldStats::from_grid(black_box(store.grid())));
            },
        );
    }

    group.finish();
}

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint");

    for size in [100, 200] {
        let store = FieldStore::new(params(size), SeedSet::default());
        let mut renderer = Renderer::new();
        let mut canvas = PixelBuffer::square(500).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| renderer.paint(black_box(store.grid()), Some(&mut canvas)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_stats, bench_paint);
criterion_main!(benches);
