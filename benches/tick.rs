//! Benchmarks for the hot tick path.
//!
//! Run with: `cargo bench`

use axon::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn engine_with(node_count: usize) -> Engine<NullRenderer> {
    let mut engine = Simulation::new()
        .with_node_count(node_count)
        .with_seed(42)
        .mount(NullRenderer::new(), 1920.0, 1080.0)
        .expect("headless mount");
    engine.set_fixed_delta(Some(1.0 / 60.0));
    engine
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for &count in &[45usize, 100, 250] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut engine = engine_with(count);
            // Warm up the quality window so the steady state is measured.
            for _ in 0..30 {
                engine.tick();
            }
            b.iter(|| {
                engine.tick();
                black_box(engine.frame().edges().len())
            });
        });
    }

    group.finish();
}

fn bench_tick_with_interaction(c: &mut Criterion) {
    c.bench_function("tick_with_pointer", |b| {
        let mut engine = engine_with(100);
        engine.set_pointer(Vec2::new(0.0, 0.0));
        for _ in 0..30 {
            engine.tick();
        }
        b.iter(|| {
            engine.tick();
            black_box(engine.quality_level())
        });
    });
}

criterion_group!(benches, bench_tick, bench_tick_with_interaction);
criterion_main!(benches);
