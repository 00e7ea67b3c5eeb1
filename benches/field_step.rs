//! Benchmarks for the per-tick field work.
//!
//! The connection pass is O(n²) over the field, so this tracks how the
//! per-frame cost scales with surface size at the classic density.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plexus::prelude::*;

fn bench_step(c: &mut Criterion) {
    for (width, height) in [(800.0, 600.0), (1920.0, 1080.0)] {
        let bounds = Bounds::new(width, height);
        let pointer = PointerState::new(bounds);
        let mut field = ParticleField::seeded(FieldConfig::classic(), 42);
        field.populate(bounds);

        c.bench_function(&format!("step_{}x{}", width, height), |b| {
            b.iter(|| {
                field.step(black_box(bounds), black_box(&pointer));
            })
        });
    }
}

fn bench_connect(c: &mut Criterion) {
    for (width, height) in [(800.0, 600.0), (1920.0, 1080.0)] {
        let bounds = Bounds::new(width, height);
        let mut field = ParticleField::seeded(FieldConfig::classic(), 42);
        field.populate(bounds);

        c.bench_function(&format!("connect_{}x{}", width, height), |b| {
            b.iter(|| black_box(field.connections()))
        });
    }
}

criterion_group!(benches, bench_step, bench_connect);
criterion_main!(benches);
