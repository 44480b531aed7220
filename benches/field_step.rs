//! Benchmarks for the per-frame particle update.
//!
//! Run with: `cargo bench --bench field_step`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;

use treebites::clock::FrameTime;
use treebites::field::{FieldConfig, ParticleField, MAX_PARTICLES};
use treebites::input::PointerState;
use treebites::rules::separation_nudge;

const DT: f32 = 1.0 / 60.0;

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_update");

    for count in [9, 20, MAX_PARTICLES] {
        group.bench_with_input(BenchmarkId::new("idle", count), &count, |b, &count| {
            let config = FieldConfig {
                count,
                ..Default::default()
            };
            let mut field = ParticleField::new(config, 3, 42);
            let pointer = PointerState::new();
            let mut frame = FrameTime::default();
            b.iter(|| {
                frame = frame.advance(DT);
                field.update(black_box(&pointer), frame);
            })
        });

        group.bench_with_input(BenchmarkId::new("dragging", count), &count, |b, &count| {
            let config = FieldConfig {
                count,
                ..Default::default()
            };
            let mut field = ParticleField::new(config, 3, 42);
            let mut pointer = PointerState::new();
            pointer.press(Vec2::new(-0.2, 0.0));
            pointer.move_to(Vec2::new(0.1, 0.05));
            let mut frame = FrameTime::default();
            b.iter(|| {
                frame = frame.advance(DT);
                field.update(black_box(&pointer), frame);
            })
        });
    }

    group.finish();
}

fn bench_render_items(c: &mut Criterion) {
    let config = FieldConfig {
        count: MAX_PARTICLES,
        ..Default::default()
    };
    let field = ParticleField::new(config, 3, 42);
    c.bench_function("render_items_30", |b| b.iter(|| black_box(field.render_items())));
}

fn bench_separation(c: &mut Criterion) {
    let snapshot: Vec<Vec2> = (0..MAX_PARTICLES)
        .map(|i| Vec2::new((i % 6) as f32 * 0.5, (i / 6) as f32 * 0.5))
        .collect();
    c.bench_function("separation_nudge_all_30", |b| {
        b.iter(|| {
            let mut total = Vec2::ZERO;
            for i in 0..snapshot.len() {
                total += separation_nudge(i, black_box(&snapshot), 0.9, 0.5);
            }
            total
        })
    });
}

criterion_group!(benches, bench_update, bench_render_items, bench_separation);
criterion_main!(benches);
