//! Edge bounce benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- solver

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rein_bounce::{apply_impulse, Behavior, ContactFrame, Edge, EventLog, RigidBody};
use rein_bounce_bench::*;

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver/apply_impulse");
    let contact = ContactFrame::for_edge(Edge::Right, 2.0);
    let body = RigidBody::new_disc(1.0, 2.0)
        .with_velocity(Vec2::new(5.0, 3.0))
        .with_angular_velocity(1.0);

    group.bench_function("frictionless", |b| {
        b.iter_batched(
            || body.clone(),
            |mut rb| apply_impulse(&mut rb, &contact, 1.0, 0.0),
            criterion::BatchSize::SmallInput,
        );
    });
    group.bench_function("friction", |b| {
        b.iter_batched(
            || body.clone(),
            |mut rb| apply_impulse(&mut rb, &contact, 0.8, 0.6),
            criterion::BatchSize::SmallInput,
        );
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Edge bounce
// ---------------------------------------------------------------------------

fn bench_edge_bounce(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("edge_bounce/spread");
        for &n in &[100, 1000, 10000] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || {
                        let mut world = hecs::World::new();
                        spawn_discs(&mut world, n, 7);
                        (world, edge_bounce())
                    },
                    |(mut world, mut behavior)| behavior.step(&mut world, 1.0 / 60.0, &mut ()),
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("edge_bounce/corner");
        for &n in &[100, 1000] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || {
                        let mut world = hecs::World::new();
                        spawn_corner_discs(&mut world, n);
                        (world, edge_bounce(), EventLog::new())
                    },
                    |(mut world, mut behavior, mut log)| {
                        behavior.step(&mut world, 1.0 / 60.0, &mut log);
                        log
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/sustained_60steps");
    group.sample_size(20);
    for &n in &[100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || setup_scene(n).expect("scene setup"),
                |mut world| {
                    for _ in 0..60 {
                        world.step(1.0 / 60.0);
                    }
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solver, bench_edge_bounce, bench_pipeline);
criterion_main!(benches);
