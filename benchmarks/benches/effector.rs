//! Effector benchmarks (criterion - wall-clock time).
//!
//! The haptic tick budget is about 1 ms; everything on the haptic path should
//! stay orders of magnitude below that, including under a concurrent writer.
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench effector
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench effector -- force

use std::hint::black_box;
use std::sync::atomic::{AtomicBool, Ordering};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use rein_haptics::ecs::systems::haptic_proxy_system;
use rein_haptics::effector::{snapshot_channel, spring_damper_force};
use rein_haptics::ContactTransitions;
use rein_haptics_bench::*;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    let (mut writer, reader) = snapshot_channel();
    group.bench_function("read", |b| b.iter(|| black_box(reader.read())));
    group.bench_function("write", |b| {
        b.iter(|| writer.write(black_box(Vec3::X), black_box(true)))
    });

    // Reader latency while the simulation side writes as fast as it can.
    let (mut writer, reader) = snapshot_channel();
    let stop = AtomicBool::new(false);
    std::thread::scope(|s| {
        s.spawn(|| {
            let mut i = 0u32;
            while !stop.load(Ordering::Relaxed) {
                writer.write(Vec3::splat(i as f32), i % 2 == 0);
                i = i.wrapping_add(1);
            }
        });
        group.bench_function("read_contended", |b| b.iter(|| black_box(reader.read())));
        stop.store(true, Ordering::Relaxed);
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Force evaluation
// ---------------------------------------------------------------------------

fn bench_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("force");

    group.bench_function("spring_damper", |b| {
        b.iter(|| {
            spring_damper_force(
                black_box(Vec3::ZERO),
                black_box(Vec3::new(0.01, 0.0, 0.0)),
                black_box(Vec3::new(0.1, 0.0, 0.0)),
                400.0,
                1.0,
            )
        })
    });

    let effector = setup_contact_effector();
    let samples = cursor_samples(1000);
    group.bench_with_input(
        BenchmarkId::new("evaluate", samples.len()),
        &samples,
        |b, samples| {
            b.iter(|| {
                for sample in samples {
                    black_box(effector.evaluator.evaluate(sample));
                }
            })
        },
    );

    group.finish();
}

// ---------------------------------------------------------------------------
// Simulation side
// ---------------------------------------------------------------------------

fn bench_proxy_system(c: &mut Criterion) {
    let mut group = c.benchmark_group("proxy_system");
    for &n in &[0, 1, 8, 64] {
        let world = setup_proxy_world(n);
        let mut effector = setup_contact_effector();
        let mut transitions = ContactTransitions::new();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| haptic_proxy_system(&world, &mut transitions, &mut effector.updater));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_snapshot, bench_force, bench_proxy_system);
criterion_main!(benches);
