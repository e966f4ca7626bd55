/*
 * Boid Simulation Benchmark
 *
 * Measures the neighbor rebuild (the O(N^2) part of a step), the steering
 * passes and a full step, serial and on the rayon pool, across population
 * sizes up to the cap.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use flock3d::{physics, Flock, FlockConfig};

const DT: f32 = 1.0 / 60.0;
const POPULATIONS: [usize; 4] = [100, 200, 400, 600];

fn config(population: usize, parallel: bool) -> FlockConfig {
    FlockConfig {
        population,
        parallel,
        ..FlockConfig::classic()
    }
}

// A flock that has flown for a second, so neighbor lists look like a real frame
fn warmed_flock(population: usize, parallel: bool) -> Flock {
    let mut flock = Flock::new(config(population, parallel), 42).unwrap();
    for _ in 0..60 {
        flock.step(DT);
    }
    flock
}

fn bench_neighbor_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_rebuild");

    for &n in POPULATIONS.iter() {
        for parallel in [false, true] {
            let id = BenchmarkId::new(if parallel { "parallel" } else { "serial" }, n);
            group.bench_with_input(id, &n, |b, &n| {
                let flock = warmed_flock(n, parallel);
                let cfg = flock.config().clone();
                let mut boids = flock.boids().to_vec();
                b.iter(|| {
                    physics::rebuild_neighbors(black_box(&mut boids), &cfg);
                });
            });
        }
    }

    group.finish();
}

fn bench_steering(c: &mut Criterion) {
    let mut group = c.benchmark_group("steering");

    for &n in POPULATIONS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let flock = warmed_flock(n, false);
            let cfg = flock.config().clone();
            let boids = flock.boids().to_vec();
            b.iter_batched(
                || boids.clone(),
                |mut boids| {
                    physics::apply_rules(&mut boids, &cfg);
                    black_box(boids)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for &n in POPULATIONS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut flock = warmed_flock(n, false);
            b.iter(|| flock.step(black_box(DT)));
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_neighbor_rebuild, bench_steering, bench_step
}

criterion_main!(benches);
