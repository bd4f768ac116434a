//! Hot-path benchmarks: exact enumeration and the event-driven loop.
//!
//! Run with:
//! ```bash
//! cargo bench --bench inference
//! ```

use boltzmann_rs::energy::EnergyModel;
use boltzmann_rs::matrix::Matrix;
use boltzmann_rs::simulator::joint_occupancy;
use boltzmann_rs::spikes::SpikeRecord;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Builds a random symmetric model over `n` units with small couplings.
fn random_model(n: usize, rng: &mut ChaCha8Rng) -> EnergyModel {
    let mut weights = Matrix::zeros(n, n);
    for i in 0..n {
        for j in (i + 1)..n {
            let w = rng.gen_range(-0.5..0.5);
            weights[(i, j)] = w;
            weights[(j, i)] = w;
        }
    }
    let biases = (0..n).map(|_| rng.gen_range(-0.5..0.5)).collect();
    EnergyModel::new(weights, biases).unwrap()
}

/// Builds a sorted random spike record over `num_units` units.
fn random_record(num_units: usize, num_spikes: usize, duration: f64, rng: &mut ChaCha8Rng) -> SpikeRecord {
    let mut times: Vec<f64> = (0..num_spikes).map(|_| rng.gen_range(0.0..duration)).collect();
    times.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let ids = (0..num_spikes).map(|_| rng.gen_range(0..num_units)).collect();
    SpikeRecord::new(ids, times).unwrap()
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    for n in [8usize, 12, 16] {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let model = random_model(n, &mut rng);
        group.throughput(Throughput::Elements(1u64 << n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &model, |b, model| {
            b.iter(|| model.partition());
        });
    }
    group.finish();
}

fn bench_joint(c: &mut Criterion) {
    let mut group = c.benchmark_group("joint");
    for n in [8usize, 12] {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let model = random_model(n, &mut rng);
        group.throughput(Throughput::Elements(1u64 << n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &model, |b, model| {
            b.iter(|| model.joint());
        });
    }
    group.finish();
}

fn bench_joint_occupancy(c: &mut Criterion) {
    let mut group = c.benchmark_group("joint_occupancy");
    for num_spikes in [1_000usize, 10_000] {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let duration = 1_000.0;
        let record = random_record(8, num_spikes, duration, &mut rng);
        let selected: Vec<usize> = (0..8).collect();
        let taus = vec![0.1; 8];
        group.throughput(Throughput::Elements(num_spikes as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_spikes),
            &record,
            |b, record| {
                b.iter(|| joint_occupancy(record, &selected, &taus, duration).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_partition, bench_joint, bench_joint_occupancy);
criterion_main!(benches);
