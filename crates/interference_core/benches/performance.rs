//! Performance benchmarks for interference_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use interference_core::simulators::{
    ContagionConfig, ContagionExperiment, PeerInfluenceConfig, PeerInfluenceExperiment,
};
use interference_core::Experiment;

fn bench_contagion_run(c: &mut Criterion) {
    let sizes = vec![("small", 100), ("medium", 500), ("large", 2000)];

    let mut group = c.benchmark_group("contagion_run");
    for (name, units) in sizes {
        let experiment =
            ContagionExperiment::new(ContagionConfig::default().with_num_units(units))
                .expect("valid config");
        group.bench_with_input(BenchmarkId::from_parameter(name), &experiment, |b, exp| {
            b.iter(|| black_box(exp.run(None, 42)));
        });
    }
    group.finish();
}

fn bench_peer_influence_samples(c: &mut Criterion) {
    let experiment = PeerInfluenceExperiment::new(PeerInfluenceConfig::default().with_num_units(50))
        .expect("valid config");

    let mut group = c.benchmark_group("peer_influence_num_samples");
    for samples in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(samples), &samples, |b, &n| {
            b.iter(|| black_box(experiment.run(Some(n), 42)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_contagion_run, bench_peer_influence_samples);
criterion_main!(benches);
