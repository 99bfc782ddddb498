//! Benchmarks for the trial driver and estimators.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use interference_core::simulators::ContagionConfig;
use interference_core::{get_experiment, SimulatorConfig};
use interference_experiments::{naive_effect, run_experiment_trials, Aggregation, TrialOptions};

fn bench_naive_effect(c: &mut Criterion) {
    let treatments: Vec<f64> = (0..100_000).map(|i| (i % 2) as f64).collect();
    let outcomes: Vec<f64> = (0..100_000).map(|i| (i % 17) as f64).collect();

    c.bench_function("naive_effect_100k", |b| {
        b.iter(|| black_box(naive_effect(&treatments, &outcomes, Aggregation::Sum)));
    });
}

fn bench_trial_workers(c: &mut Criterion) {
    let experiment = get_experiment(&SimulatorConfig::from(
        ContagionConfig::default().with_num_units(200),
    ))
    .expect("valid config");

    let mut group = c.benchmark_group("contagion_trials");
    group.sample_size(10);
    for workers in [1usize, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            let options = TrialOptions::new(16).with_workers(w);
            b.iter(|| black_box(run_experiment_trials(experiment.as_ref(), None, &options)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_naive_effect, bench_trial_workers);
criterion_main!(benches);
