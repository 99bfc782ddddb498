use interference_core::simulators::{ContagionConfig, PeerInfluenceConfig};
use interference_core::test_helpers::{FixedExperiment, SeedScaledExperiment};
use interference_core::{get_experiment, Experiment, SimulatorConfig};
use interference_experiments::{
    compare, run_experiment_trials, summarize_trial, GroundTruthEstimate, TrialOptions,
};

fn contagion() -> Box<dyn Experiment> {
    get_experiment(&SimulatorConfig::from(
        ContagionConfig::default().with_num_units(200),
    ))
    .expect("experiment")
}

#[test]
fn trials_are_reproducible_across_worker_counts() {
    let experiment = contagion();
    let serial =
        run_experiment_trials(experiment.as_ref(), None, &TrialOptions::new(6).with_workers(1))
            .expect("serial trials");
    let parallel =
        run_experiment_trials(experiment.as_ref(), None, &TrialOptions::new(6).with_workers(4))
            .expect("parallel trials");
    assert_eq!(serial, parallel);
}

#[test]
fn each_trial_matches_a_direct_run_with_its_seed() {
    let experiment = contagion();
    let trials = run_experiment_trials(experiment.as_ref(), None, &TrialOptions::new(4))
        .expect("trials");

    for (seed, summary) in trials.summaries.iter().enumerate() {
        let direct = summarize_trial(experiment.as_ref(), None, seed as u64).expect("direct");
        assert_eq!(*summary, direct);
    }
}

#[test]
fn seed_scaled_stub_keeps_ratios_but_scales_totals() {
    let base = FixedExperiment::scenario().run(None, 0).expect("scenario");
    let experiment = SeedScaledExperiment::new(base);
    let trials = run_experiment_trials(&experiment, None, &TrialOptions::new(3))
        .expect("trials");

    let treated: Vec<f64> = trials.summaries.iter().map(|s| s.treated).collect();
    assert_eq!(treated, vec![40.0, 80.0, 120.0]);
    assert_eq!(trials.mean[0], 80.0);
    for summary in &trials.summaries {
        assert!((summary.naive_ratio - 2.0 / 3.0).abs() < 1e-12);
        assert!((summary.ground_truth - 10.0).abs() < 1e-12);
    }
}

#[test]
fn contagion_ground_truth_exceeds_naive_ratio() {
    // Spillover lifts the control arm too, so comparing arms understates
    // what treating everyone does to the population total.
    let experiment = contagion();
    let trials = run_experiment_trials(experiment.as_ref(), None, &TrialOptions::new(10))
        .expect("trials");
    let mean = trials.mean_summary();
    assert!(mean.ground_truth > mean.naive_ratio);
}

#[test]
fn peer_influence_reports_isolated_effect() {
    let experiment = get_experiment(&SimulatorConfig::from(
        PeerInfluenceConfig::default().with_num_units(30),
    ))
    .expect("experiment");
    let dataset = experiment.run(Some(2), 1).expect("run");
    let comparison = compare(&dataset).expect("comparison");
    match comparison.ground_truth {
        GroundTruthEstimate::AverageIsolatedEffect { mean } => assert!(mean < 0.0),
        other => panic!("unexpected ground truth: {other:?}"),
    }
}
