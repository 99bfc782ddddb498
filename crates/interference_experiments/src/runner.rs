//! Parallel repeated-trial execution using rayon.
//!
//! Trial `i` runs with seed `i`. Trials share no mutable state, so each one
//! runs to completion on whichever worker picks it up; results are collected
//! back in seed order and averaged per summary position.

use indicatif::{ProgressBar, ProgressStyle};
use interference_core::Experiment;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::TrialError;
use crate::metrics::{summarize_trial, MeanSummary, TrialSummary, SUMMARY_WIDTH};

/// How many trials to run and on how many workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOptions {
    pub trials: usize,
    /// Worker thread count; `None` uses rayon's default (one per core).
    pub workers: Option<usize>,
    pub show_progress: bool,
}

impl TrialOptions {
    pub fn new(trials: usize) -> Self {
        Self {
            trials,
            workers: None,
            show_progress: false,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Per-trial rows in seed order and their per-position means.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBatch<const N: usize> {
    pub rows: Vec<[f64; N]>,
    pub means: [f64; N],
}

/// Run `work(seed)` for seeds `0..trials` on a fixed-size worker pool.
///
/// The first failing trial aborts the batch; no partial results are returned
/// and nothing is retried.
pub fn run_trials<const N: usize, F, E>(
    options: &TrialOptions,
    work: F,
) -> Result<TrialBatch<N>, TrialError>
where
    F: Fn(u64) -> Result<[f64; N], E> + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    if options.trials == 0 {
        return Err(TrialError::NoTrials);
    }
    if options.workers == Some(0) {
        return Err(TrialError::NoWorkers);
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = options.workers {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    info!(
        trials = options.trials,
        workers = pool.current_num_threads(),
        "running trials"
    );

    let pb = if options.show_progress {
        Some(progress_bar(options.trials))
    } else {
        None
    };

    let pb_clone = pb.clone();
    let rows = pool.install(|| {
        (0..options.trials as u64)
            .into_par_iter()
            .map(|seed| {
                let row = work(seed).map_err(|source| TrialError::Trial {
                    seed,
                    source: Box::new(source),
                })?;
                debug!(seed, "trial complete");
                if let Some(ref progress_bar) = pb_clone {
                    progress_bar.inc(1);
                }
                Ok(row)
            })
            .collect::<Result<Vec<[f64; N]>, TrialError>>()
    });

    match (&rows, pb) {
        (Ok(_), Some(progress_bar)) => progress_bar.finish_with_message("Completed"),
        (Err(_), Some(progress_bar)) => progress_bar.abandon_with_message("Aborted"),
        _ => {}
    }
    let rows = rows?;

    let means = column_means(&rows);
    info!(trials = rows.len(), "trials complete");
    Ok(TrialBatch { rows, means })
}

/// Running per-position mean; identical rows average to exactly that row.
fn column_means<const N: usize>(rows: &[[f64; N]]) -> [f64; N] {
    let mut means = [0.0; N];
    for (count, row) in rows.iter().enumerate() {
        let k = (count + 1) as f64;
        for (mean, &value) in means.iter_mut().zip(row) {
            *mean += (value - *mean) / k;
        }
    }
    means
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// Summaries of repeated runs of one experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentTrials {
    pub experiment: &'static str,
    pub num_samples: Option<usize>,
    /// One summary per trial, in seed order.
    pub summaries: Vec<TrialSummary>,
    /// Per-field mean over all trials.
    pub mean: [f64; SUMMARY_WIDTH],
}

impl ExperimentTrials {
    /// Per-field means; unlike a [`TrialSummary`] it has no seed.
    pub fn mean_summary(&self) -> MeanSummary {
        MeanSummary::from(self.mean)
    }
}

/// Run `experiment` for seeds `0..options.trials` and summarize every trial.
pub fn run_experiment_trials(
    experiment: &dyn Experiment,
    num_samples: Option<usize>,
    options: &TrialOptions,
) -> Result<ExperimentTrials, TrialError> {
    let batch = run_trials(options, |seed| {
        summarize_trial(experiment, num_samples, seed).map(|summary| summary.as_array())
    })?;

    let summaries = batch
        .rows
        .iter()
        .enumerate()
        .map(|(seed, &row)| TrialSummary::from_array(seed as u64, row))
        .collect();

    Ok(ExperimentTrials {
        experiment: experiment.name(),
        num_samples,
        summaries,
        mean: batch.means,
    })
}
