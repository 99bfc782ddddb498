//! Console formatting of estimates and trial batches.

use std::fmt;

use crate::estimators::{Aggregation, EffectComparison, GroundTruthEstimate, NaiveEstimate};
use crate::runner::ExperimentTrials;

impl fmt::Display for NaiveEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.aggregation {
            Aggregation::Sum => "total",
            Aggregation::Mean => "mean",
        };
        writeln!(f, "Treatment-weighted {label}: {:.3}", self.treated)?;
        writeln!(f, "Control-weighted {label}: {:.3}", self.control)?;
        write!(f, "Naive relative effect: {:.3}", self.ratio)
    }
}

impl fmt::Display for GroundTruthEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GroundTruthEstimate::PopulationRatio {
                treated_total,
                control_total,
                ratio,
            } => {
                writeln!(f, "All-treated total: {treated_total:.3}")?;
                writeln!(f, "All-control total: {control_total:.3}")?;
                write!(f, "True relative effect: {ratio:.3}")
            }
            GroundTruthEstimate::AverageIsolatedEffect { mean } => {
                write!(f, "Average isolated effect: {mean:.4}")
            }
        }
    }
}

impl fmt::Display for EffectComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Naive estimate ===")?;
        writeln!(f, "{}", self.naive)?;
        writeln!(f, "=== Ground truth ===")?;
        write!(f, "{}", self.ground_truth)
    }
}

impl fmt::Display for ExperimentTrials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mean = self.mean_summary();
        writeln!(
            f,
            "=== {} over {} trials ===",
            self.experiment,
            self.summaries.len()
        )?;
        if let Some(samples) = self.num_samples {
            writeln!(f, "Ground-truth samples per trial: {samples}")?;
        }
        writeln!(f, "Mean treatment-weighted outcome: {:.3}", mean.treated)?;
        writeln!(f, "Mean control-weighted outcome: {:.3}", mean.control)?;
        writeln!(f, "Mean naive relative effect: {:.3}", mean.naive_ratio)?;
        write!(f, "Mean ground-truth effect: {:.4}", mean.ground_truth)
    }
}
