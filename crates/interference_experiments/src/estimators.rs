//! Effect estimators over a single dataset.
//!
//! The naive estimator compares treated and control units as if each unit's
//! outcome depended on its own treatment only. The ground-truth estimator reads
//! the simulator's counterfactual outcomes. Under interference the two diverge;
//! that divergence is what these experiments exist to show.

use interference_core::{Dataset, TrueEffects};
use serde::Serialize;

use crate::error::EstimatorError;

/// How per-unit weighted outcomes are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Aggregation {
    /// Population total, for estimands such as "number of people affected".
    #[default]
    Sum,
    /// Per-unit average, for estimands such as "mean activity".
    Mean,
}

/// Treatment-weighted vs control-weighted outcome reductions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NaiveEstimate {
    pub aggregation: Aggregation,
    /// `Σ t_i · y_i` (or its mean).
    pub treated: f64,
    /// `Σ (1 − t_i) · y_i` (or its mean).
    pub control: f64,
    /// `treated / control`.
    pub ratio: f64,
}

/// Naive relative effect: the treatment-weighted reduction of outcomes divided
/// by the control-weighted reduction.
///
/// Fails with [`EstimatorError::ZeroControl`] rather than returning infinity
/// when the control-weighted reduction is zero.
pub fn naive_effect(
    treatments: &[f64],
    outcomes: &[f64],
    aggregation: Aggregation,
) -> Result<NaiveEstimate, EstimatorError> {
    if treatments.len() != outcomes.len() {
        return Err(EstimatorError::LengthMismatch {
            treatments: treatments.len(),
            outcomes: outcomes.len(),
        });
    }
    if treatments.is_empty() {
        return Err(EstimatorError::Empty);
    }

    let (mut treated, mut control) = treatments
        .iter()
        .zip(outcomes)
        .fold((0.0, 0.0), |(treated, control), (&t, &y)| {
            (treated + t * y, control + (1.0 - t) * y)
        });

    if aggregation == Aggregation::Mean {
        let n = treatments.len() as f64;
        treated /= n;
        control /= n;
    }

    if control == 0.0 {
        return Err(EstimatorError::ZeroControl);
    }

    Ok(NaiveEstimate {
        aggregation,
        treated,
        control,
        ratio: treated / control,
    })
}

/// Mean outcome of treated units minus mean outcome of control units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifferenceInMeans {
    pub treated_mean: f64,
    pub control_mean: f64,
    pub difference: f64,
}

/// Difference-in-means for binary (0/1) treatments.
pub fn difference_in_means(
    treatments: &[f64],
    outcomes: &[f64],
) -> Result<DifferenceInMeans, EstimatorError> {
    if treatments.len() != outcomes.len() {
        return Err(EstimatorError::LengthMismatch {
            treatments: treatments.len(),
            outcomes: outcomes.len(),
        });
    }

    let mut treated = (0.0, 0usize);
    let mut control = (0.0, 0usize);
    for (unit, (&t, &y)) in treatments.iter().zip(outcomes).enumerate() {
        let arm = if t == 1.0 {
            &mut treated
        } else if t == 0.0 {
            &mut control
        } else {
            return Err(EstimatorError::NonBinaryTreatment { unit, value: t });
        };
        arm.0 += y;
        arm.1 += 1;
    }

    if treated.1 == 0 {
        return Err(EstimatorError::EmptyArm { arm: "treated" });
    }
    if control.1 == 0 {
        return Err(EstimatorError::EmptyArm { arm: "control" });
    }

    let treated_mean = treated.0 / treated.1 as f64;
    let control_mean = control.0 / control.1 as f64;
    Ok(DifferenceInMeans {
        treated_mean,
        control_mean,
        difference: treated_mean - control_mean,
    })
}

/// Effect computed from simulator ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GroundTruthEstimate {
    /// All-treated total over all-control total.
    PopulationRatio {
        treated_total: f64,
        control_total: f64,
        ratio: f64,
    },
    /// Mean of the per-unit isolated effects.
    AverageIsolatedEffect { mean: f64 },
}

impl GroundTruthEstimate {
    /// The headline number: the ratio or the mean effect.
    pub fn value(&self) -> f64 {
        match *self {
            GroundTruthEstimate::PopulationRatio { ratio, .. } => ratio,
            GroundTruthEstimate::AverageIsolatedEffect { mean } => mean,
        }
    }
}

pub fn ground_truth_effect(
    true_effects: &TrueEffects,
) -> Result<GroundTruthEstimate, EstimatorError> {
    match true_effects {
        TrueEffects::Counterfactual { treated, control } => {
            if treated.is_empty() {
                return Err(EstimatorError::Empty);
            }
            let treated_total: f64 = treated.iter().sum();
            let control_total: f64 = control.iter().sum();
            if control_total == 0.0 {
                return Err(EstimatorError::ZeroControl);
            }
            Ok(GroundTruthEstimate::PopulationRatio {
                treated_total,
                control_total,
                ratio: treated_total / control_total,
            })
        }
        TrueEffects::Isolated(effects) => {
            if effects.is_empty() {
                return Err(EstimatorError::Empty);
            }
            let mean = effects.iter().sum::<f64>() / effects.len() as f64;
            Ok(GroundTruthEstimate::AverageIsolatedEffect { mean })
        }
    }
}

/// Naive and ground-truth estimates for the same dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectComparison {
    pub naive: NaiveEstimate,
    pub ground_truth: GroundTruthEstimate,
}

/// Aggregation that matches the dataset's ground truth: totals for a
/// population counterfactual, per-unit means for isolated effects.
pub fn default_aggregation(true_effects: &TrueEffects) -> Aggregation {
    match true_effects {
        TrueEffects::Counterfactual { .. } => Aggregation::Sum,
        TrueEffects::Isolated(_) => Aggregation::Mean,
    }
}

pub fn compare(dataset: &Dataset) -> Result<EffectComparison, EstimatorError> {
    let aggregation = default_aggregation(dataset.true_effects());
    Ok(EffectComparison {
        naive: naive_effect(dataset.treatments(), dataset.outcomes(), aggregation)?,
        ground_truth: ground_truth_effect(dataset.true_effects())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use interference_core::test_helpers::{FixedExperiment, SCENARIO_OUTCOMES, SCENARIO_TREATMENTS};
    use interference_core::Experiment;

    #[test]
    fn four_unit_scenario() {
        let estimate =
            naive_effect(&SCENARIO_TREATMENTS, &SCENARIO_OUTCOMES, Aggregation::Sum).unwrap();
        assert_eq!(estimate.treated, 40.0);
        assert_eq!(estimate.control, 60.0);
        assert_relative_eq!(estimate.ratio, 2.0 / 3.0);
        assert_eq!(format!("{:.3}", estimate.ratio), "0.667");
    }

    #[test]
    fn mean_variant_divides_by_unit_count() {
        let estimate =
            naive_effect(&SCENARIO_TREATMENTS, &SCENARIO_OUTCOMES, Aggregation::Mean).unwrap();
        assert_eq!(estimate.treated, 10.0);
        assert_eq!(estimate.control, 15.0);
        assert_relative_eq!(estimate.ratio, 2.0 / 3.0);
    }

    #[test]
    fn fractional_treatment_splits_outcome() {
        let estimate = naive_effect(&[0.25], &[8.0], Aggregation::Sum).unwrap();
        assert_eq!(estimate.treated, 2.0);
        assert_eq!(estimate.control, 6.0);
    }

    #[test]
    fn all_treated_is_zero_control() {
        let err = naive_effect(&[1.0, 1.0], &[3.0, 4.0], Aggregation::Sum).unwrap_err();
        assert_eq!(err, EstimatorError::ZeroControl);
    }

    #[test]
    fn zero_outcomes_are_zero_control() {
        let err = naive_effect(&[1.0, 0.0], &[0.0, 0.0], Aggregation::Mean).unwrap_err();
        assert_eq!(err, EstimatorError::ZeroControl);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = naive_effect(&[1.0], &[1.0, 2.0], Aggregation::Sum).unwrap_err();
        assert!(matches!(err, EstimatorError::LengthMismatch { .. }));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            naive_effect(&[], &[], Aggregation::Sum).unwrap_err(),
            EstimatorError::Empty
        );
    }

    #[test]
    fn difference_in_means_on_scenario() {
        let dim = difference_in_means(&SCENARIO_TREATMENTS, &SCENARIO_OUTCOMES).unwrap();
        assert_eq!(dim.treated_mean, 20.0);
        assert_eq!(dim.control_mean, 30.0);
        assert_eq!(dim.difference, -10.0);
    }

    #[test]
    fn difference_in_means_rejects_fractions_and_empty_arms() {
        assert!(matches!(
            difference_in_means(&[0.5, 1.0], &[1.0, 1.0]),
            Err(EstimatorError::NonBinaryTreatment { unit: 0, .. })
        ));
        assert_eq!(
            difference_in_means(&[0.0, 0.0], &[1.0, 1.0]).unwrap_err(),
            EstimatorError::EmptyArm { arm: "treated" }
        );
    }

    #[test]
    fn ground_truth_population_ratio() {
        let effects = TrueEffects::Counterfactual {
            treated: vec![100.0, 100.0],
            control: vec![10.0, 10.0],
        };
        let estimate = ground_truth_effect(&effects).unwrap();
        assert_eq!(
            estimate,
            GroundTruthEstimate::PopulationRatio {
                treated_total: 200.0,
                control_total: 20.0,
                ratio: 10.0
            }
        );
        assert_eq!(estimate.value(), 10.0);
    }

    #[test]
    fn ground_truth_isolated_mean() {
        let estimate = ground_truth_effect(&TrueEffects::Isolated(vec![-0.1, -0.3])).unwrap();
        assert_relative_eq!(estimate.value(), -0.2);
    }

    #[test]
    fn ground_truth_zero_control_fails() {
        let effects = TrueEffects::Counterfactual {
            treated: vec![1.0],
            control: vec![0.0],
        };
        assert_eq!(ground_truth_effect(&effects).unwrap_err(), EstimatorError::ZeroControl);
    }

    #[test]
    fn naive_and_ground_truth_diverge_on_scenario() {
        let dataset = FixedExperiment::scenario().run(None, 0).unwrap();
        let comparison = compare(&dataset).unwrap();
        assert_relative_eq!(comparison.naive.ratio, 2.0 / 3.0);
        assert_eq!(comparison.ground_truth.value(), 10.0);
    }
}
