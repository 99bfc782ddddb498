//! Per-unit experiment data returned by a single experiment run.
//!
//! A [`Dataset`] holds parallel sequences indexed by experimental unit. The
//! alignment contract (one entry per unit in every sequence, treatments in
//! `[0, 1]`, finite values) is checked once in [`Dataset::new`]; the struct is
//! immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// Ground-truth outcomes that only a simulator can produce.
///
/// The shape is a per-simulator contract: some simulators report the whole
/// population under all-treated and all-control assignment, others report a
/// per-unit isolated effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrueEffects {
    /// Outcomes under all-treated (`treated`) and all-control (`control`) assignment.
    Counterfactual {
        treated: Vec<f64>,
        control: Vec<f64>,
    },
    /// Effect of treating only this unit, holding every other unit's assignment fixed.
    Isolated(Vec<f64>),
}

impl TrueEffects {
    fn arrays(&self) -> Vec<(&'static str, &[f64])> {
        match self {
            TrueEffects::Counterfactual { treated, control } => vec![
                ("true_effects.treated", treated.as_slice()),
                ("true_effects.control", control.as_slice()),
            ],
            TrueEffects::Isolated(effects) => vec![("true_effects.isolated", effects.as_slice())],
        }
    }
}

/// Observed data plus ground truth for one randomized experiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    covariates: Vec<Vec<f64>>,
    treatments: Vec<f64>,
    outcomes: Vec<f64>,
    true_effects: TrueEffects,
}

impl Dataset {
    /// Build a dataset, rejecting misaligned or out-of-range inputs.
    ///
    /// The unit count is taken from `treatments`. Covariate rows may be empty
    /// (no features) but must all share one width.
    pub fn new(
        covariates: Vec<Vec<f64>>,
        treatments: Vec<f64>,
        outcomes: Vec<f64>,
        true_effects: TrueEffects,
    ) -> Result<Self, DatasetError> {
        let units = treatments.len();

        check_len("covariates", units, covariates.len())?;
        check_len("outcomes", units, outcomes.len())?;
        for (field, values) in true_effects.arrays() {
            check_len(field, units, values.len())?;
        }

        if let Some(first) = covariates.first() {
            let width = first.len();
            for (unit, row) in covariates.iter().enumerate() {
                if row.len() != width {
                    return Err(DatasetError::RaggedCovariates {
                        unit,
                        expected: width,
                        actual: row.len(),
                    });
                }
                check_finite("covariates", row).map_err(|_| DatasetError::NonFinite {
                    field: "covariates",
                    unit,
                })?;
            }
        }

        for (unit, &value) in treatments.iter().enumerate() {
            if !value.is_finite() {
                return Err(DatasetError::NonFinite {
                    field: "treatments",
                    unit,
                });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(DatasetError::TreatmentOutOfRange { unit, value });
            }
        }

        check_finite("outcomes", &outcomes)?;
        for (field, values) in true_effects.arrays() {
            check_finite(field, values)?;
        }

        Ok(Self {
            covariates,
            treatments,
            outcomes,
            true_effects,
        })
    }

    pub fn covariates(&self) -> &[Vec<f64>] {
        &self.covariates
    }

    pub fn treatments(&self) -> &[f64] {
        &self.treatments
    }

    pub fn outcomes(&self) -> &[f64] {
        &self.outcomes
    }

    pub fn true_effects(&self) -> &TrueEffects {
        &self.true_effects
    }

    /// Number of experimental units.
    pub fn len(&self) -> usize {
        self.treatments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treatments.is_empty()
    }

    /// True when every treatment is exactly 0 or 1.
    pub fn is_binary_treatment(&self) -> bool {
        self.treatments.iter().all(|&t| t == 0.0 || t == 1.0)
    }

    pub fn treated_count(&self) -> usize {
        self.treatments.iter().filter(|&&t| t == 1.0).count()
    }

    pub fn control_count(&self) -> usize {
        self.treatments.iter().filter(|&&t| t == 0.0).count()
    }

    /// Consume the dataset, returning its parts.
    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<f64>, Vec<f64>, TrueEffects) {
        (
            self.covariates,
            self.treatments,
            self.outcomes,
            self.true_effects,
        )
    }
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<(), DatasetError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DatasetError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<(), DatasetError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(unit) => Err(DatasetError::NonFinite { field, unit }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counterfactual(n: usize) -> TrueEffects {
        TrueEffects::Counterfactual {
            treated: vec![1.0; n],
            control: vec![0.0; n],
        }
    }

    #[test]
    fn accepts_aligned_inputs() {
        let dataset = Dataset::new(
            vec![vec![0.5, 1.0]; 4],
            vec![1.0, 0.0, 1.0, 0.0],
            vec![10.0, 20.0, 30.0, 40.0],
            counterfactual(4),
        )
        .unwrap();

        assert_eq!(dataset.len(), 4);
        assert!(dataset.is_binary_treatment());
        assert_eq!(dataset.treated_count(), 2);
        assert_eq!(dataset.control_count(), 2);
    }

    #[test]
    fn rejects_short_outcomes() {
        let err = Dataset::new(
            vec![vec![]; 3],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 2.0],
            counterfactual(3),
        )
        .unwrap_err();

        assert_eq!(
            err,
            DatasetError::LengthMismatch {
                field: "outcomes",
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_misaligned_true_effects() {
        let err = Dataset::new(
            vec![vec![]; 2],
            vec![1.0, 0.0],
            vec![1.0, 2.0],
            TrueEffects::Isolated(vec![0.1, 0.2, 0.3]),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            DatasetError::LengthMismatch {
                field: "true_effects.isolated",
                ..
            }
        ));
    }

    #[test]
    fn rejects_ragged_covariates() {
        let err = Dataset::new(
            vec![vec![1.0, 2.0], vec![1.0]],
            vec![1.0, 0.0],
            vec![1.0, 2.0],
            counterfactual(2),
        )
        .unwrap_err();

        assert_eq!(
            err,
            DatasetError::RaggedCovariates {
                unit: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rejects_treatment_outside_unit_interval() {
        let err = Dataset::new(
            vec![vec![]; 2],
            vec![1.5, 0.0],
            vec![1.0, 2.0],
            counterfactual(2),
        )
        .unwrap_err();

        assert!(matches!(err, DatasetError::TreatmentOutOfRange { unit: 0, .. }));
    }

    #[test]
    fn rejects_nan_outcome() {
        let err = Dataset::new(
            vec![vec![]; 2],
            vec![1.0, 0.0],
            vec![1.0, f64::NAN],
            counterfactual(2),
        )
        .unwrap_err();

        assert_eq!(
            err,
            DatasetError::NonFinite {
                field: "outcomes",
                unit: 1
            }
        );
    }

    #[test]
    fn fractional_treatments_are_not_binary() {
        let dataset = Dataset::new(
            vec![vec![]; 2],
            vec![0.25, 1.0],
            vec![1.0, 2.0],
            TrueEffects::Isolated(vec![0.0, 0.0]),
        )
        .unwrap();

        assert!(!dataset.is_binary_treatment());
        assert_eq!(dataset.treated_count(), 1);
        assert_eq!(dataset.control_count(), 0);
    }
}
