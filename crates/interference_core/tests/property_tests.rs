//! Property tests for the dataset alignment contract.

use interference_core::{Dataset, DatasetError, TrueEffects};
use proptest::prelude::*;

fn column(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

proptest! {
    #[test]
    fn accepted_iff_aligned_and_in_range(
        treatments in prop::collection::vec(-0.5f64..1.5, 0..8),
        covariate_rows in 0usize..8,
        outcome_len in 0usize..8,
        effect_len in 0usize..8,
    ) {
        let units = treatments.len();
        let aligned = covariate_rows == units && outcome_len == units && effect_len == units;
        let in_range = treatments.iter().all(|t| (0.0..=1.0).contains(t));

        let result = Dataset::new(
            vec![vec![1.0, 2.0]; covariate_rows],
            treatments.clone(),
            column(outcome_len),
            TrueEffects::Isolated(column(effect_len)),
        );

        prop_assert_eq!(result.is_ok(), aligned && in_range);
        match result {
            Ok(dataset) => prop_assert_eq!(dataset.len(), units),
            Err(DatasetError::LengthMismatch { expected, actual, .. }) => {
                prop_assert!(!aligned);
                prop_assert_eq!(expected, units);
                prop_assert_ne!(actual, units);
            }
            Err(DatasetError::TreatmentOutOfRange { value, .. }) => {
                prop_assert!(aligned);
                prop_assert!(!(0.0..=1.0).contains(&value));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn counterfactual_arms_must_both_align(
        units in 1usize..8,
        treated_len in 0usize..8,
        control_len in 0usize..8,
    ) {
        let result = Dataset::new(
            vec![Vec::new(); units],
            vec![0.0; units],
            column(units),
            TrueEffects::Counterfactual {
                treated: column(treated_len),
                control: column(control_len),
            },
        );
        prop_assert_eq!(result.is_ok(), treated_len == units && control_len == units);
    }
}
