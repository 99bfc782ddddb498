use interference_core::{Dataset, TrueEffects};

/// Sum of the counterfactual pair, or panic if the dataset carries isolated effects.
pub fn counterfactual_totals(dataset: &Dataset) -> (f64, f64) {
    match dataset.true_effects() {
        TrueEffects::Counterfactual { treated, control } => {
            (treated.iter().sum(), control.iter().sum())
        }
        TrueEffects::Isolated(_) => panic!("expected counterfactual ground truth"),
    }
}
