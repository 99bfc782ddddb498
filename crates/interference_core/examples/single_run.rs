//! Run each simulator once and print the dataset shape and totals.
//!
//! Run with: cargo run -p interference_core --example single_run

use interference_core::{get_experiment, SimulatorKind, TrueEffects};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const SEED: u64 = 0;

    for kind in SimulatorKind::ALL {
        let experiment = get_experiment(&kind.default_config())?;
        let dataset = experiment.run(None, SEED)?;

        println!("--- {} (seed {}) ---", experiment.name(), SEED);
        println!("{}", experiment.description());
        println!("Units: {}", dataset.len());
        println!(
            "Covariate width: {}",
            dataset.covariates().first().map(Vec::len).unwrap_or(0)
        );
        println!("Observed outcome total: {:.2}", dataset.outcomes().iter().sum::<f64>());

        match dataset.true_effects() {
            TrueEffects::Counterfactual { treated, control } => {
                println!("All-treated total: {:.2}", treated.iter().sum::<f64>());
                println!("All-control total: {:.2}", control.iter().sum::<f64>());
            }
            TrueEffects::Isolated(effects) => {
                let mean = effects.iter().sum::<f64>() / effects.len().max(1) as f64;
                println!("Mean isolated effect: {:.4}", mean);
            }
        }
        println!();
    }

    Ok(())
}
