//! Risk contagion on a contact network.
//!
//! Every unit is randomized into treatment with a fixed probability. Treatment
//! scales the unit's own hazard of becoming affected; affected units in turn
//! raise the hazard of their neighbours. Because exposure flows between units,
//! a treated unit changes the outcomes of untreated ones, so the naive
//! treated-vs-control comparison misstates the population-level effect.
//!
//! Ground truth is the whole population simulated under all-treated and
//! all-control assignment with the same random draws (common random numbers),
//! so the three worlds differ only in treatment. The unit population is fixed
//! and ground truth is exact, hence `num_samples` is ignored.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::network::RingLattice;
use crate::dataset::{Dataset, TrueEffects};
use crate::error::ExperimentError;
use crate::experiment::Experiment;

const NAME: &str = "contagion";

/// Parameters of the contagion experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContagionConfig {
    pub num_units: usize,
    /// Neighbours linked on each side of a unit in the ring lattice.
    pub neighbors_per_side: usize,
    /// Probability that a unit is assigned to treatment.
    pub treatment_probability: f64,
    /// Number of synchronous update rounds.
    pub rounds: usize,
    /// Per-round hazard of becoming affected without any affected neighbour.
    pub base_hazard: f64,
    /// Multiplier applied to a treated unit's own base hazard.
    pub treatment_hazard_multiplier: f64,
    /// Per-round probability that one affected neighbour passes risk on.
    pub transmission_probability: f64,
    /// Per-round probability that an affected unit recovers.
    pub recovery_probability: f64,
    /// Individual susceptibility is drawn uniformly from `[1 - spread, 1 + spread]`.
    pub susceptibility_spread: f64,
}

impl Default for ContagionConfig {
    fn default() -> Self {
        Self {
            num_units: 500,
            neighbors_per_side: 2,
            treatment_probability: 0.5,
            rounds: 20,
            base_hazard: 0.01,
            treatment_hazard_multiplier: 3.0,
            transmission_probability: 0.08,
            recovery_probability: 0.15,
            susceptibility_spread: 0.5,
        }
    }
}

impl ContagionConfig {
    pub fn with_num_units(mut self, num_units: usize) -> Self {
        self.num_units = num_units;
        self
    }

    pub fn with_neighbors_per_side(mut self, neighbors_per_side: usize) -> Self {
        self.neighbors_per_side = neighbors_per_side;
        self
    }

    pub fn with_treatment_probability(mut self, probability: f64) -> Self {
        self.treatment_probability = probability;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_base_hazard(mut self, hazard: f64) -> Self {
        self.base_hazard = hazard;
        self
    }

    pub fn with_treatment_hazard_multiplier(mut self, multiplier: f64) -> Self {
        self.treatment_hazard_multiplier = multiplier;
        self
    }

    pub fn with_transmission_probability(mut self, probability: f64) -> Self {
        self.transmission_probability = probability;
        self
    }

    pub fn with_recovery_probability(mut self, probability: f64) -> Self {
        self.recovery_probability = probability;
        self
    }

    pub fn validate(&self) -> Result<(), ExperimentError> {
        if self.num_units == 0 {
            return Err(ExperimentError::invalid_config(NAME, "num_units must be positive"));
        }
        if self.neighbors_per_side >= self.num_units.div_ceil(2) {
            return Err(ExperimentError::invalid_config(
                NAME,
                format!(
                    "neighbors_per_side={} is too large for {} units",
                    self.neighbors_per_side, self.num_units
                ),
            ));
        }
        if self.rounds == 0 {
            return Err(ExperimentError::invalid_config(NAME, "rounds must be positive"));
        }
        for (field, value) in [
            ("treatment_probability", self.treatment_probability),
            ("base_hazard", self.base_hazard),
            ("transmission_probability", self.transmission_probability),
            ("recovery_probability", self.recovery_probability),
            ("susceptibility_spread", self.susceptibility_spread),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ExperimentError::invalid_config(
                    NAME,
                    format!("{field} must lie in [0, 1], got {value}"),
                ));
            }
        }
        if !self.treatment_hazard_multiplier.is_finite() || self.treatment_hazard_multiplier < 0.0
        {
            return Err(ExperimentError::invalid_config(
                NAME,
                "treatment_hazard_multiplier must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Random draws shared by the observed and counterfactual worlds.
struct Draws {
    susceptibility: Vec<f64>,
    /// `[round][unit]` uniforms deciding whether an unaffected unit becomes affected.
    onset: Vec<Vec<f64>>,
    /// `[round][unit]` uniforms deciding whether an affected unit recovers.
    recovery: Vec<Vec<f64>>,
}

impl Draws {
    fn sample(config: &ContagionConfig, rng: &mut StdRng) -> Self {
        let n = config.num_units;
        let spread = config.susceptibility_spread;
        let susceptibility = (0..n)
            .map(|_| 1.0 - spread + 2.0 * spread * rng.gen::<f64>())
            .collect();
        let onset = (0..config.rounds)
            .map(|_| (0..n).map(|_| rng.gen()).collect())
            .collect();
        let recovery = (0..config.rounds)
            .map(|_| (0..n).map(|_| rng.gen()).collect())
            .collect();
        Self {
            susceptibility,
            onset,
            recovery,
        }
    }
}

/// Contagion experiment with a population-level counterfactual ground truth.
#[derive(Debug, Clone)]
pub struct ContagionExperiment {
    config: ContagionConfig,
    network: RingLattice,
}

impl ContagionExperiment {
    pub fn new(config: ContagionConfig) -> Result<Self, ExperimentError> {
        config.validate()?;
        let network = RingLattice::new(config.num_units, config.neighbors_per_side);
        Ok(Self { config, network })
    }

    /// Run the dynamics for one treatment assignment; each unit's outcome is
    /// the number of rounds it spent affected.
    fn simulate(&self, treatments: &[f64], draws: &Draws) -> Vec<f64> {
        let config = &self.config;
        let n = config.num_units;
        let mut affected = vec![false; n];
        let mut rounds_affected = vec![0.0; n];

        for round in 0..config.rounds {
            let mut next = affected.clone();
            for unit in 0..n {
                if affected[unit] {
                    if draws.recovery[round][unit] < config.recovery_probability {
                        next[unit] = false;
                    }
                    continue;
                }

                let own = config.base_hazard
                    * draws.susceptibility[unit]
                    * (1.0 + treatments[unit] * (config.treatment_hazard_multiplier - 1.0));
                let exposed = self
                    .network
                    .neighbors(unit)
                    .iter()
                    .filter(|&&j| affected[j])
                    .count();
                let escape = (1.0 - own.clamp(0.0, 1.0))
                    * (1.0 - config.transmission_probability).powi(exposed as i32);
                if draws.onset[round][unit] < 1.0 - escape {
                    next[unit] = true;
                }
            }
            affected = next;
            for (total, &is_affected) in rounds_affected.iter_mut().zip(&affected) {
                if is_affected {
                    *total += 1.0;
                }
            }
        }

        rounds_affected
    }
}

impl Experiment for ContagionExperiment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Risk contagion on a ring lattice; ground truth is all-treated vs all-control"
    }

    fn uses_num_samples(&self) -> bool {
        false
    }

    fn run(&self, _num_samples: Option<usize>, seed: u64) -> Result<Dataset, ExperimentError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = self.config.num_units;

        let treatments: Vec<f64> = (0..n)
            .map(|_| {
                if rng.gen::<f64>() < self.config.treatment_probability {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        let draws = Draws::sample(&self.config, &mut rng);

        let outcomes = self.simulate(&treatments, &draws);
        let treated = self.simulate(&vec![1.0; n], &draws);
        let control = self.simulate(&vec![0.0; n], &draws);

        let covariates = (0..n)
            .map(|unit| vec![self.network.degree(unit) as f64, draws.susceptibility[unit]])
            .collect();

        debug!(seed, units = n, "contagion run complete");

        Ok(Dataset::new(
            covariates,
            treatments,
            outcomes,
            TrueEffects::Counterfactual { treated, control },
        )?)
    }
}
