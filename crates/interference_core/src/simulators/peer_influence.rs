//! Peer influence on collective activity.
//!
//! Each unit carries a grievance and a risk aversion. A treatment fraction in
//! `[0, 1]` raises the unit's effective risk aversion, which damps its own
//! activity. Activity is also pulled towards the neighbourhood average, so a
//! unit's treatment leaks into its neighbours' outcomes.
//!
//! Ground truth is the isolated effect of each unit: its outcome with
//! treatment 1 minus its outcome with treatment 0, every other unit keeping the
//! realized assignment. The effect is averaged over `num_samples` independent
//! noise replications; more replications trade runtime for precision.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::network::{replication_seed, RingLattice};
use crate::dataset::{Dataset, TrueEffects};
use crate::error::ExperimentError;
use crate::experiment::Experiment;

const NAME: &str = "peer-influence";

/// Parameters of the peer influence experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerInfluenceConfig {
    pub num_units: usize,
    pub neighbors_per_side: usize,
    pub rounds: usize,
    /// Intercept of the activation score.
    pub bias: f64,
    pub grievance_weight: f64,
    pub risk_aversion_weight: f64,
    /// Relative increase of risk aversion at full treatment.
    pub treatment_strength: f64,
    /// Weight of the neighbourhood's mean activity from the previous round.
    pub peer_weight: f64,
    /// Half-width of the uniform noise added to the activation score.
    pub noise_scale: f64,
    /// Replications used when the caller passes `num_samples = None`.
    pub default_num_samples: usize,
}

impl Default for PeerInfluenceConfig {
    fn default() -> Self {
        Self {
            num_units: 100,
            neighbors_per_side: 2,
            rounds: 8,
            bias: -1.0,
            grievance_weight: 3.0,
            risk_aversion_weight: 2.0,
            treatment_strength: 1.0,
            peer_weight: 3.0,
            noise_scale: 0.5,
            default_num_samples: 1,
        }
    }
}

impl PeerInfluenceConfig {
    pub fn with_num_units(mut self, num_units: usize) -> Self {
        self.num_units = num_units;
        self
    }

    pub fn with_neighbors_per_side(mut self, neighbors_per_side: usize) -> Self {
        self.neighbors_per_side = neighbors_per_side;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_peer_weight(mut self, weight: f64) -> Self {
        self.peer_weight = weight;
        self
    }

    pub fn with_treatment_strength(mut self, strength: f64) -> Self {
        self.treatment_strength = strength;
        self
    }

    pub fn with_noise_scale(mut self, scale: f64) -> Self {
        self.noise_scale = scale;
        self
    }

    pub fn with_default_num_samples(mut self, num_samples: usize) -> Self {
        self.default_num_samples = num_samples;
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
        if self.default_num_samples == 0 {
            return Err(ExperimentError::invalid_config(
                NAME,
                "default_num_samples must be positive",
            ));
        }
        for (field, value) in [
            ("bias", self.bias),
            ("grievance_weight", self.grievance_weight),
            ("risk_aversion_weight", self.risk_aversion_weight),
            ("treatment_strength", self.treatment_strength),
            ("peer_weight", self.peer_weight),
            ("noise_scale", self.noise_scale),
        ] {
            if !value.is_finite() {
                return Err(ExperimentError::invalid_config(
                    NAME,
                    format!("{field} must be finite"),
                ));
            }
        }
        if self.noise_scale < 0.0 {
            return Err(ExperimentError::invalid_config(
                NAME,
                "noise_scale must be non-negative",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Traits {
    grievance: f64,
    risk_aversion: f64,
}

/// Peer influence experiment with an isolated per-unit ground truth.
#[derive(Debug, Clone)]
pub struct PeerInfluenceExperiment {
    config: PeerInfluenceConfig,
    network: RingLattice,
}

impl PeerInfluenceExperiment {
    pub fn new(config: PeerInfluenceConfig) -> Result<Self, ExperimentError> {
        config.validate()?;
        let network = RingLattice::new(config.num_units, config.neighbors_per_side);
        Ok(Self { config, network })
    }

    fn sample_noise(&self, seed: u64) -> Vec<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let scale = self.config.noise_scale;
        (0..self.config.rounds)
            .map(|_| {
                (0..self.config.num_units)
                    .map(|_| scale * (2.0 * rng.gen::<f64>() - 1.0))
                    .collect()
            })
            .collect()
    }

    /// Run the dynamics; each unit's outcome is its mean activity over all rounds.
    fn simulate(&self, traits: &[Traits], treatments: &[f64], noise: &[Vec<f64>]) -> Vec<f64> {
        let config = &self.config;
        let n = config.num_units;
        let mut activity = vec![0.0; n];
        let mut cumulative = vec![0.0; n];

        for round_noise in noise {
            let next: Vec<f64> = (0..n)
                .map(|unit| {
                    let neighbors = self.network.neighbors(unit);
                    let peer_mean = neighbors.iter().map(|&j| activity[j]).sum::<f64>()
                        / neighbors.len().max(1) as f64;
                    let risk = traits[unit].risk_aversion
                        * (1.0 + config.treatment_strength * treatments[unit]);
                    let score = config.bias + config.grievance_weight * traits[unit].grievance
                        - config.risk_aversion_weight * risk
                        + config.peer_weight * peer_mean
                        + round_noise[unit];
                    logistic(score)
                })
                .collect();
            activity = next;
            for (total, a) in cumulative.iter_mut().zip(&activity) {
                *total += a;
            }
        }

        let rounds = config.rounds as f64;
        cumulative.into_iter().map(|total| total / rounds).collect()
    }

    fn isolated_effects(
        &self,
        traits: &[Traits],
        treatments: &[f64],
        noises: &[Vec<Vec<f64>>],
    ) -> Vec<f64> {
        let n = self.config.num_units;
        let mut effects = vec![0.0; n];
        let mut toggled = treatments.to_vec();

        for noise in noises {
            for unit in 0..n {
                let original = toggled[unit];

                toggled[unit] = 1.0;
                let on = self.simulate(traits, &toggled, noise)[unit];
                toggled[unit] = 0.0;
                let off = self.simulate(traits, &toggled, noise)[unit];
                toggled[unit] = original;

                effects[unit] += on - off;
            }
        }

        let replications = noises.len() as f64;
        effects.iter_mut().for_each(|e| *e /= replications);
        effects
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Experiment for PeerInfluenceExperiment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Peer influence on activity; ground truth is each unit's isolated effect"
    }

    fn uses_num_samples(&self) -> bool {
        true
    }

    fn run(&self, num_samples: Option<usize>, seed: u64) -> Result<Dataset, ExperimentError> {
        let num_samples = num_samples.unwrap_or(self.config.default_num_samples);
        if num_samples == 0 {
            return Err(ExperimentError::invalid_config(
                NAME,
                "num_samples must be positive",
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let n = self.config.num_units;
        let traits: Vec<Traits> = (0..n)
            .map(|_| Traits {
                grievance: rng.gen(),
                risk_aversion: rng.gen(),
            })
            .collect();
        let treatments: Vec<f64> = (0..n).map(|_| rng.gen()).collect();

        let noises: Vec<Vec<Vec<f64>>> = (0..num_samples)
            .map(|k| self.sample_noise(replication_seed(seed, k)))
            .collect();

        let outcomes = self.simulate(&traits, &treatments, &noises[0]);
        let effects = self.isolated_effects(&traits, &treatments, &noises);

        let covariates = traits
            .iter()
            .map(|t| vec![t.grievance, t.risk_aversion])
            .collect();

        debug!(seed, units = n, num_samples, "peer influence run complete");

        Ok(Dataset::new(
            covariates,
            treatments,
            outcomes,
            TrueEffects::Isolated(effects),
        )?)
    }
}
