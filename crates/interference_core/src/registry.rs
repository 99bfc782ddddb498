//! Named simulators and the factory that hands out configured experiments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExperimentError, UnknownSimulator};
use crate::experiment::Experiment;
use crate::simulators::{
    ContagionConfig, ContagionExperiment, PeerInfluenceConfig, PeerInfluenceExperiment,
};

/// Which simulator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulatorKind {
    Contagion,
    PeerInfluence,
}

impl SimulatorKind {
    pub const ALL: [SimulatorKind; 2] = [SimulatorKind::Contagion, SimulatorKind::PeerInfluence];

    pub fn as_str(self) -> &'static str {
        match self {
            SimulatorKind::Contagion => "contagion",
            SimulatorKind::PeerInfluence => "peer-influence",
        }
    }

    /// Default configuration for this simulator.
    pub fn default_config(self) -> SimulatorConfig {
        match self {
            SimulatorKind::Contagion => SimulatorConfig::Contagion(ContagionConfig::default()),
            SimulatorKind::PeerInfluence => {
                SimulatorConfig::PeerInfluence(PeerInfluenceConfig::default())
            }
        }
    }
}

impl fmt::Display for SimulatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulatorKind {
    type Err = UnknownSimulator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contagion" => Ok(SimulatorKind::Contagion),
            "peer-influence" | "peer_influence" => Ok(SimulatorKind::PeerInfluence),
            _ => Err(UnknownSimulator(s.to_string())),
        }
    }
}

/// Explicit configuration of one simulator, passed to [`get_experiments`].
///
/// Serialized with a `simulator` tag, e.g.
/// `{"simulator": "contagion", "num_units": 200}`; omitted fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "simulator", rename_all = "kebab-case")]
pub enum SimulatorConfig {
    Contagion(ContagionConfig),
    PeerInfluence(PeerInfluenceConfig),
}

impl SimulatorConfig {
    pub fn kind(&self) -> SimulatorKind {
        match self {
            SimulatorConfig::Contagion(_) => SimulatorKind::Contagion,
            SimulatorConfig::PeerInfluence(_) => SimulatorKind::PeerInfluence,
        }
    }
}

impl From<ContagionConfig> for SimulatorConfig {
    fn from(config: ContagionConfig) -> Self {
        SimulatorConfig::Contagion(config)
    }
}

impl From<PeerInfluenceConfig> for SimulatorConfig {
    fn from(config: PeerInfluenceConfig) -> Self {
        SimulatorConfig::PeerInfluence(config)
    }
}

/// Build the experiments offered by a simulator.
///
/// Each simulator currently offers exactly one experiment.
pub fn get_experiments(
    config: &SimulatorConfig,
) -> Result<Vec<Box<dyn Experiment>>, ExperimentError> {
    let experiment: Box<dyn Experiment> = match config {
        SimulatorConfig::Contagion(c) => Box::new(ContagionExperiment::new(c.clone())?),
        SimulatorConfig::PeerInfluence(c) => Box::new(PeerInfluenceExperiment::new(c.clone())?),
    };
    Ok(vec![experiment])
}

/// Convenience wrapper returning the single experiment of `config`.
pub fn get_experiment(config: &SimulatorConfig) -> Result<Box<dyn Experiment>, ExperimentError> {
    get_experiments(config)?
        .into_iter()
        .next()
        .ok_or_else(|| {
            ExperimentError::Simulation(format!("{} offers no experiments", config.kind()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_simulator_offers_one_experiment() {
        for kind in SimulatorKind::ALL {
            let experiments = get_experiments(&kind.default_config()).unwrap();
            assert_eq!(experiments.len(), 1);
            assert_eq!(experiments[0].name(), kind.as_str());
        }
    }

    #[test]
    fn parses_names() {
        assert_eq!("contagion".parse::<SimulatorKind>().unwrap(), SimulatorKind::Contagion);
        assert_eq!(
            "Peer_Influence".parse::<SimulatorKind>().unwrap(),
            SimulatorKind::PeerInfluence
        );
        assert!("riot".parse::<SimulatorKind>().is_err());
    }

    #[test]
    fn config_round_trips_through_json_with_defaults() {
        let config: SimulatorConfig =
            serde_json::from_str(r#"{"simulator": "contagion", "num_units": 42}"#).unwrap();
        match &config {
            SimulatorConfig::Contagion(c) => {
                assert_eq!(c.num_units, 42);
                assert_eq!(c.rounds, ContagionConfig::default().rounds);
            }
            other => panic!("unexpected config: {other:?}"),
        }
        assert_eq!(config.kind(), SimulatorKind::Contagion);
    }

    #[test]
    fn invalid_config_is_reported() {
        let config = SimulatorConfig::from(PeerInfluenceConfig::default().with_rounds(0));
        assert!(get_experiments(&config).is_err());
    }

    #[test]
    fn oversized_neighbourhood_from_json_is_rejected() {
        let config: SimulatorConfig = serde_json::from_str(
            r#"{"simulator":"contagion","neighbors_per_side":9223372036854775808}"#,
        )
        .unwrap();
        let err = get_experiments(&config).unwrap_err();
        assert!(matches!(err, ExperimentError::InvalidConfig { .. }));
    }
}
