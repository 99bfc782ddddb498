//! Loading simulator configuration from JSON files.
//!
//! A config file holds one tagged [`SimulatorConfig`]; omitted fields take
//! their defaults:
//!
//! ```json
//! { "simulator": "peer-influence", "num_units": 200, "default_num_samples": 4 }
//! ```

use std::fs;
use std::path::Path;

use interference_core::{SimulatorConfig, SimulatorKind};

use crate::error::ConfigError;

pub fn load_simulator_config(path: impl AsRef<Path>) -> Result<SimulatorConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the configuration to run: a config file if given, else the
/// simulator's defaults; `num_units` overrides either.
///
/// A `kind` that disagrees with the config file's simulator is an error.
pub fn resolve_simulator_config(
    kind: Option<SimulatorKind>,
    config_path: Option<&Path>,
    num_units: Option<usize>,
) -> Result<SimulatorConfig, ConfigError> {
    let mut config = match config_path {
        Some(path) => {
            let config = load_simulator_config(path)?;
            match kind {
                Some(requested) if requested != config.kind() => {
                    return Err(ConfigError::SimulatorMismatch {
                        path: path.to_path_buf(),
                        requested,
                        found: config.kind(),
                    });
                }
                _ => config,
            }
        }
        None => kind.unwrap_or(SimulatorKind::Contagion).default_config(),
    };

    if let Some(units) = num_units {
        match &mut config {
            SimulatorConfig::Contagion(c) => c.num_units = units,
            SimulatorConfig::PeerInfluence(c) => c.num_units = units,
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_tagged_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"simulator": "peer-influence", "num_units": 12, "default_num_samples": 3}}"#
        )
        .unwrap();

        let config = load_simulator_config(file.path()).unwrap();
        match config {
            SimulatorConfig::PeerInfluence(c) => {
                assert_eq!(c.num_units, 12);
                assert_eq!(c.default_num_samples, 3);
            }
            other => panic!("unexpected config: {other:?}"),
        }
    }

    #[test]
    fn malformed_config_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = load_simulator_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unit_override_applies_to_defaults() {
        let config =
            resolve_simulator_config(Some(SimulatorKind::PeerInfluence), None, Some(33)).unwrap();
        assert!(matches!(config, SimulatorConfig::PeerInfluence(c) if c.num_units == 33));
    }

    #[test]
    fn conflicting_simulator_and_config_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"simulator": "peer-influence"}}"#).unwrap();

        let err =
            resolve_simulator_config(Some(SimulatorKind::Contagion), Some(file.path()), None)
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SimulatorMismatch {
                requested: SimulatorKind::Contagion,
                found: SimulatorKind::PeerInfluence,
                ..
            }
        ));
    }

    #[test]
    fn matching_simulator_keeps_config_file_and_applies_units() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"simulator": "peer-influence", "rounds": 3}}"#).unwrap();

        let config = resolve_simulator_config(
            Some(SimulatorKind::PeerInfluence),
            Some(file.path()),
            Some(40),
        )
        .unwrap();
        assert!(matches!(
            config,
            SimulatorConfig::PeerInfluence(c) if c.rounds == 3 && c.num_units == 40
        ));
    }
}
