//! Core types for studying interference in randomized experiments.
//!
//! An [`Experiment`] is a pre-configured simulator that, given a seed, draws a
//! random treatment assignment, simulates interacting units and returns a
//! [`Dataset`]: observed treatments and outcomes plus the ground truth that a
//! real experiment could never observe. Simulators are configured through
//! explicit parameter objects ([`SimulatorConfig`]) and obtained from
//! [`get_experiments`].

pub mod dataset;
pub mod error;
pub mod experiment;
pub mod registry;
pub mod simulators;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use dataset::{Dataset, TrueEffects};
pub use error::{DatasetError, ExperimentError, UnknownSimulator};
pub use experiment::Experiment;
pub use registry::{get_experiment, get_experiments, SimulatorConfig, SimulatorKind};
