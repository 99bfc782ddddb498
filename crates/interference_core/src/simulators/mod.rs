//! Reference simulators that exhibit interference between units.

pub mod contagion;
pub mod network;
pub mod peer_influence;

pub use contagion::{ContagionConfig, ContagionExperiment};
pub use peer_influence::{PeerInfluenceConfig, PeerInfluenceExperiment};
