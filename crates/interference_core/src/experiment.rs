//! The experiment contract consumed by estimators and the trial driver.

use crate::dataset::Dataset;
use crate::error::ExperimentError;

/// A pre-configured randomized experiment.
///
/// Each call to [`run`](Experiment::run) is an independent, stateless
/// invocation: the returned dataset depends only on the experiment's own
/// configuration, `num_samples` and `seed`. Implementations must be safe to
/// call concurrently from several worker threads.
pub trait Experiment: Send + Sync + std::fmt::Debug {
    /// Short identifier, e.g. `"contagion"`.
    fn name(&self) -> &'static str;

    /// One-line human-readable description.
    fn description(&self) -> &'static str;

    /// Whether `num_samples` changes the result. Experiments with a fixed unit
    /// population that compute ground truth exactly ignore it.
    fn uses_num_samples(&self) -> bool;

    /// Run the experiment once.
    ///
    /// `num_samples` is the number of replications backing the ground-truth
    /// estimate; `None` selects the experiment's default.
    fn run(&self, num_samples: Option<usize>, seed: u64) -> Result<Dataset, ExperimentError>;
}

impl<E: Experiment + ?Sized> Experiment for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn description(&self) -> &'static str {
        (**self).description()
    }

    fn uses_num_samples(&self) -> bool {
        (**self).uses_num_samples()
    }

    fn run(&self, num_samples: Option<usize>, seed: u64) -> Result<Dataset, ExperimentError> {
        (**self).run(num_samples, seed)
    }
}
