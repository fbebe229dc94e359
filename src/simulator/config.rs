//! Simulation configuration.

use crate::core::constants::{DEFAULT_ITERATIONS, IMPACT_SHARE_THRESHOLD, TOP_SCENARIO_COUNT};
use crate::core::SimError;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of simulated universes
    pub iterations: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Share of iterations a player must exceed to be listed as helped or
    /// hurt by a state
    pub impact_threshold: f64,

    /// How many of the most frequent scenarios a risk profile keeps
    pub top_scenarios: usize,

    /// Fan batches out across the rayon pool (only with the `parallel` feature)
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            impact_threshold: IMPACT_SHARE_THRESHOLD,
            top_scenarios: TOP_SCENARIO_COUNT,
            parallel: true,
        }
    }
}

impl SimConfig {
    /// Short run for interactive use
    pub fn quick() -> Self {
        Self {
            iterations: 1_000,
            ..Default::default()
        }
    }

    /// Default run with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Fold every batch on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.iterations == 0 {
            return Err(SimError::ZeroIterations);
        }
        Ok(())
    }
}
