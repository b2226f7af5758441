//! MCTS Hyperparameters Configuration
//!
//! This module defines the tunable parameters of a search. They can be built
//! in code, or read from a JSON file where any omitted field keeps its default.

use crate::{MctsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// MCTS hyperparameters configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSHyperparameters {
    /// Number of select → expand → backup iterations per search
    /// Default: 100
    pub iterations: usize,

    /// Exploration constant of the PUCT score
    /// Higher values = more weight on priors and unvisited actions
    /// Default: 1.0
    pub c_puct: f64,

    /// Temperature applied to the root visit counts
    /// 1.0 = proportional to visits, → 0 = all mass on the most visited action
    /// Default: 1.0
    pub tau: f64,

    /// Share of the priors replaced by Dirichlet noise
    /// 0.0 disables the noise (the draw still happens)
    /// Default: 0.25
    pub dirichlet_epsilon: f64,

    /// Concentration of the Dirichlet noise
    /// Lower values = spikier noise
    /// Default: 0.03
    pub dirichlet_alpha: f64,

    /// Seed for the engine's random source; `None` draws one from the OS
    /// Default: None
    pub seed: Option<u64>,
}

impl Default for MCTSHyperparameters {
    fn default() -> Self {
        Self {
            iterations: 100,
            c_puct: 1.0,
            tau: 1.0,
            dirichlet_epsilon: 0.25,
            dirichlet_alpha: 0.03,
            seed: None,
        }
    }
}

impl MCTSHyperparameters {
    /// Configuration with the given iteration budget and default everything else.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Noise-free configuration for evaluation games.
    pub fn for_evaluation(iterations: usize) -> Self {
        Self {
            iterations,
            dirichlet_epsilon: 0.0,
            ..Default::default()
        }
    }

    /// Checks every parameter against the domain the search needs.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(MctsError::ZeroIterations);
        }
        // Node visit counts are u32.
        if u32::try_from(self.iterations).is_err() {
            return Err(MctsError::InvalidParameter(format!(
                "iterations must not exceed {}, got {}",
                u32::MAX,
                self.iterations
            )));
        }
        if !(self.tau > 0.0) || !self.tau.is_finite() {
            return Err(MctsError::InvalidTemperature(self.tau));
        }
        if !(self.c_puct >= 0.0) || !self.c_puct.is_finite() {
            return Err(MctsError::InvalidParameter(format!(
                "c_puct must be a non-negative number, got {}",
                self.c_puct
            )));
        }
        if !(0.0..=1.0).contains(&self.dirichlet_epsilon) {
            return Err(MctsError::InvalidParameter(format!(
                "dirichlet_epsilon must lie in [0, 1], got {}",
                self.dirichlet_epsilon
            )));
        }
        if !(self.dirichlet_alpha > 0.0) || !self.dirichlet_alpha.is_finite() {
            return Err(MctsError::InvalidParameter(format!(
                "dirichlet_alpha must be positive, got {}",
                self.dirichlet_alpha
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        format!(
            "iters[{}]_cpuct[{:.2}]_tau[{:.2}]_dirichlet[{:.2},{:.3}]",
            self.iterations, self.c_puct, self.tau, self.dirichlet_epsilon, self.dirichlet_alpha
        )
    }
}
