// src/config.rs

//! Hyperparameters of the per-component gradient ascent search.

use crate::error::{PcaError, Result};
use serde::{Deserialize, Serialize};

/// Default learning rate.
pub const DEFAULT_ETA: f64 = 0.01;
/// Default cap on ascent steps per component.
pub const DEFAULT_N_ITERS: usize = 10_000;
/// Stop once the objective changes by less than this between two steps.
pub const CONVERGENCE_EPSILON: f64 = 1e-8;

/// Parameters of the normalized gradient ascent that extracts each component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientAscentConfig {
    /// Learning rate applied to the gradient before renormalization.
    pub eta: f64,
    /// Maximum number of ascent steps per component.
    pub n_iters: usize,
    /// Convergence threshold on the absolute change of the objective.
    pub epsilon: f64,
}

impl Default for GradientAscentConfig {
    fn default() -> Self {
        Self {
            eta: DEFAULT_ETA,
            n_iters: DEFAULT_N_ITERS,
            epsilon: CONVERGENCE_EPSILON,
        }
    }
}

impl GradientAscentConfig {
    /// Configuration with the given step size and iteration cap and the fixed epsilon.
    pub fn new(eta: f64, n_iters: usize) -> Self {
        Self {
            eta,
            n_iters,
            epsilon: CONVERGENCE_EPSILON,
        }
    }

    pub fn builder() -> GradientAscentConfigBuilder {
        GradientAscentConfigBuilder::new()
    }

    /// Checks that every parameter is usable.
    ///
    /// # Errors
    /// Returns [`PcaError::InvalidArgument`] naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if !(self.eta.is_finite() && self.eta > 0.0) {
            return Err(PcaError::InvalidArgument(format!(
                "eta must be a positive finite number, got {}",
                self.eta
            )));
        }
        if self.n_iters == 0 {
            return Err(PcaError::InvalidArgument(
                "n_iters must be at least 1".into(),
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(PcaError::InvalidArgument(format!(
                "epsilon must be a non-negative finite number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Fluent builder for [`GradientAscentConfig`].
#[derive(Default)]
pub struct GradientAscentConfigBuilder {
    config: GradientAscentConfig,
}

impl GradientAscentConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GradientAscentConfig::default(),
        }
    }

    pub fn eta(mut self, eta: f64) -> Self {
        self.config.eta = eta;
        self
    }

    pub fn n_iters(mut self, n_iters: usize) -> Self {
        self.config.n_iters = n_iters;
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    pub fn build(self) -> GradientAscentConfig {
        self.config
    }
}
