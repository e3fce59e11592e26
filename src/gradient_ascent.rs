// src/gradient_ascent.rs

//! Normalized gradient ascent for the leading direction of a centered matrix.

use crate::config::GradientAscentConfig;
use crate::linalg::{direction, gradient, objective};
use log::trace;
use ndarray::{Array1, ArrayView2};

const TRACE_EVERY: usize = 1000;

/// Outcome of a single-direction search.
#[derive(Clone, Debug)]
pub struct ComponentSearch {
    /// Unit-norm direction found by the search.
    pub direction: Array1<f64>,
    /// Number of ascent steps taken.
    pub iterations: usize,
    /// Whether the objective settled below epsilon before the iteration cap.
    pub converged: bool,
    /// Projected variance along `direction`.
    pub objective: f64,
}

/// Finds the direction maximizing the projected variance of `xc`, starting from `initial_w`.
///
/// `xc` must already be centered. Each step moves `w` along the gradient scaled by
/// `config.eta` and renormalizes it. The search stops once the objective changes by less
/// than `config.epsilon`, or after `config.n_iters` steps. Hitting the cap is not an error:
/// the last direction is returned with `converged == false`.
pub fn first_component(
    xc: ArrayView2<f64>,
    initial_w: Array1<f64>,
    config: &GradientAscentConfig,
) -> ComponentSearch {
    let mut w = direction(initial_w);
    let mut current = objective(xc, w.view());
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.n_iters {
        let grad = gradient(xc, w.view());
        let last_objective = current;

        let mut stepped = w;
        stepped.scaled_add(config.eta, &grad);
        w = direction(stepped);
        current = objective(xc, w.view());
        iterations += 1;

        if iterations % TRACE_EVERY == 0 {
            trace!("ascent step {}: objective {:.6e}", iterations, current);
        }
        if (current - last_objective).abs() < config.epsilon {
            converged = true;
            break;
        }
    }

    ComponentSearch {
        direction: w,
        iterations,
        converged,
        objective: current,
    }
}
