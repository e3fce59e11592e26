// src/diagnostics.rs

use crate::gradient_ascent::ComponentSearch;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// What the ascent reported for one extracted component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDiagnostics {
    pub iterations: usize,
    pub converged: bool,
    /// Projected variance on the deflated data at extraction time.
    pub explained_variance: f64,
}

impl From<&ComponentSearch> for ComponentDiagnostics {
    fn from(search: &ComponentSearch) -> Self {
        Self {
            iterations: search.iterations,
            converged: search.converged,
            explained_variance: search.objective,
        }
    }
}

/// Diagnostics recorded by a successful fit, one entry per component in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    pub components: Vec<ComponentDiagnostics>,
    /// Sum of per-feature variances of the centered training data.
    pub total_variance: f64,
}

impl FitDiagnostics {
    pub fn new(total_variance: f64) -> Self {
        Self {
            components: Vec::new(),
            total_variance,
        }
    }

    pub fn push(&mut self, component: ComponentDiagnostics) {
        self.components.push(component);
    }

    pub fn explained_variance(&self) -> Array1<f64> {
        self.components.iter().map(|c| c.explained_variance).collect()
    }

    /// Explained variance divided by total variance; all zeros for constant data.
    pub fn explained_variance_ratio(&self) -> Array1<f64> {
        let variances = self.explained_variance();
        if self.total_variance > 0.0 {
            variances / self.total_variance
        } else {
            Array1::zeros(variances.len())
        }
    }

    pub fn iterations_used(&self) -> Vec<usize> {
        self.components.iter().map(|c| c.iterations).collect()
    }

    /// True when every component search stopped on the epsilon criterion.
    pub fn all_converged(&self) -> bool {
        self.components.iter().all(|c| c.converged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn component(variance: f64, converged: bool) -> ComponentDiagnostics {
        ComponentDiagnostics {
            iterations: 10,
            converged,
            explained_variance: variance,
        }
    }

    #[test]
    fn ratio_divides_by_total() {
        let mut diagnostics = FitDiagnostics::new(4.0);
        diagnostics.push(component(3.0, true));
        diagnostics.push(component(1.0, false));
        let ratio = diagnostics.explained_variance_ratio();
        assert_abs_diff_eq!(ratio[0], 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(ratio[1], 0.25, epsilon = 1e-12);
        assert!(!diagnostics.all_converged());
        assert_eq!(diagnostics.iterations_used(), vec![10, 10]);
    }

    #[test]
    fn ratio_is_zero_for_constant_data() {
        let mut diagnostics = FitDiagnostics::new(0.0);
        diagnostics.push(component(0.0, true));
        assert_eq!(diagnostics.explained_variance_ratio(), Array1::from(vec![0.0]));
    }
}
