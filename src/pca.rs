// Principal component analysis by gradient ascent

use crate::config::{GradientAscentConfig, CONVERGENCE_EPSILON};
use crate::diagnostics::{ComponentDiagnostics, FitDiagnostics};
use crate::error::{PcaError, Result};
use crate::gradient_ascent::first_component;
use crate::linalg::{deflate, demean, total_variance};
use float_cmp::approx_eq;
use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayView2};
use ndarray_rand::RandomExt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Residual variance, relative to the total, below which later directions carry no signal.
const RESIDUAL_VARIANCE_FLOOR: f64 = 1e-6;
/// Tolerance on the norm of stored component rows.
const UNIT_NORM_TOLERANCE: f64 = 1e-6;

/// Principal component analysis fitted by normalized gradient ascent.
///
/// Each component is the unit direction maximizing the variance of the projected data.
/// Components are extracted one at a time, and the working copy of the data is deflated
/// along every direction found. A row whose search converged is orthogonal to the rows
/// before it. A row that stopped at the iteration cap can still overlap earlier rows,
/// since its start is never projected off them; check [`FitDiagnostics::all_converged`].
///
/// # Examples
///
/// ```
/// use gradient_pca::GradientPCA;
/// use ndarray::array;
///
/// let x = array![[1.0, 2.0], [2.0, 4.1], [3.0, 5.9], [4.0, 8.2]];
/// let mut pca = GradientPCA::new(1)?.with_seed(7);
/// pca.fit(x.view(), 0.01, 10_000)?;
///
/// let scores = pca.transform(x.view())?;
/// assert_eq!(scores.dim(), (4, 1));
/// let restored = pca.inverse_transform(scores.view())?;
/// assert_eq!(restored.dim(), (4, 2));
/// # Ok::<(), gradient_pca::PcaError>(())
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GradientPCA {
    n_components: usize,
    /// Principal directions, one per row.
    /// Shape: (n_components, n_features)
    components: Option<Array2<f64>>,
    /// Per-component convergence and variance figures from the last fit.
    diagnostics: Option<FitDiagnostics>,
    /// Seed for the initial directions. `None` draws a fresh seed from the OS per fit.
    random_state: Option<u64>,
}

impl GradientPCA {
    /// Creates an unfitted estimator that will extract `n_components` directions.
    ///
    /// # Errors
    /// [`PcaError::InvalidArgument`] if `n_components` is zero.
    pub fn new(n_components: usize) -> Result<Self> {
        if n_components < 1 {
            return Err(PcaError::InvalidArgument(
                "n_components must be at least 1".into(),
            ));
        }
        Ok(Self {
            n_components,
            components: None,
            diagnostics: None,
            random_state: None,
        })
    }

    /// Pins the random initial directions so that fits are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Builds a fitted estimator from precomputed directions (one unit-norm row each).
    ///
    /// # Errors
    /// [`PcaError::InvalidModel`] if the matrix is empty, contains non-finite values,
    /// or has a row whose norm is not 1.
    pub fn with_components(components: Array2<f64>) -> Result<Self> {
        validate_components(&components)?;
        Ok(Self {
            n_components: components.nrows(),
            components: Some(components),
            diagnostics: None,
            random_state: None,
        })
    }

    pub fn n_components(&self) -> usize {
        self.n_components
    }

    pub fn random_state(&self) -> Option<u64> {
        self.random_state
    }

    /// Returns the components matrix, shape (n_components, n_features), once fitted.
    pub fn components(&self) -> Option<&Array2<f64>> {
        self.components.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.components.is_some()
    }

    pub fn diagnostics(&self) -> Option<&FitDiagnostics> {
        self.diagnostics.as_ref()
    }

    /// Variance of the (deflated) training data along each component.
    pub fn explained_variance(&self) -> Option<Array1<f64>> {
        self.diagnostics.as_ref().map(FitDiagnostics::explained_variance)
    }

    /// Share of the total training variance captured by each component.
    pub fn explained_variance_ratio(&self) -> Option<Array1<f64>> {
        self.diagnostics
            .as_ref()
            .map(FitDiagnostics::explained_variance_ratio)
    }

    /// Ascent steps spent on each component during the last fit.
    pub fn iterations_used(&self) -> Option<Vec<usize>> {
        self.diagnostics.as_ref().map(FitDiagnostics::iterations_used)
    }

    /// Fits the components to `x` with learning rate `eta` and at most `n_iters` ascent
    /// steps per component.
    ///
    /// Initial directions come from the seed set by [`with_seed`](Self::with_seed), or from
    /// OS entropy when no seed is set. On error the previously fitted state is kept.
    ///
    /// * `x` - Input data, shape (n_samples, n_features).
    ///
    /// # Errors
    /// [`PcaError::InvalidArgument`] if `x` is empty, has fewer features than
    /// `n_components`, or if `eta`/`n_iters` are not positive.
    pub fn fit(&mut self, x: ArrayView2<f64>, eta: f64, n_iters: usize) -> Result<&mut Self> {
        let mut rng = match self.random_state {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.fit_with_rng(x, eta, n_iters, &mut rng)
    }

    /// Same as [`fit`](Self::fit) but draws initial directions from `rng`.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &mut self,
        x: ArrayView2<f64>,
        eta: f64,
        n_iters: usize,
        rng: &mut R,
    ) -> Result<&mut Self> {
        let config = GradientAscentConfig {
            eta,
            n_iters,
            epsilon: CONVERGENCE_EPSILON,
        };
        self.fit_with_config(x, &config, rng)
    }

    /// Fits the components with explicit ascent parameters.
    ///
    /// Centers a private copy of `x`, then repeats for each component: draw a uniform
    /// [0, 1) starting vector, run the ascent on the current data, store the direction,
    /// and deflate the data along it. The new state is committed only after every
    /// component has been extracted.
    pub fn fit_with_config<R: Rng + ?Sized>(
        &mut self,
        x: ArrayView2<f64>,
        config: &GradientAscentConfig,
        rng: &mut R,
    ) -> Result<&mut Self> {
        config.validate()?;
        let (n_samples, n_features) = x.dim();
        if n_samples == 0 || n_features == 0 {
            return Err(PcaError::InvalidArgument(
                "input has zero samples or zero features".into(),
            ));
        }
        if self.n_components > n_features {
            return Err(PcaError::InvalidArgument(format!(
                "n_components ({}) must not be greater than the number of features ({})",
                self.n_components, n_features
            )));
        }

        info!(
            "Fitting {} components by gradient ascent on {} samples x {} features (eta={}, n_iters={}).",
            self.n_components, n_samples, n_features, config.eta, config.n_iters
        );
        let fit_start = Instant::now();

        let mut working = demean(x);
        let mut diagnostics = FitDiagnostics::new(total_variance(working.view()));
        let mut components = Array2::<f64>::zeros((self.n_components, n_features));
        let uniform = Uniform::new(0.0, 1.0);
        let mut residual_warned = false;

        for i in 0..self.n_components {
            let initial_w = Array1::random_using(n_features, &uniform, rng);
            let search = first_component(working.view(), initial_w, config);
            debug!(
                "Component {}: {} iterations, converged={}, explained variance {:.6e}",
                i, search.iterations, search.converged, search.objective
            );

            components.row_mut(i).assign(&search.direction);
            deflate(&mut working, search.direction.view());
            diagnostics.push(ComponentDiagnostics::from(&search));

            let remaining = total_variance(working.view());
            if !residual_warned
                && i + 1 < self.n_components
                && remaining <= RESIDUAL_VARIANCE_FLOOR * diagnostics.total_variance
            {
                warn!(
                    "Residual variance is ~0 after {} components; the remaining {} directions are arbitrary.",
                    i + 1,
                    self.n_components - i - 1
                );
                residual_warned = true;
            }
        }

        self.components = Some(components);
        self.diagnostics = Some(diagnostics);
        info!("Gradient PCA fit finished in {:?}", fit_start.elapsed());
        Ok(self)
    }

    /// Fits to `x` and returns the component scores of the centered training data.
    pub fn fit_transform(
        &mut self,
        x: ArrayView2<f64>,
        eta: f64,
        n_iters: usize,
    ) -> Result<Array2<f64>> {
        self.fit(x, eta, n_iters)?;
        self.transform(demean(x).view())
    }

    /// Projects `x` onto the components: `x . components^T`.
    ///
    /// The input is used as given; no centering is applied.
    ///
    /// # Errors
    /// [`PcaError::NotFitted`] before a fit, [`PcaError::DimensionMismatch`] if the number
    /// of columns differs from the number of features the model was fitted on.
    pub fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let components = self.components.as_ref().ok_or(PcaError::NotFitted)?;
        if x.ncols() != components.ncols() {
            return Err(PcaError::DimensionMismatch {
                expected: components.ncols(),
                found: x.ncols(),
            });
        }
        Ok(x.dot(&components.t()))
    }

    /// Maps component scores back to feature space: `x . components`.
    ///
    /// Lossy when `n_components < n_features`.
    ///
    /// # Errors
    /// [`PcaError::NotFitted`] before a fit, [`PcaError::DimensionMismatch`] if the number
    /// of columns differs from `n_components`.
    pub fn inverse_transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let components = self.components.as_ref().ok_or(PcaError::NotFitted)?;
        if x.ncols() != components.nrows() {
            return Err(PcaError::DimensionMismatch {
                expected: components.nrows(),
                found: x.ncols(),
            });
        }
        Ok(x.dot(components))
    }

    /// Saves the fitted model to a file using bincode.
    ///
    /// # Errors
    /// [`PcaError::InvalidArgument`] if the model is not fitted; I/O and encoding
    /// failures otherwise.
    pub fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.components.is_none() {
            return Err(PcaError::InvalidArgument(
                "cannot save a model that has not been fitted".into(),
            ));
        }
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())
            .map_err(|e| PcaError::Serialization(format!("failed to encode model: {}", e)))?;
        writer.flush()?;
        Ok(())
    }

    /// Loads a model written by [`save_model`](Self::save_model) and checks it is usable.
    ///
    /// # Errors
    /// I/O and decoding failures, or [`PcaError::InvalidModel`] if the components are
    /// missing, not unit norm, or inconsistent with `n_components` or the diagnostics.
    pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let model: GradientPCA =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())
                .map_err(|e| PcaError::Serialization(format!("failed to decode model: {}", e)))?;

        let components = model
            .components
            .as_ref()
            .ok_or_else(|| PcaError::InvalidModel("loaded model has no components".into()))?;
        validate_components(components)?;
        if components.nrows() != model.n_components {
            return Err(PcaError::InvalidModel(format!(
                "components matrix has {} rows but n_components is {}",
                components.nrows(),
                model.n_components
            )));
        }
        if let Some(diagnostics) = model.diagnostics.as_ref() {
            if diagnostics.components.len() != model.n_components {
                return Err(PcaError::InvalidModel(format!(
                    "diagnostics cover {} components but n_components is {}",
                    diagnostics.components.len(),
                    model.n_components
                )));
            }
        }
        Ok(model)
    }
}

impl fmt::Display for GradientPCA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PCA(n_components={})", self.n_components)
    }
}

fn validate_components(components: &Array2<f64>) -> Result<()> {
    if components.nrows() == 0 || components.ncols() == 0 {
        return Err(PcaError::InvalidModel(format!(
            "components matrix has shape {:?}",
            components.dim()
        )));
    }
    if components.iter().any(|v| !v.is_finite()) {
        return Err(PcaError::InvalidModel(
            "components matrix contains non-finite values".into(),
        ));
    }
    for (i, row) in components.rows().into_iter().enumerate() {
        let norm = row.dot(&row).sqrt();
        if !approx_eq!(f64, norm, 1.0, epsilon = UNIT_NORM_TOLERANCE) {
            return Err(PcaError::InvalidModel(format!(
                "component {} has norm {}, expected 1",
                i, norm
            )));
        }
    }
    Ok(())
}
