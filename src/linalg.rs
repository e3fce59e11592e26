// src/linalg.rs

//! Dense helpers on top of `ndarray` used by the fit loop: centering, the
//! projected-variance objective and its gradient, unit normalization and deflation.

use crate::error::{PcaError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

/// Per-column mean over all rows. Returns zeros when there are no rows.
pub fn column_means(x: ArrayView2<f64>) -> Array1<f64> {
    x.mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(x.ncols()))
}

/// Returns an owned copy of `x` with every column centered on zero.
pub fn demean(x: ArrayView2<f64>) -> Array2<f64> {
    let means = column_means(x);
    let mut centered = x.to_owned();
    centered -= &means;
    centered
}

/// Variance of the projection of `xc` onto `w`: `(1/n) * sum((xc . w)^2)`.
pub fn objective(xc: ArrayView2<f64>, w: ArrayView1<f64>) -> f64 {
    let projected = xc.dot(&w);
    projected.dot(&projected) / xc.nrows() as f64
}

/// Gradient of [`objective`] with respect to `w`: `(2/n) * xc^T (xc . w)`.
pub fn gradient(xc: ArrayView2<f64>, w: ArrayView1<f64>) -> Array1<f64> {
    let projected = xc.dot(&w);
    let mut grad = xc.t().dot(&projected);
    grad *= 2.0 / xc.nrows() as f64;
    grad
}

/// Scales `w` onto the unit sphere. A zero or non-finite norm leaves `w` untouched.
pub fn direction(mut w: Array1<f64>) -> Array1<f64> {
    let norm = w.dot(&w).sqrt();
    if norm > 0.0 && norm.is_finite() {
        w /= norm;
    }
    w
}

/// Removes from every row of `xc` its component along the unit vector `w`.
pub fn deflate(xc: &mut Array2<f64>, w: ArrayView1<f64>) {
    let projections = xc.dot(&w);
    Zip::from(xc.rows_mut())
        .and(&projections)
        .for_each(|mut row, &p| row.scaled_add(-p, &w));
}

/// Sum of the per-column variances of already-centered data (1/n normalisation).
pub fn total_variance(xc: ArrayView2<f64>) -> f64 {
    if xc.nrows() == 0 {
        return 0.0;
    }
    xc.iter().map(|v| v * v).sum::<f64>() / xc.nrows() as f64
}

/// Mean squared element-wise difference between two equally shaped matrices.
///
/// # Errors
/// [`PcaError::InvalidArgument`] if the shapes differ or the matrices are empty.
pub fn reconstruction_error(
    original: ArrayView2<f64>,
    reconstructed: ArrayView2<f64>,
) -> Result<f64> {
    if original.dim() != reconstructed.dim() {
        return Err(PcaError::InvalidArgument(format!(
            "cannot compare matrices of shape {:?} and {:?}",
            original.dim(),
            reconstructed.dim()
        )));
    }
    if original.is_empty() {
        return Err(PcaError::InvalidArgument(
            "cannot compute reconstruction error of an empty matrix".into(),
        ));
    }
    let sum_sq: f64 = Zip::from(&original)
        .and(&reconstructed)
        .fold(0.0, |acc, &a, &b| acc + (a - b).powi(2));
    Ok(sum_sq / original.len() as f64)
}
