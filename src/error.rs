// src/error.rs

use thiserror::Error;

/// The error type for gradient PCA operations.
#[derive(Debug, Error)]
pub enum PcaError {
    /// A hyperparameter or input does not satisfy the estimator's contract,
    /// e.g. zero components or more components than features.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input width does not match the fitted components.
    #[error("dimension mismatch: expected {expected} columns, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Projection was requested before `fit`, so there is no shape to compare against.
    #[error("dimension mismatch: model is not fitted, no components shape is available")]
    NotFitted,

    /// A loaded or externally supplied model failed validation.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PcaError {
    /// True for both shape mismatches and projections attempted on an unfitted model.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, PcaError::DimensionMismatch { .. } | PcaError::NotFitted)
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PcaError::InvalidArgument(_))
    }
}

/// Convenience alias for results carrying a [`PcaError`].
pub type Result<T> = std::result::Result<T, PcaError>;
