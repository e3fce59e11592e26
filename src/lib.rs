// Principal component analysis (PCA) by gradient ascent

#![doc = include_str!("../README.md")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gradient_ascent;
pub mod linalg;
mod pca;


pub use config::{
    GradientAscentConfig, GradientAscentConfigBuilder, CONVERGENCE_EPSILON, DEFAULT_ETA,
    DEFAULT_N_ITERS,
};
pub use diagnostics::{ComponentDiagnostics, FitDiagnostics};
pub use error::{PcaError, Result};
pub use gradient_ascent::{first_component, ComponentSearch};
pub use pca::GradientPCA;
