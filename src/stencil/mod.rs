//! Finite-difference derivative estimation and scoring.
//!
//! - `estimators`: two-point, three-point, five-point and parabolic stencils
//! - `score`: RMS error against a closed-form reference

pub mod estimators;
pub mod score;

pub use estimators::*;
pub use score::*;

use crate::domain::{Estimate, Grid, StencilKind};
use crate::error::Result;

/// Estimate `dy/dx` from a sampled grid.
pub trait DerivativeEstimator: Send + Sync {
    fn kind(&self) -> StencilKind;

    /// Smallest grid the stencil accepts.
    fn min_samples(&self) -> usize;

    fn estimate(&self, grid: &Grid) -> Result<Estimate>;
}

/// Build the estimator for `kind`.
///
/// `step` is only used by the five-point stencil.
pub fn estimator_for(kind: StencilKind, step: Option<f64>) -> Box<dyn DerivativeEstimator> {
    match kind {
        StencilKind::TwoPoint => Box::new(TwoPoint),
        StencilKind::ThreePoint => Box::new(ThreePoint),
        StencilKind::FivePoint => Box::new(FivePoint { step }),
        StencilKind::Parabolic => Box::new(Parabolic),
    }
}
