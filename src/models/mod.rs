//! Parametric models for steepest-descent fitting.
//!
//! Models are small, pure evaluators so that the fitter can stay generic.

pub mod model;

pub use model::*;
