//! Steepest-descent curve fitting.
//!
//! Responsibilities:
//!
//! - five-point partial derivatives in parameter space (`gradient`)
//! - the descent loop with step halving and stall detection (`fitter`)
//! - a closed-form least-squares reference for linear models

pub mod fitter;
pub mod gradient;

pub use fitter::*;
pub use gradient::*;
