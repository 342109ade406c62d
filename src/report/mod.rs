//! Reporting utilities: residuals and formatted terminal output.

pub mod format;

pub use format::*;

use nalgebra::DVector;

use crate::domain::{Grid, XMode};
use crate::fit::model_x;
use crate::models::{ParamVector, ParametricModel};

/// Observation vs fitted value at one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Residual {
    pub index: usize,
    pub x: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    pub residual: f64,
}

/// Fitted values and residuals for each observation, in dataset order.
pub fn compute_residuals(
    model: &dyn ParametricModel,
    data: &Grid,
    q: &DVector<f64>,
    x_mode: XMode,
) -> Vec<Residual> {
    let base = ParamVector::new(0.0, q.clone());
    data.points()
        .enumerate()
        .map(|(index, (x, y_obs))| {
            let y_fit = model.eval(&base.at(model_x(x_mode, index, x)));
            Residual {
                index,
                x,
                y_obs,
                y_fit,
                residual: y_obs - y_fit,
            }
        })
        .collect()
}

/// The `top_n` residuals with the largest magnitude, largest first.
pub fn largest_residuals(residuals: &[Residual], top_n: usize) -> Vec<Residual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}
