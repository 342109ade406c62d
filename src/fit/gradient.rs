//! Objective and gradient pieces for steepest descent.
//!
//! Partial derivatives are taken in *parameter* space with the five-point
//! stencil:
//!
//! ```text
//! ∂f/∂q_j ≈ (-f(q_j+2h) + 8 f(q_j+h) - 8 f(q_j-h) + f(q_j-2h)) / (12h)
//! ```

use nalgebra::DVector;
use rayon::prelude::*;

use crate::domain::{Grid, XMode};
use crate::models::{ParamVector, ParametricModel};

/// Five-point estimate of `∂model/∂q[index]` at `p`.
pub fn partial_derivative(
    model: &dyn ParametricModel,
    p: &ParamVector,
    index: usize,
    h: f64,
) -> f64 {
    let f_p2 = model.eval(&p.perturbed(index, 2.0 * h));
    let f_p1 = model.eval(&p.perturbed(index, h));
    let f_m1 = model.eval(&p.perturbed(index, -h));
    let f_m2 = model.eval(&p.perturbed(index, -2.0 * h));
    (-f_p2 + 8.0 * f_p1 - 8.0 * f_m1 + f_m2) / (12.0 * h)
}

/// The value placed in the model's x slot for sample `index`.
pub fn model_x(x_mode: XMode, index: usize, x: f64) -> f64 {
    match x_mode {
        XMode::Actual => x,
        XMode::Index => index as f64,
    }
}

/// `0.5 * Σ (y_i - model(x_i, q))^2`.
pub fn sum_squared_error(
    model: &dyn ParametricModel,
    data: &Grid,
    q: &DVector<f64>,
    x_mode: XMode,
) -> f64 {
    let base = ParamVector::new(0.0, q.clone());
    let total: f64 = data
        .points()
        .enumerate()
        .map(|(i, (x, y))| {
            let r = y - model.eval(&base.at(model_x(x_mode, i, x)));
            r * r
        })
        .sum();
    0.5 * total
}

/// Directional error gradient `g_j = Σ_i r_i ∂model/∂q_j`.
///
/// `q + λ g` moves down the error surface for small `λ`. Samples are reduced
/// in parallel, so the last bits may vary with the thread schedule.
pub fn directional_gradient(
    model: &dyn ParametricModel,
    data: &Grid,
    q: &DVector<f64>,
    h: f64,
    x_mode: XMode,
) -> DVector<f64> {
    let base = ParamVector::new(0.0, q.clone());
    let k = q.len();

    (0..data.len())
        .into_par_iter()
        .map(|i| {
            let p = base.at(model_x(x_mode, i, data.x[i]));
            let r = data.y[i] - model.eval(&p);
            DVector::from_fn(k, |j, _| r * partial_derivative(model, &p, j, h))
        })
        .reduce(|| DVector::zeros(k), |a, b| a + b)
}
