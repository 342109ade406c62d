//! Steepest-descent least-squares fitting for a parametric model.
//!
//! Given:
//! - observations `(x_i, y_i)`
//! - a model `f(x; q)` and a starting `q`
//!
//! each iteration proposes `q' = q + λ g`, where `g` is the directional error
//! gradient from [`directional_gradient`], and then:
//!
//! - stops (`Converged`) once the error is within tolerance
//! - stops (`Stalled`) when the error barely moves right after an accepted step
//! - rejects a worsening step and halves `λ`
//! - accepts an improving step
//!
//! Running out of iterations is a normal outcome (`Exhausted`), not an error.

use nalgebra::DVector;

use crate::domain::{FitOutcome, FitStatus, Grid, ReferenceFit, XMode};
use crate::error::{NumericError, Result};
use crate::fit::gradient::{directional_gradient, model_x, sum_squared_error};
use crate::math::fit_design_rows;
use crate::models::ParametricModel;

/// Knobs for a single descent run.
#[derive(Debug, Clone)]
pub struct FitOptions {
    pub max_iterations: usize,
    /// Parameter-space step for the five-point partial derivatives.
    pub h: f64,
    /// Used both as the convergence threshold and the stall threshold.
    pub tolerance: f64,
    /// Starting step scale `λ`.
    pub initial_lambda: f64,
    pub x_mode: XMode,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            h: 1e-7,
            tolerance: 1e-100,
            initial_lambda: 1.0,
            x_mode: XMode::Actual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastStep {
    None,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone)]
struct FitState {
    q: DVector<f64>,
    error: f64,
    lambda: f64,
    last_step: LastStep,
}

impl FitState {
    fn finish(self, status: FitStatus, iterations: usize) -> FitOutcome {
        FitOutcome {
            status,
            params: self.q,
            error: self.error,
            lambda: self.lambda,
            iterations,
            reference: None,
        }
    }
}

/// Fit `model` to `data` by steepest descent starting from `initial`.
pub fn fit(
    model: &dyn ParametricModel,
    data: &Grid,
    initial: &[f64],
    opts: &FitOptions,
) -> Result<FitOutcome> {
    validate(model, data, initial, opts)?;

    let q = DVector::from_column_slice(initial);
    let error = sum_squared_error(model, data, &q, opts.x_mode);
    if !error.is_finite() {
        return Err(NumericError::DomainError {
            function: model.name().to_string(),
            x: f64::NAN,
            index: 0,
        });
    }
    log::debug!("{}: initial error {error:e}", model.name());

    let mut state = FitState {
        q,
        error,
        lambda: opts.initial_lambda,
        last_step: LastStep::None,
    };

    for iter in 0..opts.max_iterations {
        if state.error <= opts.tolerance {
            log::info!(
                "{}: converged after {iter} iterations (error={:e})",
                model.name(),
                state.error
            );
            return Ok(with_reference(state.finish(FitStatus::Converged, iter), model, data, opts));
        }

        let g = directional_gradient(model, data, &state.q, opts.h, opts.x_mode);
        let proposal = &state.q + &g * state.lambda;
        let new_error = sum_squared_error(model, data, &proposal, opts.x_mode);

        let unchanged = (new_error - state.error).abs() <= opts.tolerance;
        if unchanged && state.last_step == LastStep::Accepted {
            log::info!(
                "{}: stalled after {} iterations (error={new_error:e}, change<={:e})",
                model.name(),
                iter + 1,
                opts.tolerance
            );
            let stalled = FitState {
                q: proposal,
                error: new_error,
                ..state
            };
            let outcome = stalled.finish(FitStatus::Stalled, iter + 1);
            return Ok(with_reference(outcome, model, data, opts));
        }

        if !new_error.is_finite() || new_error > state.error {
            state.lambda /= 2.0;
            state.last_step = LastStep::Rejected;
            log::debug!(
                "iter {iter}: rejected (error {new_error:e}), lambda -> {:e}",
                state.lambda
            );
        } else if new_error < state.error {
            state.q = proposal;
            state.error = new_error;
            state.last_step = LastStep::Accepted;
            log::debug!("iter {iter}: accepted, error -> {new_error:e}");
        }
    }

    let status = if state.error <= opts.tolerance {
        FitStatus::Converged
    } else {
        log::warn!(
            "{}: no convergence after {} iterations (error={:e})",
            model.name(),
            opts.max_iterations,
            state.error
        );
        FitStatus::Exhausted
    };
    Ok(with_reference(state.finish(status, opts.max_iterations), model, data, opts))
}

fn validate(
    model: &dyn ParametricModel,
    data: &Grid,
    initial: &[f64],
    opts: &FitOptions,
) -> Result<()> {
    data.check_columns()?;
    if data.is_empty() {
        return Err(NumericError::InsufficientSamples {
            stencil: "steepest descent".to_string(),
            required: 1,
            actual: 0,
        });
    }
    if initial.len() != model.param_len() {
        return Err(NumericError::ShapeMismatch {
            what: format!("{} initial parameters", model.name()),
            left: initial.len(),
            right: model.param_len(),
        });
    }
    if !(opts.h.is_finite() && opts.h > 0.0) {
        return Err(NumericError::invalid(format!(
            "Invalid derivative step h={} (must be >0).",
            opts.h
        )));
    }
    if !(opts.tolerance >= 0.0) {
        return Err(NumericError::invalid(format!(
            "Invalid tolerance {} (must be >=0).",
            opts.tolerance
        )));
    }
    if !(opts.initial_lambda.is_finite() && opts.initial_lambda > 0.0) {
        return Err(NumericError::invalid(format!(
            "Invalid step scale lambda={} (must be >0).",
            opts.initial_lambda
        )));
    }
    Ok(())
}

/// Attach the closed-form least-squares solution when the model is linear in `q`.
fn with_reference(
    mut outcome: FitOutcome,
    model: &dyn ParametricModel,
    data: &Grid,
    opts: &FitOptions,
) -> FitOutcome {
    outcome.reference = closed_form_reference(model, data, opts.x_mode);
    outcome
}

/// Exact least-squares fit for models exposing a design row.
pub fn closed_form_reference(
    model: &dyn ParametricModel,
    data: &Grid,
    x_mode: XMode,
) -> Option<ReferenceFit> {
    let rows: Vec<Vec<f64>> = data
        .x
        .iter()
        .enumerate()
        .map(|(i, &x)| model.design_row(model_x(x_mode, i, x)))
        .collect::<Option<_>>()?;
    let params = fit_design_rows(&rows, &data.y)?;
    let error = sum_squared_error(model, data, &params, x_mode);
    Some(ReferenceFit { params, error })
}
