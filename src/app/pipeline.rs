//! Shared run logic behind the CLI subcommands.
//!
//! Keeping this in one place separates the workflow from presentation:
//! - diff: sample -> estimate (each stencil) -> score
//! - fit:  load dataset -> descend -> residuals
//!
//! `app` then only prints and exports.

use crate::data::sample_with_reference;
use crate::domain::{DiffConfig, Estimate, FitConfig, FitOutcome, Grid, StencilKind, StencilScore};
use crate::error::AppError;
use crate::fit::{FitOptions, fit};
use crate::io::{Dataset, load_dataset};
use crate::models::model_for;
use crate::report::{Residual, compute_residuals};
use crate::stencil::estimate_and_score;

/// All computed outputs of a single `sfit diff` run.
#[derive(Debug, Clone)]
pub struct DiffRun {
    pub values: Grid,
    pub reference: Grid,
    pub estimates: Vec<(StencilKind, Estimate)>,
    pub scores: Vec<StencilScore>,
}

/// All computed outputs of a single `sfit fit` run.
#[derive(Debug, Clone)]
pub struct FitRun {
    pub dataset: Dataset,
    pub outcome: FitOutcome,
    pub residuals: Vec<Residual>,
}

/// Sample, estimate and score.
pub fn run_diff(config: &DiffConfig) -> Result<DiffRun, AppError> {
    let (values, reference) =
        sample_with_reference(config.function, config.domain, config.step, config.sinc_policy)?;
    log::info!(
        "sampled {} on [{}, {}] (n={})",
        config.function.display_name(),
        config.domain.start,
        config.domain.end,
        values.len()
    );

    let scored = estimate_and_score(&values, &reference, &config.stencils, Some(config.step))?;
    let (estimates, scores) = scored
        .into_iter()
        .map(|(estimate, score)| ((score.stencil, estimate), score))
        .unzip();

    Ok(DiffRun {
        values,
        reference,
        estimates,
        scores,
    })
}

/// Load the dataset and fit the configured model.
pub fn run_fit(config: &FitConfig) -> Result<FitRun, AppError> {
    let dataset = load_dataset(&config.data_path)?;
    run_fit_with_dataset(config, dataset)
}

/// Fit an already loaded dataset.
pub fn run_fit_with_dataset(config: &FitConfig, dataset: Dataset) -> Result<FitRun, AppError> {
    let model = model_for(config.model);
    let opts = FitOptions {
        max_iterations: config.max_iterations,
        h: config.h,
        tolerance: config.tolerance,
        initial_lambda: config.lambda,
        x_mode: config.x_mode,
    };

    let mut outcome = fit(model.as_ref(), &dataset.points, &config.initial, &opts)?;
    if config.strict {
        outcome = outcome.require_converged()?;
    }

    let residuals =
        compute_residuals(model.as_ref(), &dataset.points, &outcome.params, config.x_mode);

    Ok(FitRun {
        dataset,
        outcome,
        residuals,
    })
}
