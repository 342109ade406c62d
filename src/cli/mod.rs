//! Command-line parsing for `sfit`.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! numeric code. Arguments are converted into the plain config structs in
//! `domain` by `app::*_config_from_args`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{FunctionKind, ModelKind, SincPolicy, StencilKind, XMode};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "sfit",
    version,
    about = "Finite-difference derivatives and steepest-descent curve fitting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sample a function, estimate its derivative with each stencil, and print RMS errors.
    Diff(DiffArgs),
    /// Fit a parametric model to an `x y` dataset by steepest descent.
    Fit(FitArgs),
    /// Write a synthetic noisy dataset for a built-in model.
    Synth(SynthArgs),
}

/// Options for derivative scoring.
#[derive(Debug, Args, Clone)]
pub struct DiffArgs {
    /// Function to sample (its closed-form derivative is the reference).
    #[arg(short = 'f', long, value_enum, default_value_t = FunctionKind::Gaussian)]
    pub function: FunctionKind,

    /// Domain start.
    #[arg(long, default_value_t = -100.0, allow_hyphen_values = true)]
    pub start: f64,

    /// Domain end (inclusive).
    #[arg(long, default_value_t = 100.0, allow_hyphen_values = true)]
    pub end: f64,

    /// Grid spacing.
    #[arg(long, default_value_t = 0.1)]
    pub step: f64,

    /// Behaviour of sinc at x = 0.
    #[arg(long = "sinc-at-zero", value_enum, default_value_t = SincPolicy::Error)]
    pub sinc_at_zero: SincPolicy,

    /// Stencils to run (comma separated). Defaults to all four.
    #[arg(long = "stencil", value_enum, value_delimiter = ',')]
    pub stencils: Vec<StencilKind>,

    /// Write sampled values, the reference derivative and each estimate as text files into DIR.
    #[arg(long = "export-grids", value_name = "DIR")]
    pub export_grids: Option<PathBuf>,

    /// Write a JSON report.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for fitting.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Dataset file (`x y` per line).
    #[arg(short = 'd', long, env = "SFIT_DATA")]
    pub data: PathBuf,

    /// Model to fit.
    #[arg(short = 'm', long, value_enum, default_value_t = ModelKind::Gaussian)]
    pub model: ModelKind,

    /// Initial parameters q0,q1,... (defaults depend on the model).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub init: Vec<f64>,

    /// Maximum number of descent iterations.
    #[arg(long, default_value_t = 10_000)]
    pub iterations: usize,

    /// Parameter-space step for five-point partial derivatives.
    #[arg(long, default_value_t = 1e-7)]
    pub h: f64,

    /// Convergence / stall tolerance on the error.
    #[arg(long, default_value_t = 1e-100)]
    pub tolerance: f64,

    /// Initial step scale (halved on every rejected step).
    #[arg(long, default_value_t = 1.0)]
    pub lambda: f64,

    /// Feed the model the dataset x (`actual`) or the row index (`index`).
    #[arg(long = "x-mode", value_enum, default_value_t = XMode::Actual)]
    pub x_mode: XMode,

    /// Exit with an error when the fit runs out of iterations.
    #[arg(long)]
    pub strict: bool,

    /// Show the N largest residuals.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Write a JSON report.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for synthetic dataset generation.
#[derive(Debug, Args, Clone)]
pub struct SynthArgs {
    /// Model to sample.
    #[arg(short = 'm', long, value_enum, default_value_t = ModelKind::Gaussian)]
    pub model: ModelKind,

    /// Model parameters q0,q1,... (defaults depend on the model).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub params: Vec<f64>,

    /// Domain start.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub start: f64,

    /// Domain end (inclusive).
    #[arg(long, default_value_t = 40.0, allow_hyphen_values = true)]
    pub end: f64,

    /// Grid spacing.
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,

    /// Standard deviation of additive Gaussian noise.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output file.
    #[arg(short = 'o', long)]
    pub out: PathBuf,
}
