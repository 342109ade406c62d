//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while sampling, estimating and fitting
//! - exported to JSON reports
//! - built from CLI flags without the library touching the environment

use std::path::PathBuf;

use clap::ValueEnum;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{NumericError, Result};

/// Inclusive sampling bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub start: f64,
    pub end: f64,
}

impl Domain {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Number of grid points at pitch `step`, starting at `start`.
    ///
    /// No point lies past `end`; `end` itself is included when the step
    /// divides the domain (up to a relative slack of `1e-12`).
    pub fn sample_count(&self, step: f64) -> Result<usize> {
        if !(self.start.is_finite() && self.end.is_finite()) || self.end < self.start {
            return Err(NumericError::invalid(format!(
                "Invalid domain: start={}, end={} (must be finite and start<=end).",
                self.start, self.end
            )));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(NumericError::invalid(format!(
                "Invalid step: {step} (must be finite and >0)."
            )));
        }
        let intervals = ((self.end - self.start) / step * (1.0 + 1e-12)).floor();
        if !intervals.is_finite() || intervals > u32::MAX as f64 {
            return Err(NumericError::invalid(format!(
                "Step {step} is too small for domain [{}, {}].",
                self.start, self.end
            )));
        }
        Ok(intervals as usize + 1)
    }
}

/// Index-aligned `(x, y)` columns.
///
/// A sampled grid has strictly increasing x at a fixed pitch; an estimate
/// reuses the same layout with derivative values in `y`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A grid whose y column holds derivative estimates.
pub type Estimate = Grid;

impl Grid {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(NumericError::ShapeMismatch {
                what: "grid columns".to_string(),
                left: x.len(),
                right: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Spacing between the first two samples, if there are two.
    pub fn leading_step(&self) -> Option<f64> {
        match self.x.as_slice() {
            [a, b, ..] => Some(b - a),
            _ => None,
        }
    }

    pub(crate) fn check_columns(&self) -> Result<()> {
        if self.x.len() != self.y.len() {
            return Err(NumericError::ShapeMismatch {
                what: "grid columns".to_string(),
                left: self.x.len(),
                right: self.y.len(),
            });
        }
        Ok(())
    }
}

/// Closed-form scalar functions available to the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionKind {
    /// `e^{-x^2}`
    Gaussian,
    /// `-2x e^{-x^2}`
    GaussianDerivative,
    /// `sin(x)/x`
    Sinc,
    /// `cos(x)/x - sin(x)/x^2`
    SincDerivative,
}

impl FunctionKind {
    pub fn display_name(self) -> &'static str {
        match self {
            FunctionKind::Gaussian => "gaussian",
            FunctionKind::GaussianDerivative => "gaussian-derivative",
            FunctionKind::Sinc => "sinc",
            FunctionKind::SincDerivative => "sinc-derivative",
        }
    }

    /// The closed-form derivative used as the scoring reference.
    pub fn derivative(self) -> Option<FunctionKind> {
        match self {
            FunctionKind::Gaussian => Some(FunctionKind::GaussianDerivative),
            FunctionKind::Sinc => Some(FunctionKind::SincDerivative),
            FunctionKind::GaussianDerivative | FunctionKind::SincDerivative => None,
        }
    }
}

/// What sinc (and its derivative) return at exactly `x = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SincPolicy {
    /// Fail with a domain error.
    #[default]
    Error,
    /// Use the analytic limits `sinc(0) = 1`, `sinc'(0) = 0`.
    Limit,
}

/// Derivative stencils.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StencilKind {
    TwoPoint,
    ThreePoint,
    FivePoint,
    Parabolic,
}

impl StencilKind {
    pub const ALL: [StencilKind; 4] = [
        StencilKind::TwoPoint,
        StencilKind::ThreePoint,
        StencilKind::FivePoint,
        StencilKind::Parabolic,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            StencilKind::TwoPoint => "two-point",
            StencilKind::ThreePoint => "three-point",
            StencilKind::FivePoint => "five-point",
            StencilKind::Parabolic => "parabolic",
        }
    }
}

/// Built-in parametric models for the fitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// `q0 e^{-(x-q1)^2/q2^2} + q3`
    Gaussian,
    /// `q0 + q1 x`
    Line,
    /// `q0 (x-q1)^2 + q2`
    Parabola,
    /// `q0 + q1 e^{-(q2-x)^2/q3^2} + q4 e^{-(q5-x)^2/q6^2}`
    DoubleGaussian,
}

impl ModelKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Gaussian => "gaussian+offset",
            ModelKind::Line => "line",
            ModelKind::Parabola => "parabola",
            ModelKind::DoubleGaussian => "double gaussian",
        }
    }

    pub fn param_len(self) -> usize {
        match self {
            ModelKind::Gaussian => 4,
            ModelKind::Line => 2,
            ModelKind::Parabola => 3,
            ModelKind::DoubleGaussian => 7,
        }
    }

    /// Starting guess used when none is supplied.
    pub fn default_initial(self) -> Vec<f64> {
        match self {
            ModelKind::Gaussian => vec![300_000.0, 10.0, 10.0, 500.0],
            ModelKind::Line => vec![1.0, 0.0],
            ModelKind::Parabola => vec![1.0, 0.0, 0.0],
            ModelKind::DoubleGaussian => vec![0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Which value the fitter feeds into the model's x slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum XMode {
    /// The dataset's own x-coordinate.
    #[default]
    Actual,
    /// The sample's position in the dataset (`0, 1, 2, ...`).
    Index,
}

/// Terminal state of a steepest-descent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitStatus {
    /// The error dropped to within tolerance.
    Converged,
    /// An accepted step was followed by an error change within tolerance.
    Stalled,
    /// `max_iterations` ran out first.
    Exhausted,
}

impl FitStatus {
    pub fn display_name(self) -> &'static str {
        match self {
            FitStatus::Converged => "converged",
            FitStatus::Stalled => "stalled",
            FitStatus::Exhausted => "exhausted",
        }
    }
}

/// RMS score of one stencil against the closed-form derivative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StencilScore {
    pub stencil: StencilKind,
    pub rms: f64,
    pub samples: usize,
}

/// Exact least-squares solution for linear-in-parameter models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceFit {
    pub params: DVector<f64>,
    pub error: f64,
}

/// Result of a steepest-descent fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOutcome {
    pub status: FitStatus,
    pub params: DVector<f64>,
    /// `0.5 * Σ r_i^2` at `params`.
    pub error: f64,
    /// Step scale at termination.
    pub lambda: f64,
    pub iterations: usize,
    pub reference: Option<ReferenceFit>,
}

impl FitOutcome {
    /// Treat an exhausted run as a hard failure.
    pub fn require_converged(self) -> Result<Self> {
        match self.status {
            FitStatus::Exhausted => Err(NumericError::NonConvergence {
                iterations: self.iterations,
                error: self.error,
            }),
            FitStatus::Converged | FitStatus::Stalled => Ok(self),
        }
    }
}

/// Configuration for a derivative-scoring run (`sfit diff`).
#[derive(Debug, Clone, Serialize)]
pub struct DiffConfig {
    pub function: FunctionKind,
    pub domain: Domain,
    pub step: f64,
    pub sinc_policy: SincPolicy,
    pub stencils: Vec<StencilKind>,
    pub export_grids: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Configuration for a fitting run (`sfit fit`).
#[derive(Debug, Clone, Serialize)]
pub struct FitConfig {
    pub data_path: PathBuf,
    pub model: ModelKind,
    pub initial: Vec<f64>,
    pub max_iterations: usize,
    pub h: f64,
    pub tolerance: f64,
    pub lambda: f64,
    pub x_mode: XMode,
    /// Fail the run (exit code 4) when the fit is exhausted.
    pub strict: bool,
    /// Number of largest residuals to print.
    pub top: usize,
    pub export_json: Option<PathBuf>,
}

/// Configuration for synthetic dataset generation (`sfit synth`).
#[derive(Debug, Clone, Serialize)]
pub struct SynthConfig {
    pub model: ModelKind,
    pub params: Vec<f64>,
    pub domain: Domain,
    pub step: f64,
    /// Standard deviation of additive Gaussian noise.
    pub noise: f64,
    pub seed: u64,
    pub out: PathBuf,
}

/// A saved derivative-scoring run (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffReport {
    pub tool: String,
    pub generated_at: String,
    pub function: FunctionKind,
    pub domain: Domain,
    pub step: f64,
    pub sinc_policy: SincPolicy,
    pub samples: usize,
    pub scores: Vec<StencilScore>,
}

/// A saved fitting run (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    pub tool: String,
    pub generated_at: String,
    pub data_path: PathBuf,
    pub model: ModelKind,
    pub initial: Vec<f64>,
    pub max_iterations: usize,
    pub h: f64,
    pub tolerance: f64,
    pub x_mode: XMode,
    pub rows_used: usize,
    pub rows_skipped: usize,
    pub outcome: FitOutcome,
}
