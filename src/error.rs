//! Error types.
//!
//! Two layers:
//!
//! - [`NumericError`]: typed failures raised by the numeric library code
//!   (sampling, stencils, scoring, fitting).
//! - [`AppError`]: what the binary reports, carrying a process exit code.

use thiserror::Error;

/// Failures raised by sampling, stencil estimation, scoring and fitting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    /// A function was evaluated outside its domain (e.g. sinc at `x = 0`).
    #[error("{function} is undefined at x={x} (sample index {index})")]
    DomainError {
        function: String,
        x: f64,
        index: usize,
    },
    /// A stencil (or fit) was requested on too few samples.
    #[error("{stencil} needs at least {required} samples, got {actual}")]
    InsufficientSamples {
        stencil: String,
        required: usize,
        actual: usize,
    },
    /// Two index-aligned inputs have different lengths.
    #[error("{what}: length mismatch ({left} vs {right})")]
    ShapeMismatch {
        what: String,
        left: usize,
        right: usize,
    },
    /// The fitter ran out of iterations. Only raised on request.
    #[error("no convergence after {iterations} iterations (error={error:e})")]
    NonConvergence { iterations: usize, error: f64 },
    #[error("{0}")]
    InvalidArgument(String),
}

impl NumericError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T, E = NumericError> = std::result::Result<T, E>;

/// Error reported by the `sfit` binary.
///
/// Exit codes:
/// - `2`: usage, configuration or I/O problems
/// - `3`: no usable data
/// - `4`: numeric failures
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<NumericError> for AppError {
    fn from(err: NumericError) -> Self {
        let code = match err {
            NumericError::InvalidArgument(_) => 2,
            _ => 4,
        };
        AppError::new(code, err.to_string())
    }
}
