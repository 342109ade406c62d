//! Closed-form reference functions.
//!
//! - `gaussian(x) = e^{-x^2}`, `gaussian'(x) = -2x e^{-x^2}`
//! - `sinc(x) = sin(x)/x`, `sinc'(x) = cos(x)/x - sin(x)/x^2`
//!
//! Numerical notes:
//! - For small `|x|` both sinc forms suffer from cancellation, so we switch to a
//!   Taylor series below `SMALL_X`.
//! - At exactly `x = 0` sinc is undefined; callers choose a `SincPolicy`.

use crate::domain::{FunctionKind, SincPolicy};

/// Threshold below which the sinc forms use a series approximation.
const SMALL_X: f64 = 1e-4;

pub fn gaussian(x: f64) -> f64 {
    (-(x * x)).exp()
}

pub fn gaussian_derivative(x: f64) -> f64 {
    -2.0 * x * (-(x * x)).exp()
}

/// `sin(x)/x`, or `None` at `x = 0`.
pub fn sinc(x: f64) -> Option<f64> {
    if x == 0.0 {
        return None;
    }
    if x.abs() < SMALL_X {
        // 1 - x^2/6 + x^4/120
        let x2 = x * x;
        return Some(1.0 - x2 / 6.0 + x2 * x2 / 120.0);
    }
    Some(x.sin() / x)
}

/// `cos(x)/x - sin(x)/x^2`, or `None` at `x = 0`.
pub fn sinc_derivative(x: f64) -> Option<f64> {
    if x == 0.0 {
        return None;
    }
    if x.abs() < SMALL_X {
        // -x/3 + x^3/30
        return Some(-x / 3.0 + x * x * x / 30.0);
    }
    Some(x.cos() / x - x.sin() / (x * x))
}

/// Evaluate `kind` at `x`.
///
/// Returns `None` where the function is undefined under `policy`.
pub fn evaluate(kind: FunctionKind, x: f64, policy: SincPolicy) -> Option<f64> {
    match kind {
        FunctionKind::Gaussian => Some(gaussian(x)),
        FunctionKind::GaussianDerivative => Some(gaussian_derivative(x)),
        FunctionKind::Sinc => sinc(x).or(match policy {
            SincPolicy::Error => None,
            SincPolicy::Limit => Some(1.0),
        }),
        FunctionKind::SincDerivative => sinc_derivative(x).or(match policy {
            SincPolicy::Error => None,
            SincPolicy::Limit => Some(0.0),
        }),
    }
}
