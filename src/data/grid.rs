//! Evenly spaced sampling of closed-form functions.

use crate::domain::{Domain, FunctionKind, Grid, SincPolicy};
use crate::error::{NumericError, Result};
use crate::math::evaluate;

/// Sample `function` on `domain` at pitch `step`.
///
/// `x[i] = start + i * step` for every `x[i] <= end`; the pitch is applied by
/// multiplication so the x column does not accumulate rounding drift.
pub fn sample(
    function: FunctionKind,
    domain: Domain,
    step: f64,
    policy: SincPolicy,
) -> Result<Grid> {
    let n = domain.sample_count(step)?;
    let mut grid = Grid::with_capacity(n);

    for i in 0..n {
        let x = domain.start + i as f64 * step;
        let y = evaluate(function, x, policy)
            .filter(|y| y.is_finite())
            .ok_or_else(|| NumericError::DomainError {
                function: function.display_name().to_string(),
                x,
                index: i,
            })?;
        grid.push(x, y);
    }

    Ok(grid)
}

/// Sample `function` and its closed-form derivative on the same grid.
pub fn sample_with_reference(
    function: FunctionKind,
    domain: Domain,
    step: f64,
    policy: SincPolicy,
) -> Result<(Grid, Grid)> {
    let derivative = function.derivative().ok_or_else(|| {
        NumericError::invalid(format!(
            "{} has no closed-form derivative to score against.",
            function.display_name()
        ))
    })?;
    let values = sample(function, domain, step, policy)?;
    let reference = sample(derivative, domain, step, policy)?;
    Ok((values, reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_on_unit_domain_has_five_points() {
        let grid = sample(
            FunctionKind::Gaussian,
            Domain::new(-1.0, 1.0),
            0.5,
            SincPolicy::Error,
        )
        .unwrap();
        assert_eq!(grid.x, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        for (x, y) in grid.points() {
            assert_eq!(y, (-(x * x)).exp());
        }
    }

    #[test]
    fn uneven_steps_never_sample_past_the_end() {
        let domain = Domain::new(0.0, 1.0);
        let grid = sample(FunctionKind::Gaussian, domain, 0.4, SincPolicy::Error).unwrap();
        assert_eq!(grid.x, vec![0.0, 0.4, 0.8]);

        for step in [0.3, 0.4, 0.7, 0.15] {
            let grid = sample(FunctionKind::Gaussian, domain, step, SincPolicy::Error).unwrap();
            assert!(grid.x.iter().all(|&x| x <= domain.end), "step={step}: {:?}", grid.x);
            assert!(domain.end - grid.x[grid.len() - 1] < step);
        }
    }

    #[test]
    fn sinc_through_zero_reports_the_offending_sample() {
        let err = sample(
            FunctionKind::Sinc,
            Domain::new(-1.0, 1.0),
            0.5,
            SincPolicy::Error,
        )
        .unwrap_err();
        match err {
            NumericError::DomainError { function, x, index } => {
                assert_eq!(function, "sinc");
                assert_eq!(x, 0.0);
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sinc_limit_policy_fills_zero() {
        let (values, reference) = sample_with_reference(
            FunctionKind::Sinc,
            Domain::new(-1.0, 1.0),
            0.5,
            SincPolicy::Limit,
        )
        .unwrap();
        assert_eq!(values.y[2], 1.0);
        assert_eq!(reference.y[2], 0.0);
    }

    #[test]
    fn derivative_functions_have_no_reference() {
        let err = sample_with_reference(
            FunctionKind::GaussianDerivative,
            Domain::new(0.0, 1.0),
            0.1,
            SincPolicy::Error,
        )
        .unwrap_err();
        assert!(matches!(err, NumericError::InvalidArgument(_)));
    }
}
