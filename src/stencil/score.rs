//! RMS scoring of stencil estimates against a closed-form derivative.

use rayon::prelude::*;

use crate::data::sample_with_reference;
use crate::domain::{Domain, Estimate, FunctionKind, Grid, SincPolicy, StencilKind, StencilScore};
use crate::error::{NumericError, Result};
use crate::stencil::estimator_for;

/// `sqrt(mean(|reference.y - estimate.y|^2))` over index-aligned grids.
///
/// Only the y columns are compared; the two-point stencil's shifted x column
/// is not taken into account.
pub fn rms_error(reference: &Estimate, estimate: &Estimate) -> Result<f64> {
    if reference.len() != estimate.len() {
        return Err(NumericError::ShapeMismatch {
            what: "rms error inputs".to_string(),
            left: reference.len(),
            right: estimate.len(),
        });
    }
    if reference.is_empty() {
        return Err(NumericError::InsufficientSamples {
            stencil: "rms error".to_string(),
            required: 1,
            actual: 0,
        });
    }

    let sum: f64 = reference
        .y
        .iter()
        .zip(estimate.y.iter())
        .map(|(r, e)| (r - e).abs().powi(2))
        .sum();
    Ok((sum / estimate.len() as f64).sqrt())
}

/// Sample `function`, run each stencil, and score it against the closed-form
/// derivative.
///
/// Scores come back in the order of `stencils`.
pub fn score_stencils(
    function: FunctionKind,
    domain: Domain,
    step: f64,
    policy: SincPolicy,
    stencils: &[StencilKind],
) -> Result<Vec<StencilScore>> {
    let (values, reference) = sample_with_reference(function, domain, step, policy)?;
    let scored = estimate_and_score(&values, &reference, stencils, Some(step))?;
    Ok(scored.into_iter().map(|(_, score)| score).collect())
}

/// Run each stencil on `values` and score it against `reference`.
///
/// Stencils run in parallel; results keep the order of `stencils`.
pub fn estimate_and_score(
    values: &Grid,
    reference: &Grid,
    stencils: &[StencilKind],
    step: Option<f64>,
) -> Result<Vec<(Estimate, StencilScore)>> {
    stencils
        .par_iter()
        .map(|&kind| -> Result<(Estimate, StencilScore)> {
            let estimate = estimator_for(kind, step).estimate(values)?;
            let rms = rms_error(reference, &estimate)?;
            log::debug!("{}: rms={rms:e} (n={})", kind.display_name(), values.len());
            let score = StencilScore {
                stencil: kind,
                rms,
                samples: values.len(),
            };
            Ok((estimate, score))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_of_a_grid_with_itself_is_zero() {
        let g = Grid::new(vec![0.0, 1.0, 2.0], vec![0.3, -1.7, 4.2]).unwrap();
        assert_eq!(rms_error(&g, &g).unwrap(), 0.0);
    }

    #[test]
    fn rms_matches_hand_computation() {
        let a = Grid::new(vec![0.0, 1.0], vec![0.0, 0.0]).unwrap();
        let b = Grid::new(vec![0.0, 1.0], vec![3.0, 4.0]).unwrap();
        let rms = rms_error(&a, &b).unwrap();
        assert!((rms - (12.5f64).sqrt()).abs() < 1e-15);
    }

    #[test]
    fn rms_rejects_mismatched_lengths() {
        let a = Grid::new(vec![0.0, 1.0], vec![0.0, 0.0]).unwrap();
        let b = Grid::new(vec![0.0], vec![0.0]).unwrap();
        assert!(matches!(
            rms_error(&a, &b),
            Err(NumericError::ShapeMismatch { left: 2, right: 1, .. })
        ));
        assert!(matches!(
            rms_error(&b, &a),
            Err(NumericError::ShapeMismatch { left: 1, right: 2, .. })
        ));
    }

    #[test]
    fn score_order_follows_request() {
        let stencils = [StencilKind::Parabolic, StencilKind::TwoPoint];
        let scores = score_stencils(
            FunctionKind::Gaussian,
            Domain::new(-3.0, 3.0),
            0.1,
            SincPolicy::Error,
            &stencils,
        )
        .unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].stencil, StencilKind::Parabolic);
        assert_eq!(scores[1].stencil, StencilKind::TwoPoint);
        assert!(scores.iter().all(|s| s.rms.is_finite() && s.samples == 61));
    }
}
