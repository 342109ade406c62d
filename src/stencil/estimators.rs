//! The four derivative stencils.
//!
//! Boundary policy: indices a stencil cannot reach keep the source grid's own
//! y-value, copied bit-for-bit. Those entries are *not* derivatives; RMS
//! scoring deliberately includes them.

use crate::domain::{Estimate, Grid, StencilKind};
use crate::error::{NumericError, Result};
use crate::stencil::DerivativeEstimator;

fn require_samples(grid: &Grid, stencil: StencilKind, required: usize) -> Result<()> {
    grid.check_columns()?;
    if grid.len() < required {
        return Err(NumericError::InsufficientSamples {
            stencil: stencil.display_name().to_string(),
            required,
            actual: grid.len(),
        });
    }
    Ok(())
}

/// Forward difference reported at the midpoint of each interval.
///
/// The last point has no right neighbour; its x and y are copied from the
/// source.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPoint;

impl DerivativeEstimator for TwoPoint {
    fn kind(&self) -> StencilKind {
        StencilKind::TwoPoint
    }

    fn min_samples(&self) -> usize {
        2
    }

    fn estimate(&self, grid: &Grid) -> Result<Estimate> {
        require_samples(grid, self.kind(), self.min_samples())?;
        let n = grid.len();
        let (x, y) = (&grid.x, &grid.y);

        let mut out = Estimate::with_capacity(n);
        for j in 0..n - 1 {
            out.push((x[j] + x[j + 1]) / 2.0, (y[j + 1] - y[j]) / (x[j + 1] - x[j]));
        }
        out.push(x[n - 1], y[n - 1]);
        Ok(out)
    }
}

/// Central difference over `j-1, j+1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreePoint;

impl DerivativeEstimator for ThreePoint {
    fn kind(&self) -> StencilKind {
        StencilKind::ThreePoint
    }

    fn min_samples(&self) -> usize {
        3
    }

    fn estimate(&self, grid: &Grid) -> Result<Estimate> {
        require_samples(grid, self.kind(), self.min_samples())?;
        let n = grid.len();
        let (x, y) = (&grid.x, &grid.y);

        let mut dy = y.clone();
        for j in 1..n - 1 {
            dy[j] = (y[j + 1] - y[j - 1]) / (x[j + 1] - x[j - 1]);
        }
        Grid::new(x.clone(), dy)
    }
}

/// Fourth-order central difference over `j-2..=j+2`.
///
/// Assumes an evenly spaced grid. `step` overrides the spacing; otherwise
/// `x[1] - x[0]` is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct FivePoint {
    pub step: Option<f64>,
}

impl FivePoint {
    pub fn with_step(step: f64) -> Self {
        Self { step: Some(step) }
    }
}

impl DerivativeEstimator for FivePoint {
    fn kind(&self) -> StencilKind {
        StencilKind::FivePoint
    }

    fn min_samples(&self) -> usize {
        5
    }

    fn estimate(&self, grid: &Grid) -> Result<Estimate> {
        require_samples(grid, self.kind(), self.min_samples())?;
        let h = self.step.or_else(|| grid.leading_step()).unwrap_or(f64::NAN);
        if !(h.is_finite() && h > 0.0) {
            return Err(NumericError::invalid(format!(
                "five-point stencil needs a positive finite step, got {h}"
            )));
        }

        let n = grid.len();
        let y = &grid.y;
        let mut dy = y.clone();
        for j in 2..n - 2 {
            dy[j] = (-y[j + 2] + 8.0 * y[j + 1] - 8.0 * y[j - 1] + y[j - 2]) / (12.0 * h);
        }
        Grid::new(grid.x.clone(), dy)
    }
}

/// Derivative of the quadratic through `j-1, j, j+1`, taken at `x[j]`.
///
/// Works on unevenly spaced grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parabolic;

impl DerivativeEstimator for Parabolic {
    fn kind(&self) -> StencilKind {
        StencilKind::Parabolic
    }

    fn min_samples(&self) -> usize {
        3
    }

    fn estimate(&self, grid: &Grid) -> Result<Estimate> {
        require_samples(grid, self.kind(), self.min_samples())?;
        let n = grid.len();
        let (x, y) = (&grid.x, &grid.y);

        let mut dy = y.clone();
        for j in 1..n - 1 {
            let (x1, x2, x3) = (x[j - 1], x[j], x[j + 1]);
            let (y1, y2, y3) = (y[j - 1], y[j], y[j + 1]);

            // y = a x^2 + b x + c through the three points.
            let denom = (x1 - x2) * (x1 - x3) * (x2 - x3);
            let a = (x1 * (y3 - y2) + x2 * (y1 - y3) + x3 * (y2 - y1)) / denom;
            let b = (x3 * x3 * (y1 - y2) + x1 * x1 * (y2 - y3) + x2 * x2 * (y3 - y1)) / denom;

            dy[j] = 2.0 * a * x2 + b;
        }
        Grid::new(x.clone(), dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(f: impl Fn(f64) -> f64, start: f64, step: f64, n: usize) -> Grid {
        let mut g = Grid::with_capacity(n);
        for i in 0..n {
            let x = start + i as f64 * step;
            g.push(x, f(x));
        }
        g
    }

    #[test]
    fn two_point_places_slopes_at_midpoints() {
        let g = grid_of(|x| x * x, 0.0, 1.0, 4);
        let e = TwoPoint.estimate(&g).unwrap();
        assert_eq!(e.x, vec![0.5, 1.5, 2.5, 3.0]);
        assert_eq!(e.y, vec![1.0, 3.0, 5.0, 9.0]);
    }

    #[test]
    fn three_point_copies_both_ends() {
        let g = grid_of(|x| x * x, 0.0, 1.0, 4);
        let e = ThreePoint.estimate(&g).unwrap();
        assert_eq!(e.x, g.x);
        assert_eq!(e.y, vec![0.0, 2.0, 4.0, 9.0]);
    }

    #[test]
    fn five_point_is_exact_on_cubics() {
        let g = grid_of(|x| x * x * x, -1.0, 0.25, 9);
        let e = FivePoint::default().estimate(&g).unwrap();
        for j in 2..g.len() - 2 {
            let expected = 3.0 * g.x[j] * g.x[j];
            assert!((e.y[j] - expected).abs() < 1e-12, "j={j}");
        }
        for j in [0, 1, 7, 8] {
            assert_eq!(e.y[j].to_bits(), g.y[j].to_bits());
        }
    }

    #[test]
    fn five_point_rejects_bad_step() {
        let g = grid_of(|x| x, 0.0, 1.0, 5);
        let err = FivePoint::with_step(0.0).estimate(&g).unwrap_err();
        assert!(matches!(err, NumericError::InvalidArgument(_)));
    }

    #[test]
    fn parabolic_is_exact_on_quadratics_with_uneven_spacing() {
        let x = vec![0.0, 0.3, 1.0, 1.1, 2.5];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v * v - v + 2.0).collect();
        let g = Grid::new(x.clone(), y).unwrap();
        let e = Parabolic.estimate(&g).unwrap();
        for j in 1..x.len() - 1 {
            assert!((e.y[j] - (6.0 * x[j] - 1.0)).abs() < 1e-10, "j={j}");
        }
    }

    #[test]
    fn too_short_grids_fail() {
        let g = grid_of(|x| x, 0.0, 1.0, 2);
        let err = ThreePoint.estimate(&g).unwrap_err();
        assert_eq!(
            err,
            NumericError::InsufficientSamples {
                stencil: "three-point".into(),
                required: 3,
                actual: 2
            }
        );
        assert!(Parabolic.estimate(&g).is_err());
        assert!(TwoPoint.estimate(&grid_of(|x| x, 0.0, 1.0, 1)).is_err());
    }
}
