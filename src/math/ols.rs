//! Ordinary least squares for linear-in-parameter models.
//!
//! When a model can be written as `y = row(x) · q`, the least-squares optimum
//! is available in closed form:
//!
//! ```text
//! minimize Σ (y_i - row(x_i)^T q)^2
//! ```
//!
//! The fitter uses this as a reference to report how far steepest descent
//! stopped from the exact optimum. We solve with SVD so tall (more rows than
//! columns) and mildly ill-conditioned designs are handled without panicking.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(q) = svd.solve(y, tol) {
            if q.iter().all(|v| v.is_finite()) {
                return Some(q);
            }
        }
    }

    None
}

/// Build the design matrix from per-sample rows and solve for `q`.
///
/// Returns `None` for ragged rows, empty input, or an unsolvable system.
pub fn fit_design_rows(rows: &[Vec<f64>], y: &[f64]) -> Option<DVector<f64>> {
    let p = rows.first()?.len();
    if p == 0 || rows.len() != y.len() || rows.iter().any(|r| r.len() != p) {
        return None;
    }

    let x = DMatrix::from_fn(rows.len(), p, |i, j| rows[i][j]);
    let y = DVector::from_column_slice(y);
    solve_least_squares(&x, &y)
}
