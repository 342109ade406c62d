//! Formatted terminal output for derivative and fitting runs.
//!
//! We keep formatting code in one place so the numeric code stays clean and
//! output changes are localized.

use crate::domain::{DiffConfig, FitConfig, FitOutcome, StencilScore};
use crate::io::Dataset;
use crate::report::Residual;

/// Stencil RMS table for one function.
pub fn format_diff_summary(config: &DiffConfig, samples: usize, scores: &[StencilScore]) -> String {
    let mut out = String::new();

    out.push_str("=== sfit - finite-difference derivatives ===\n");
    out.push_str(&format!("Function: {}\n", config.function.display_name()));
    out.push_str(&format!(
        "Domain: [{}, {}] | step={} | n={samples}\n",
        config.domain.start, config.domain.end, config.step
    ));
    out.push('\n');

    out.push_str(&format!("{:<12} {:>16}\n", "stencil", "rms error"));
    out.push_str(&format!("{:-<12} {:-<16}\n", "", ""));
    for s in scores {
        out.push_str(&format!("{:<12} {:>16.6e}\n", s.stencil.display_name(), s.rms));
    }

    out
}

/// Fit parameters, status and diagnostics.
pub fn format_fit_summary(
    config: &FitConfig,
    dataset: &Dataset,
    outcome: &FitOutcome,
    largest: &[Residual],
) -> String {
    let mut out = String::new();

    out.push_str("=== sfit - steepest-descent fit ===\n");
    out.push_str(&format!("Data: {}\n", config.data_path.display()));
    out.push_str(&format!(
        "Rows: used={} read={} skipped={}\n",
        dataset.rows_used,
        dataset.rows_read,
        dataset.row_errors.len()
    ));
    out.push_str(&format!(
        "Model: {} | x-mode={:?} | h={:e} | tol={:e}\n",
        config.model.display_name(),
        config.x_mode,
        config.h,
        config.tolerance
    ));

    out.push_str("\nResult:\n");
    out.push_str(&format!(
        "- status: {} after {} iterations\n",
        outcome.status.display_name(),
        outcome.iterations
    ));
    out.push_str(&format!("- error : {:.6e} (0.5 * SSE)\n", outcome.error));
    out.push_str(&format!("- lambda: {:e}\n", outcome.lambda));
    out.push_str(&format!("- q     : {}\n", fmt_vec(outcome.params.as_slice())));

    if let Some(reference) = &outcome.reference {
        out.push_str(&format!(
            "- exact : {} (error {:.6e}, gap {:.3e})\n",
            fmt_vec(reference.params.as_slice()),
            reference.error,
            outcome.error - reference.error
        ));
    }

    if !largest.is_empty() {
        out.push_str("\nLargest residuals:\n");
        out.push_str(&format!(
            "{:>6} {:>14} {:>14} {:>14} {:>14}\n",
            "i", "x", "y_obs", "y_fit", "residual"
        ));
        out.push_str(&format!("{:-<6} {:-<14} {:-<14} {:-<14} {:-<14}\n", "", "", "", "", ""));
        for r in largest {
            out.push_str(&format!(
                "{:>6} {:>14.6} {:>14.6} {:>14.6} {:>14.6}\n",
                r.index, r.x, r.y_obs, r.y_fit, r.residual
            ));
        }
    }

    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
