//! JSON run reports.
//!
//! A report is the portable record of a run:
//! - tool name and generation timestamp
//! - the configuration that produced it
//! - the results (stencil scores, or the fitted parameters and status)
//!
//! The schemas are defined by `domain::DiffReport` and `domain::FitReport`.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::error::AppError;

pub const TOOL_NAME: &str = "sfit";

/// RFC 3339 local timestamp stamped into every report.
pub fn generated_at() -> String {
    Local::now().to_rfc3339()
}

/// Write a report as pretty-printed JSON.
pub fn write_json_report<T: Serialize>(path: &Path, report: &T) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create report '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;
    Ok(())
}
