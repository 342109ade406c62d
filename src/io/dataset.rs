//! Dataset ingest for the fitter.
//!
//! Input is plain text, one observation per line:
//!
//! ```text
//! x y
//! ```
//!
//! - tokens are whitespace separated; extra tokens after `y` are ignored
//! - blank lines and `#` comments are skipped
//! - malformed rows are skipped but reported (line number + reason)
//!
//! The file is read once.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::domain::Grid;
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: observations in file order plus diagnostics.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub points: Grid,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a whitespace-delimited `x y` file.
pub fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open dataset '{}': {e}", path.display()))
    })?;
    let dataset = read_dataset(file)?;

    for err in &dataset.row_errors {
        log::warn!("{}:{}: skipped row: {}", path.display(), err.line, err.message);
    }
    log::info!(
        "loaded {} of {} rows from {}",
        dataset.rows_used,
        dataset.rows_read,
        path.display()
    );
    Ok(dataset)
}

/// Parse a dataset from any reader.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, AppError> {
    let reader = BufReader::new(reader);
    let mut points = Grid::default();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| {
            AppError::new(2, format!("Failed to read dataset line {line_no}: {e}"))
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows_read += 1;

        match parse_row(trimmed) {
            Ok((x, y)) => points.push(x, y),
            Err(message) => row_errors.push(RowError { line: line_no, message }),
        }
    }

    let rows_used = points.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows in dataset."));
    }

    Ok(Dataset {
        points,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn parse_row(line: &str) -> Result<(f64, f64), String> {
    let mut tokens = line.split_whitespace();
    let (Some(x), Some(y)) = (tokens.next(), tokens.next()) else {
        return Err(format!("expected two values, got `{line}`"));
    };
    let x = parse_value(x, "x")?;
    let y = parse_value(y, "y")?;
    Ok((x, y))
}

fn parse_value(token: &str, column: &str) -> Result<f64, String> {
    let v: f64 = token
        .parse()
        .map_err(|_| format!("invalid {column} value `{token}`"))?;
    if !v.is_finite() {
        return Err(format!("non-finite {column} value `{token}`"));
    }
    Ok(v)
}
