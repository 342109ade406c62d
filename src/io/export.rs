//! Grid text export.
//!
//! One point per line as `" {x:.6}\t{y:.6}"`, the same flat layout the
//! dataset reader accepts, so exported grids can be fed back into `sfit fit`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::{FunctionKind, Grid, StencilKind};
use crate::error::AppError;

/// Write a grid as whitespace-delimited text.
pub fn write_grid_text(path: &Path, grid: &Grid) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create grid file '{}': {e}", path.display()))
    })?;
    let mut out = BufWriter::new(file);

    write_grid(&mut out, grid)
        .and_then(|_| out.flush())
        .map_err(|e| {
            AppError::new(2, format!("Failed to write grid file '{}': {e}", path.display()))
        })
}

pub fn write_grid<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    for (x, y) in grid.points() {
        writeln!(out, " {x:.6}\t{y:.6}")?;
    }
    Ok(())
}

/// File name for a function's samples (`stencil = None`) or a stencil estimate.
pub fn grid_file_name(dir: &Path, function: FunctionKind, stencil: Option<StencilKind>) -> PathBuf {
    match stencil {
        Some(s) => dir.join(format!("{}_{}.txt", function.display_name(), s.display_name())),
        None => dir.join(format!("{}.txt", function.display_name())),
    }
}
