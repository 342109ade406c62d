//! Input data: sampled reference grids and synthetic datasets.

pub mod grid;
pub mod synth;

pub use grid::*;
pub use synth::*;
