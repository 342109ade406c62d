//! `stencil-fit` library crate.
//!
//! The binary (`sfit`) is a thin wrapper around this library so that:
//!
//! - numeric code is testable without spawning processes
//! - stencils, models and the fitter can be reused directly
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod stencil;
