//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - sampling inputs and outputs (`Domain`, `Grid`, `Estimate`)
//! - selector enums (`FunctionKind`, `StencilKind`, `ModelKind`, `XMode`, ...)
//! - fit outputs (`FitOutcome`, `FitStatus`) and run configuration structs

pub mod types;

pub use types::*;
