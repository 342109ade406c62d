//! Input/output helpers.
//!
//! - `x y` dataset ingest + row validation (`dataset`)
//! - grid text exports (`export`)
//! - JSON run reports (`report`)

pub mod dataset;
pub mod export;
pub mod report;

pub use dataset::*;
pub use export::*;
pub use report::*;
