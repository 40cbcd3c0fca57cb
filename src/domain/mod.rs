//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw observations (`Measurement`) and validated groups (`ConditionGroup`)
//! - fit outputs (`MichaelisMentenFit`, `FitResult`, `LinearFit`, `InhibitionResult`)
//! - the final `AnalysisReport` and run configuration

pub mod types;

pub use types::*;
