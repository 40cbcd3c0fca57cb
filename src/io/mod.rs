//! Input/output helpers.
//!
//! - CSV ingest (`ingest`)
//! - CSV export of measurements (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
