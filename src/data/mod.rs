//! Input datasets.
//!
//! - grouping + validation of raw measurements (`dataset`)
//! - the reference dataset and seeded synthetic samples (`sample`)

pub mod dataset;
pub mod sample;

pub use dataset::*;
pub use sample::*;
