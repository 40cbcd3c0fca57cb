//! Fitting and derived quantities.
//!
//! Responsibilities:
//!
//! - nonlinear Michaelis-Menten fit per condition (`fitter`)
//! - R² scoring (`quality`)
//! - Lineweaver-Burk diagnostic line (`linear`)
//! - competitive Ki from two fits (`inhibition`)

pub mod fitter;
pub mod inhibition;
pub mod linear;
pub mod quality;

pub use fitter::*;
pub use inhibition::*;
pub use linear::*;
pub use quality::*;
