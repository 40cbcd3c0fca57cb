//! Numerical utilities: dense least squares and closed-form line fits.

pub mod linreg;
pub mod ols;

pub use linreg::*;
pub use ols::*;
