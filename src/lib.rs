//! `mm-kinetics` library crate.
//!
//! The binary (`kinetics`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the computed report can be consumed by other front-ends (plotting, notebooks)

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
