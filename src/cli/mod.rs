//! Command-line parsing for the enzyme-kinetics analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_INHIBITOR_UM, DEFAULT_KM0, SeedPolicy};
use crate::fit::DEFAULT_MAX_ITERATIONS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "kinetics", version, about = "Michaelis-Menten fitting and competitive Ki estimation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit Control and Inhibitor, compute Ki, and print the report.
    Analyze(AnalyzeArgs),
    /// Fit every condition in the dataset (any number of labels); no Ki.
    Fit(FitArgs),
    /// Print a seeded synthetic competitive-inhibition dataset as CSV.
    Sample(SampleArgs),
}

/// Options shared by `analyze` and `fit`.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Measurements CSV (`S_uM,Velocity,Condition`). Uses the built-in
    /// reference dataset when omitted.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// How the Km seed is chosen.
    #[arg(long, value_enum, default_value_t = SeedPolicy::Fixed)]
    pub seed_policy: SeedPolicy,

    /// Km seed (uM) for `--seed-policy fixed`.
    #[arg(long, default_value_t = DEFAULT_KM0)]
    pub km0: f64,

    /// Optimizer iteration budget.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iters: usize,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub fit: FitArgs,

    /// Inhibitor concentration [I] (uM).
    #[arg(long = "inhibitor-um", env = "KINETICS_INHIBITOR_UM", default_value_t = DEFAULT_INHIBITOR_UM)]
    pub inhibitor_um: f64,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    #[arg(long, default_value_t = 100.0)]
    pub vmax: f64,

    /// Uninhibited Km (uM).
    #[arg(long, default_value_t = 20.0)]
    pub km: f64,

    /// True inhibition constant (uM).
    #[arg(long, default_value_t = 10.0)]
    pub ki: f64,

    /// Inhibitor concentration [I] (uM).
    #[arg(long = "inhibitor-um", default_value_t = DEFAULT_INHIBITOR_UM)]
    pub inhibitor_um: f64,

    /// Substrate concentrations (uM), comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = crate::data::REFERENCE_SUBSTRATES)]
    pub substrates: Vec<f64>,

    /// Replicates per concentration.
    #[arg(long, default_value_t = 1)]
    pub replicates: usize,

    /// Relative Gaussian noise on velocities.
    #[arg(long, default_value_t = 0.03)]
    pub noise: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults() {
        let cli = Cli::parse_from(["kinetics", "analyze"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.fit.km0, 25.0);
        assert_eq!(args.fit.seed_policy, SeedPolicy::Fixed);
        assert!(args.fit.csv.is_none());
    }

    #[test]
    fn sample_parses_substrate_list() {
        let cli = Cli::parse_from(["kinetics", "sample", "--substrates", "1,2,4", "--seed", "7"]);
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.substrates, vec![1.0, 2.0, 4.0]);
        assert_eq!(args.seed, 7);
    }

    #[test]
    fn seed_policy_value_names() {
        let cli = Cli::parse_from(["kinetics", "fit", "--seed-policy", "median-substrate"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.seed_policy, SeedPolicy::MedianSubstrate);
    }
}
