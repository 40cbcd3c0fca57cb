//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments
//! - loads measurements (CSV or the reference dataset)
//! - runs the analysis pipeline
//! - prints a table or JSON

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, FitArgs, SampleArgs};
use crate::data::{SampleConfig, demo_measurements, generate_sample};
use crate::domain::{AnalysisConfig, Measurement};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `kinetics` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Fit(args) => handle_fit(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args.fit, Some(args.inhibitor_um));
    let measurements = load_input(&args.fit)?;
    let output = pipeline::analyze(&measurements, &config)?;

    if args.fit.json {
        let json = serde_json::json!({
            "report": output.report,
            "series": output.series,
        });
        println!("{}", to_pretty_json(&json)?);
    } else {
        println!("{}", crate::report::format_report(&output.report));
    }
    Ok(())
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args, None);
    let measurements = load_input(&args)?;
    let analyses = pipeline::fit_conditions(&measurements, &config)?;

    if args.json {
        let json: Vec<_> = analyses
            .iter()
            .map(|a| serde_json::json!({ "result": a.result, "series": a.series }))
            .collect();
        println!("{}", to_pretty_json(&json)?);
    } else {
        println!("{}", crate::report::format_condition_fits(&analyses));
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        vmax: args.vmax,
        km: args.km,
        ki: args.ki,
        inhibitor_concentration: args.inhibitor_um,
        substrates: args.substrates,
        replicates: args.replicates,
        noise_rel: args.noise,
        seed: args.seed,
    };
    let measurements = generate_sample(&config)?;
    crate::io::write_measurements_csv(std::io::stdout().lock(), &measurements)
}

pub fn analysis_config_from_args(args: &FitArgs, inhibitor_um: Option<f64>) -> AnalysisConfig {
    let defaults = AnalysisConfig::default();
    AnalysisConfig {
        inhibitor_concentration: inhibitor_um.unwrap_or(defaults.inhibitor_concentration),
        seed_policy: args.seed_policy,
        km0: args.km0,
        max_iterations: args.max_iters,
    }
}

fn load_input(args: &FitArgs) -> Result<Vec<Measurement>, AppError> {
    match &args.csv {
        Some(path) => crate::io::load_measurements(path),
        None => {
            log::info!("no --csv given; using the reference dataset");
            Ok(demo_measurements())
        }
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(4, format!("Failed to encode JSON: {e}")))
}
