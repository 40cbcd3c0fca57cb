//! Shared analysis pipeline used by every CLI command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! group -> per-condition (fit, R², Lineweaver-Burk) -> Ki -> assemble
//!
//! The CLI can then focus on presentation (table vs JSON).

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::data::group_by_condition;
use crate::domain::{
    AnalysisConfig, AnalysisReport, CONTROL, ConditionGroup, ConditionSeries, FitResult, INHIBITOR,
    InitialGuess, Measurement, SeedPolicy,
};
use crate::error::KineticsError;
use crate::fit::{FitOptions, compute_ki, fit, fit_quality, linearize};
use crate::report::{assemble, ensure_two_conditions};

/// Everything computed for one condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionAnalysis {
    pub result: FitResult,
    pub series: ConditionSeries,
}

/// All computed outputs of a two-condition run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutput {
    pub report: AnalysisReport,
    /// Raw data, fitted curve and reciprocal line per condition, in label order.
    pub series: Vec<ConditionSeries>,
}

impl AnalysisOutput {
    pub fn series_for(&self, label: &str) -> Option<&ConditionSeries> {
        self.series.iter().find(|s| s.label == label)
    }
}

/// Fit every condition present in `measurements`, independent of label count.
///
/// Conditions are processed in parallel; results come back in label order and,
/// if several conditions fail, the error of the first label is returned.
pub fn fit_conditions(
    measurements: &[Measurement],
    config: &AnalysisConfig,
) -> Result<Vec<ConditionAnalysis>, KineticsError> {
    validate_fit_config(config)?;
    let groups = group_by_condition(measurements)?;
    analyze_groups(groups.values().collect(), config)
}

/// Execute the full Control/Inhibitor pipeline and return the report.
pub fn analyze(measurements: &[Measurement], config: &AnalysisConfig) -> Result<AnalysisOutput, KineticsError> {
    validate_fit_config(config)?;
    if !(config.inhibitor_concentration.is_finite() && config.inhibitor_concentration > 0.0) {
        return Err(KineticsError::InvalidConfig(format!(
            "inhibitor concentration must be finite and > 0, got {}",
            config.inhibitor_concentration
        )));
    }

    // 1) Group and check the two-label invariant before spending time fitting.
    let groups = group_by_condition(measurements)?;
    ensure_two_conditions(groups.keys())?;

    // 2) Independent per-condition work.
    let analyses = analyze_groups(groups.values().collect(), config)?;

    // 3) Join: Ki needs both fits.
    let mut fits = BTreeMap::new();
    let mut series = Vec::with_capacity(analyses.len());
    for a in analyses {
        fits.insert(a.series.label.clone(), a.result);
        series.push(a.series);
    }
    let ki = compute_ki(&fits[CONTROL], &fits[INHIBITOR], config.inhibitor_concentration)
        .inspect_err(|e| log::warn!("Ki computation failed: {e}"))?;
    log::info!("Ki = {:.4} uM (competitive, [I] = {} uM)", ki.ki, ki.inhibitor_concentration);

    // 4) Assemble.
    let report = assemble(fits, ki)?;
    Ok(AnalysisOutput { report, series })
}

fn analyze_groups(
    groups: Vec<&ConditionGroup>,
    config: &AnalysisConfig,
) -> Result<Vec<ConditionAnalysis>, KineticsError> {
    let opts = FitOptions {
        max_iterations: config.max_iterations,
        ..FitOptions::default()
    };
    let results: Vec<Result<ConditionAnalysis, KineticsError>> = groups
        .par_iter()
        .map(|group| analyze_condition(group, config, &opts))
        .collect();
    results.into_iter().collect()
}

fn analyze_condition(
    group: &ConditionGroup,
    config: &AnalysisConfig,
    opts: &FitOptions,
) -> Result<ConditionAnalysis, KineticsError> {
    let guess = InitialGuess::from_group(group, config.seed_policy, config.km0);
    log::info!(
        "[{}] fitting {} points from Vmax0={:.3}, Km0={:.3}",
        group.label(),
        group.len(),
        guess.vmax0,
        guess.km0
    );

    let mm_fit = fit(group, guess, opts).inspect_err(|e| log::warn!("{e}"))?;
    let result = fit_quality(group, &mm_fit)?;
    let linear = linearize(group)?;

    log::info!(
        "[{}] Vmax={:.4} Km={:.4} R2={:.6}",
        group.label(),
        result.vmax,
        result.km,
        result.r2
    );

    Ok(ConditionAnalysis {
        result,
        series: ConditionSeries {
            label: group.label().to_string(),
            substrates: group.substrates(),
            velocities: group.velocities(),
            fit: mm_fit,
            linear,
        },
    })
}

fn validate_fit_config(config: &AnalysisConfig) -> Result<(), KineticsError> {
    if config.max_iterations == 0 {
        return Err(KineticsError::InvalidConfig("max iterations must be > 0".into()));
    }
    if config.seed_policy == SeedPolicy::Fixed && !(config.km0.is_finite() && config.km0 > 0.0) {
        return Err(KineticsError::InvalidConfig(format!(
            "Km seed must be finite and > 0, got {}",
            config.km0
        )));
    }
    Ok(())
}
