//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - printed as JSON by the CLI
//! - handed to an external plotting/report layer without recomputation

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::michaelis_menten;

/// Label of the uninhibited condition.
pub const CONTROL: &str = "Control";
/// Label of the inhibited condition.
pub const INHIBITOR: &str = "Inhibitor";

/// Default Km seed (µM), tuned for micromolar substrate ranges.
pub const DEFAULT_KM0: f64 = 25.0;
/// Default inhibitor concentration (µM).
pub const DEFAULT_INHIBITOR_UM: f64 = 10.0;

/// One observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Substrate concentration `[S]` (µM).
    #[serde(rename = "S_uM", alias = "substrate")]
    pub substrate: f64,
    /// Initial reaction velocity (µmol/min).
    #[serde(rename = "Velocity", alias = "velocity")]
    pub velocity: f64,
    #[serde(rename = "Condition", alias = "condition")]
    pub condition: String,
}

impl Measurement {
    pub fn new(substrate: f64, velocity: f64, condition: impl Into<String>) -> Self {
        Self {
            substrate,
            velocity,
            condition: condition.into(),
        }
    }
}

/// All measurements sharing one condition label.
///
/// Built (and validated) by `data::group_by_condition`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionGroup {
    pub(crate) label: String,
    pub(crate) measurements: Vec<Measurement>,
}

impl ConditionGroup {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn substrates(&self) -> Vec<f64> {
        self.measurements.iter().map(|m| m.substrate).collect()
    }

    pub fn velocities(&self) -> Vec<f64> {
        self.measurements.iter().map(|m| m.velocity).collect()
    }

    pub fn max_velocity(&self) -> f64 {
        self.measurements
            .iter()
            .map(|m| m.velocity)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn max_substrate(&self) -> f64 {
        self.measurements
            .iter()
            .map(|m| m.substrate)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn median_substrate(&self) -> f64 {
        let mut s = self.substrates();
        s.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = s.len() / 2;
        if s.is_empty() {
            f64::NAN
        } else if s.len() % 2 == 1 {
            s[mid]
        } else {
            (s[mid - 1] + s[mid]) / 2.0
        }
    }
}

/// How the Km seed of the nonlinear fit is chosen.
///
/// Michaelis-Menten fits are seed-sensitive, so the policy is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// `Km0` is a fixed value (25 µM unless overridden).
    #[default]
    Fixed,
    /// `Km0` is the median observed substrate concentration.
    MedianSubstrate,
}

/// Starting point for the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialGuess {
    pub vmax0: f64,
    pub km0: f64,
}

impl InitialGuess {
    /// `Vmax0 = max(V)`; `Km0` per `policy`.
    pub fn from_group(group: &ConditionGroup, policy: SeedPolicy, km0: f64) -> Self {
        let km0 = match policy {
            SeedPolicy::Fixed => km0,
            SeedPolicy::MedianSubstrate => group.median_substrate(),
        };
        Self {
            vmax0: group.max_velocity(),
            km0,
        }
    }
}

/// Converged Michaelis-Menten parameters for one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MichaelisMentenFit {
    pub condition: String,
    pub vmax: f64,
    pub km: f64,
    /// Sum of squared residuals at the solution.
    pub sse: f64,
    /// Accepted optimizer steps.
    pub iterations: usize,
}

impl MichaelisMentenFit {
    /// Fitted velocity at substrate concentration `s`.
    pub fn predict(&self, s: f64) -> f64 {
        michaelis_menten(s, self.vmax, self.km)
    }

    /// Sample the fitted curve on `n` evenly spaced points over `[0, s_max]`.
    pub fn curve(&self, s_max: f64, n: usize) -> Vec<(f64, f64)> {
        let n = n.max(2);
        (0..n)
            .map(|i| {
                let s = s_max * i as f64 / (n as f64 - 1.0);
                (s, self.predict(s))
            })
            .collect()
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
    pub iterations: usize,
}

/// Reported parameters for one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub vmax: f64,
    pub km: f64,
    pub r2: f64,
    pub quality: FitQuality,
}

/// Lineweaver-Burk regression `1/V = slope·(1/S) + intercept`.
///
/// Diagnostic only: the nonlinear fit is authoritative for reported parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Transformed `(1/S, 1/V)` points, in input order.
    pub points: Vec<(f64, f64)>,
}

impl LinearFit {
    pub fn predict(&self, inv_s: f64) -> f64 {
        self.slope * inv_s + self.intercept
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Where the line crosses `1/V = 0` (equals `-1/Km` for ideal data).
    pub fn x_intercept(&self) -> f64 {
        -self.intercept / self.slope
    }

    /// `1/intercept`.
    pub fn apparent_vmax(&self) -> f64 {
        1.0 / self.intercept
    }

    /// `slope/intercept`.
    pub fn apparent_km(&self) -> f64 {
        self.slope / self.intercept
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mechanism {
    Competitive,
}

impl Mechanism {
    pub fn display_name(self) -> &'static str {
        match self {
            Mechanism::Competitive => "COMPETITIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InhibitionResult {
    pub ki: f64,
    pub mechanism: Mechanism,
    /// `[I]` used for the estimate (µM).
    pub inhibitor_concentration: f64,
}

/// The sole output of the analysis core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub per_condition: BTreeMap<String, FitResult>,
    pub ki: InhibitionResult,
}

/// # Panics
/// The accessors panic if the report was not built by `report::assemble`
/// (which guarantees both labels are present).
impl AnalysisReport {
    pub fn control(&self) -> &FitResult {
        &self.per_condition[CONTROL]
    }

    pub fn inhibitor(&self) -> &FitResult {
        &self.per_condition[INHIBITOR]
    }
}

/// Per-condition data a renderer needs for scatter + curve overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionSeries {
    pub label: String,
    pub substrates: Vec<f64>,
    pub velocities: Vec<f64>,
    pub fit: MichaelisMentenFit,
    pub linear: LinearFit,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// `[I]` (µM), used only for Ki.
    pub inhibitor_concentration: f64,
    pub seed_policy: SeedPolicy,
    /// Km seed for `SeedPolicy::Fixed`.
    pub km0: f64,
    pub max_iterations: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            inhibitor_concentration: DEFAULT_INHIBITOR_UM,
            seed_policy: SeedPolicy::Fixed,
            km0: DEFAULT_KM0,
            max_iterations: crate::fit::DEFAULT_MAX_ITERATIONS,
        }
    }
}
