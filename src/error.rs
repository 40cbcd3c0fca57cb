//! Error types.
//!
//! Two layers:
//!
//! - [`KineticsError`] is raised by the computational core (grouping, fitting,
//!   scoring, Ki). Each variant is a distinct failure kind so callers can decide
//!   whether to abort or retry with a different seed.
//! - [`AppError`] is what the binary surfaces: a message plus a process exit code.

use thiserror::Error;

/// Failures of the analysis core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KineticsError {
    /// Malformed or insufficient grouped input.
    #[error("invalid dataset{}: {reason}", fmt_condition(.condition))]
    InvalidDataset {
        condition: Option<String>,
        reason: String,
    },

    /// Optimizer gave up, or produced a physically invalid (Vmax, Km).
    #[error("fit did not converge for condition '{condition}': {reason}")]
    FitDidNotConverge { condition: String, reason: String },

    #[error("length mismatch: {observed} observed vs {predicted} predicted values")]
    LengthMismatch { observed: usize, predicted: usize },

    #[error("degenerate data: {0}")]
    DegenerateData(String),

    /// Zero velocity hit by the reciprocal transform.
    #[error("division by zero for condition '{condition}': velocity is 0 at S = {substrate}")]
    DivisionByZero { condition: String, substrate: f64 },

    /// Apparent Km did not increase with inhibitor present.
    #[error(
        "non-competitive or invalid Km ratio: inhibitor Km ({inhibitor_km:.4}) must exceed control Km ({control_km:.4})"
    )]
    NonCompetitiveOrInvalidRatio { control_km: f64, inhibitor_km: f64 },

    #[error("missing condition: expected exactly {expected:?}, found {found:?}")]
    MissingCondition {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A label-free error raised while processing one condition.
    #[error("condition '{condition}': {source}")]
    InCondition {
        condition: String,
        #[source]
        source: Box<KineticsError>,
    },
}

fn fmt_condition(condition: &Option<String>) -> String {
    match condition {
        Some(label) => format!(" (condition '{label}')"),
        None => String::new(),
    }
}

impl KineticsError {
    pub fn invalid_dataset(condition: Option<&str>, reason: impl Into<String>) -> Self {
        KineticsError::InvalidDataset {
            condition: condition.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// Attach a condition label to an error that does not carry one.
    pub fn in_condition(self, condition: &str) -> Self {
        if self.condition().is_some() {
            return self;
        }
        KineticsError::InCondition {
            condition: condition.to_string(),
            source: Box::new(self),
        }
    }

    /// Stable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            KineticsError::InvalidDataset { .. } => "InvalidDataset",
            KineticsError::FitDidNotConverge { .. } => "FitDidNotConverge",
            KineticsError::LengthMismatch { .. } => "LengthMismatch",
            KineticsError::DegenerateData(_) => "DegenerateData",
            KineticsError::DivisionByZero { .. } => "DivisionByZero",
            KineticsError::NonCompetitiveOrInvalidRatio { .. } => "NonCompetitiveOrInvalidRatio",
            KineticsError::MissingCondition { .. } => "MissingCondition",
            KineticsError::InvalidConfig(_) => "InvalidConfig",
            KineticsError::InCondition { source, .. } => source.kind(),
        }
    }

    /// The condition label the error is about, if known.
    pub fn condition(&self) -> Option<&str> {
        match self {
            KineticsError::InvalidDataset { condition, .. } => condition.as_deref(),
            KineticsError::FitDidNotConverge { condition, .. }
            | KineticsError::DivisionByZero { condition, .. }
            | KineticsError::InCondition { condition, .. } => Some(condition.as_str()),
            _ => None,
        }
    }

    /// Exit code used by the binary.
    ///
    /// - 2: bad input or configuration
    /// - 3: insufficient or degenerate data
    /// - 4: numerical failure
    pub fn exit_code(&self) -> u8 {
        match self {
            KineticsError::InvalidDataset { .. }
            | KineticsError::MissingCondition { .. }
            | KineticsError::InvalidConfig(_) => 2,
            KineticsError::LengthMismatch { .. }
            | KineticsError::DegenerateData(_)
            | KineticsError::DivisionByZero { .. } => 3,
            KineticsError::FitDidNotConverge { .. }
            | KineticsError::NonCompetitiveOrInvalidRatio { .. } => 4,
            KineticsError::InCondition { source, .. } => source.exit_code(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<KineticsError> for AppError {
    fn from(err: KineticsError) -> Self {
        AppError::new(err.exit_code(), format!("[{}] {err}", err.kind()))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_condition_wraps_label_free_errors() {
        let err = KineticsError::DegenerateData("all observed values identical".into()).in_condition("Control");
        assert_eq!(err.kind(), "DegenerateData");
        assert_eq!(err.condition(), Some("Control"));
        assert!(err.to_string().contains("Control"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn in_condition_keeps_existing_label() {
        let err = KineticsError::DivisionByZero {
            condition: "Inhibitor".into(),
            substrate: 5.0,
        }
        .in_condition("Control");
        assert_eq!(err.condition(), Some("Inhibitor"));
    }

    #[test]
    fn app_error_message_names_kind_and_condition() {
        let err = KineticsError::FitDidNotConverge {
            condition: "Inhibitor".into(),
            reason: "iteration budget exhausted".into(),
        };
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 4);
        let msg = app.to_string();
        assert!(msg.contains("FitDidNotConverge"));
        assert!(msg.contains("Inhibitor"));
    }
}
