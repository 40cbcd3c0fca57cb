//! Result assembly and formatted terminal output.

use std::collections::BTreeMap;

use crate::domain::{AnalysisReport, CONTROL, FitResult, INHIBITOR, InhibitionResult};
use crate::error::KineticsError;

pub mod format;

pub use format::*;

/// Labels a two-condition report must contain, in display order.
pub const REQUIRED_CONDITIONS: [&str; 2] = [CONTROL, INHIBITOR];

/// Check that `labels` is exactly {Control, Inhibitor}.
pub fn ensure_two_conditions<'a>(labels: impl IntoIterator<Item = &'a String>) -> Result<(), KineticsError> {
    let found: Vec<String> = labels.into_iter().cloned().collect();
    let exact = found.len() == REQUIRED_CONDITIONS.len()
        && REQUIRED_CONDITIONS.iter().all(|r| found.iter().any(|f| f == r));
    if exact {
        Ok(())
    } else {
        Err(KineticsError::MissingCondition {
            expected: REQUIRED_CONDITIONS.iter().map(|s| s.to_string()).collect(),
            found,
        })
    }
}

/// Collect per-condition fits and Ki into the final report. All-or-nothing.
pub fn assemble(
    fits: BTreeMap<String, FitResult>,
    ki: InhibitionResult,
) -> Result<AnalysisReport, KineticsError> {
    ensure_two_conditions(fits.keys())?;
    Ok(AnalysisReport {
        per_condition: fits,
        ki,
    })
}
