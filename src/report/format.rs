//! Plain-text rendering of analysis results.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::ConditionAnalysis;
use crate::domain::{AnalysisReport, CONTROL, INHIBITOR};

/// Format the two-condition parameter table.
pub fn format_report(report: &AnalysisReport) -> String {
    let control = report.control();
    let inhibitor = report.inhibitor();

    let mut out = String::new();
    out.push_str("=== Kinetic Analysis Report ===\n");
    out.push_str(&format!(
        "[Inhibitor] = {} uM\n\n",
        report.ki.inhibitor_concentration
    ));

    out.push_str(&row("Parameter", &format!("{CONTROL} Condition"), &format!("{INHIBITOR} Condition")));
    out.push_str(&row(&"-".repeat(24), &"-".repeat(20), &"-".repeat(20)));
    out.push_str(&row(
        "Vmax (umol/min)",
        &format!("{:.2}", control.vmax),
        &format!("{:.2}", inhibitor.vmax),
    ));
    out.push_str(&row(
        "Km (uM)",
        &format!("{:.2}", control.km),
        &format!("{:.2}", inhibitor.km),
    ));
    out.push_str(&row(
        "Goodness of Fit (R2)",
        &format!("{:.4}", control.r2),
        &format!("{:.4}", inhibitor.r2),
    ));
    out.push_str(&row(
        "Inhibition Mechanism",
        report.ki.mechanism.display_name(),
        &format!("Ki = {:.2} uM", report.ki.ki),
    ));

    out
}

/// Format per-condition fits (any number of labels), including the
/// Lineweaver-Burk diagnostic line.
pub fn format_condition_fits(analyses: &[ConditionAnalysis]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<16} {:>10} {:>10} {:>8} {:>10} {:>12} {:>12}\n",
            "condition", "Vmax", "Km", "R2", "RMSE", "LB slope", "LB icept"
        )
        .trim_end(),
    );
    out.push('\n');
    for a in analyses {
        out.push_str(
            format!(
                "{:<16} {:>10.3} {:>10.3} {:>8.4} {:>10.4} {:>12.6} {:>12.6}\n",
                truncate(&a.series.label, 16),
                a.result.vmax,
                a.result.km,
                a.result.r2,
                a.result.quality.rmse,
                a.series.linear.slope,
                a.series.linear.intercept,
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn row(label: &str, left: &str, right: &str) -> String {
    format!("{label:<24} {left:>20} {right:>20}\n")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
