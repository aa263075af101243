//! Report rendering.
//!
//! Turns a [`ValidationReport`] into console text or a JSON document. The
//! validator never prints; everything the user sees is produced here.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::bundle::report::{ValidationIssue, ValidationReport};

const RULE: &str = "============================================================";

/// Renders the human-readable report.
///
/// Layout: banner naming the bundle, `info:` progress lines, then warnings,
/// errors and a PASSED/FAILED summary line.
#[must_use]
pub fn human(report: &ValidationReport, strict: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Validating avatar bundle: {}", report.base_path.display());
    let _ = writeln!(out, "{RULE}");
    out.push('\n');

    for note in &report.notes {
        let _ = writeln!(out, "info: {note}");
    }

    out.push('\n');
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Validation results");
    let _ = writeln!(out, "{RULE}");
    out.push('\n');

    issue_block(&mut out, "Warnings:", &report.warnings);
    issue_block(&mut out, "Errors:", &report.errors);

    let errors = report.errors.len();
    let warnings = report.warnings.len();
    if report.passes(strict) {
        if warnings == 0 {
            let _ = writeln!(out, "Validation PASSED");
        } else {
            let _ = writeln!(out, "Validation PASSED with {warnings} warning(s)");
        }
    } else if errors == 0 {
        let _ = writeln!(
            out,
            "Validation FAILED (strict): {warnings} warning(s) treated as errors"
        );
    } else {
        let _ = writeln!(
            out,
            "Validation FAILED: {errors} error(s), {warnings} warning(s)"
        );
    }

    out
}

fn issue_block(out: &mut String, heading: &str, issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    let _ = writeln!(out, "{heading}");
    for issue in issues {
        let _ = writeln!(out, "  {issue}");
    }
    out.push('\n');
}

/// JSON shape of a rendered report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    base_path: &'a Path,
    passed: bool,
    strict: bool,
    error_count: usize,
    warning_count: usize,
    errors: &'a [ValidationIssue],
    warnings: &'a [ValidationIssue],
    notes: &'a [String],
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails (non-UTF-8 paths).
pub fn json(report: &ValidationReport, strict: bool) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        base_path: &report.base_path,
        passed: report.passes(strict),
        strict,
        error_count: report.errors.len(),
        warning_count: report.warnings.len(),
        errors: &report.errors,
        warnings: &report.warnings,
        notes: &report.notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::report::{Checked, IssueCode};

    fn report_with(issues: Vec<ValidationIssue>) -> ValidationReport {
        let mut report = ValidationReport::new("/avatars/bongo");
        let mut step = Checked::new(());
        step.note("validating face configuration");
        for issue in issues {
            step.push(issue);
        }
        report.merge(step);
        report
    }

    #[test]
    fn human_passed() {
        let text = human(&report_with(Vec::new()), false);
        assert!(text.contains("Validating avatar bundle: /avatars/bongo"));
        assert!(text.contains("info: validating face configuration"));
        assert!(text.trim_end().ends_with("Validation PASSED"));
        assert!(!text.contains("Errors:"));
    }

    #[test]
    fn human_lists_warnings_before_errors() {
        let text = human(
            &report_with(vec![
                ValidationIssue::new(IssueCode::MissingBackground, "mode/a/config.json", "bg"),
                ValidationIssue::new(IssueCode::MissingHandFrame, "mode/a/config.json", "frame"),
            ]),
            false,
        );
        let warnings_at = text.find("Warnings:").unwrap();
        let errors_at = text.find("Errors:").unwrap();
        assert!(warnings_at < errors_at);
        assert!(text.contains("Validation FAILED: 1 error(s), 1 warning(s)"));
    }

    #[test]
    fn human_strict_fails_on_warnings() {
        let report = report_with(vec![ValidationIssue::new(
            IssueCode::MissingKeyImage,
            "mode/a/config.json",
            "key",
        )]);
        assert!(human(&report, false).contains("Validation PASSED with 1 warning(s)"));
        assert!(human(&report, true).contains("FAILED (strict)"));
    }

    #[test]
    fn json_has_counts_and_codes() {
        let report = report_with(vec![ValidationIssue::new(
            IssueCode::LengthMismatch,
            "face/config.json",
            "HotKey count (2) != FaceImageName count (1)",
        )]);
        let value: serde_json::Value = serde_json::from_str(&json(&report, false).unwrap()).unwrap();
        assert_eq!(value["passed"], false);
        assert_eq!(value["error_count"], 1);
        assert_eq!(value["warning_count"], 0);
        assert_eq!(value["errors"][0]["code"], "LENGTH_MISMATCH");
        assert_eq!(value["errors"][0]["severity"], "error");
        assert_eq!(value["base_path"], "/avatars/bongo");
    }
}
