//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use mvc_lint_core::{Diagnostic, DiagnosticReport, LintResult, Severity, UnitSnapshot};
use std::collections::HashMap;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, snapshots: &[UnitSnapshot], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, snapshots),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
    }
}

fn print_summary(result: &LintResult) {
    let summary_color = if result.has_errors() {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s) in {} unit(s)\x1b[0m",
        summary_color,
        result.diagnostics.len(),
        result.units_checked
    );
}

fn print_text(result: &LintResult) {
    for diagnostic in &result.diagnostics {
        println!(
            "{} {} at {}:{}:{}",
            diagnostic.code,
            diagnostic.rule,
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
        );
        println!("  {}: {}", severity_indicator(diagnostic.severity), diagnostic.message);
        println!();
    }

    print_summary(result);
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for diagnostic in &result.diagnostics {
        println!("{diagnostic}");
    }
}

fn print_pretty(result: &LintResult, snapshots: &[UnitSnapshot]) {
    let sources: HashMap<&Path, &str> = snapshots
        .iter()
        .map(|s| (s.unit.path.as_path(), s.unit.text.as_str()))
        .collect();

    for diagnostic in &result.diagnostics {
        println!("{:?}", report(diagnostic, &sources));
    }

    print_summary(result);
}

/// Builds a miette report, attaching the unit text when it is known.
fn report(diagnostic: &Diagnostic, sources: &HashMap<&Path, &str>) -> Report {
    let report = Report::new(DiagnosticReport::from(diagnostic));
    match sources.get(diagnostic.location.file.as_path()) {
        Some(text) if !text.is_empty() => report.with_source_code(NamedSource::new(
            diagnostic.location.file.display().to_string(),
            (*text).to_string(),
        )),
        _ => report,
    }
}
