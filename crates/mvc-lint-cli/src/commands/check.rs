//! Check command implementation.

use anyhow::{Context, Result};
use mvc_lint_core::{load_snapshot, Analyzer, CancellationToken, LintResult, UnitSnapshot};
use mvc_lint_rules::all_rules;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    paths: &[PathBuf],
    format: OutputFormat,
    rules_filter: Option<&str>,
    source: &ConfigSource,
) -> Result<()> {
    let (result, snapshots) = analyze(paths, rules_filter, source)?;

    super::output::print(&result, &snapshots, format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Loads every snapshot under `paths` and runs the configured rules over them.
fn analyze(
    paths: &[PathBuf],
    rules_filter: Option<&str>,
    source: &ConfigSource,
) -> Result<(LintResult, Vec<UnitSnapshot>)> {
    let config = source.load()?;

    let mut builder = Analyzer::builder().config(config).rules(all_rules());
    if let Some(filter) = rules_filter {
        builder = builder.select(selection(filter));
    }
    let analyzer = builder.build().context("Failed to build analyzer")?;

    let files = discover_snapshots(paths)?;
    let snapshots = load_snapshots(&files);
    tracing::info!(
        "Analyzing {} of {} JSON file(s) with {} rules",
        snapshots.len(),
        files.len(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze_snapshots(&snapshots, &CancellationToken::new());
    Ok((result, snapshots))
}

/// Loads each file as a unit snapshot. Files that are not snapshots
/// (`appsettings.json`, `launchSettings.json`, ...) are logged and skipped.
fn load_snapshots(files: &[PathBuf]) -> Vec<UnitSnapshot> {
    files
        .iter()
        .filter_map(|path| match load_snapshot(path) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!("Skipping {}: {}", path.display(), err);
                None
            }
        })
        .collect()
}

/// Splits a comma-separated `--rules` value, warning about unknown entries.
fn selection(filter: &str) -> Vec<String> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .inspect(|entry| {
            if mvc_lint_rules::find(entry).is_empty() {
                tracing::warn!("Unknown rule: {}", entry);
            }
        })
        .map(str::to_owned)
        .collect()
}

/// Collects snapshot files: explicit files as given, directories walked for
/// `*.json` honouring ignore files.
fn discover_snapshots(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(false).git_ignore(true);

        for entry in builder.build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            let path = entry.path();
            if path.is_file() && is_snapshot(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_snapshot(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}
