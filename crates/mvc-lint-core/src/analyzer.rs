//! Core analyzer: rule registry, node dispatch and concurrent collection.

use crate::config::{Config, ConfigError};
use crate::context::{NodeContext, UnitContext};
use crate::descriptor::RuleDescriptor;
use crate::rule::{Rule, RuleBox};
use crate::semantic::SemanticModel;
use crate::snapshot::UnitSnapshot;
use crate::syntax::{CompilationUnit, SyntaxKind, SyntaxNode};
use crate::types::{sort_diagnostics, Diagnostic, LintResult};
use crate::vocabulary::Settings;

use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Errors that can occur while setting up or feeding the analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading a snapshot.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for a unit.
    #[error("Invalid snapshot {path}: {source}")]
    Snapshot {
        /// Path of the snapshot.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Cooperative cancellation flag, checked between compilation units.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Units already running finish normally.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`CancellationToken::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Receives the diagnostics of one analyzed unit.
///
/// Called from worker threads; implementations must serialize appends.
pub trait DiagnosticSink: Sync {
    /// Appends one unit's diagnostics.
    fn report(&self, diagnostics: Vec<Diagnostic>);
}

/// Thread-safe, append-only diagnostic collector.
#[derive(Debug, Default)]
pub struct ConcurrentSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl ConcurrentSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    /// Returns true if nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the sink, returning diagnostics in deterministic order.
    #[must_use]
    pub fn into_sorted(self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics.into_inner();
        sort_diagnostics(&mut diagnostics);
        diagnostics
    }
}

impl DiagnosticSink for ConcurrentSink {
    fn report(&self, diagnostics: Vec<Diagnostic>) {
        if diagnostics.is_empty() {
            return;
        }
        self.diagnostics.lock().extend(diagnostics);
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    settings: Option<Settings>,
    parallelism: Option<usize>,
    selection: Vec<String>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the settings derived from the configuration.
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Sets the number of worker threads for [`Analyzer::analyze_all`].
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Restricts analysis to the given rule ids or rule names.
    ///
    /// An empty selection keeps every enabled rule.
    #[must_use]
    pub fn select<I, S>(mut self, codes_or_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection
            .extend(codes_or_names.into_iter().map(Into::into));
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the worker pool
    /// cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let mut settings = self.settings.unwrap_or_else(|| config.settings());
        settings.vocabulary = settings.vocabulary.normalized();
        settings.validate()?;

        let selected = |d: &RuleDescriptor| {
            self.selection.is_empty()
                || self
                    .selection
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(d.id) || s == d.name)
        };

        let mut active_codes = HashSet::new();
        let mut rules = Vec::new();
        for rule in self.rules {
            let codes: Vec<&'static str> = rule
                .descriptors()
                .iter()
                .filter(|d| config.is_rule_enabled(d.name, d.id) && selected(*d))
                .map(|d| d.id)
                .collect();

            if codes.is_empty() {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            active_codes.extend(codes);
            rules.push(rule);
        }

        let mut dispatch: HashMap<SyntaxKind, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for kind in rule.node_kinds() {
                dispatch.entry(*kind).or_default().push(index);
            }
        }

        let pool = match self.parallelism.or(config.analyzer.parallelism) {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("mvc-lint-{i}"))
                    .build()?,
            ),
            None => None,
        };

        Ok(Analyzer {
            rules,
            dispatch,
            active_codes,
            settings,
            pool,
        })
    }
}

/// The main analyzer that orchestrates rule execution.
///
/// Use [`Analyzer::builder()`] to construct an instance. An analyzer is
/// immutable once built and may be shared across threads.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    dispatch: HashMap<SyntaxKind, Vec<usize>>,
    active_codes: HashSet<&'static str>,
    settings: Settings,
    pool: Option<rayon::ThreadPool>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Settings used by every detector.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Every active diagnostic kind, in registration order.
    #[must_use]
    pub fn descriptors(&self) -> Vec<&'static RuleDescriptor> {
        self.rules
            .iter()
            .flat_map(|rule| rule.descriptors())
            .filter(|d| self.active_codes.contains(d.id))
            .collect()
    }

    /// Analyzes one compilation unit.
    ///
    /// Walks the tree once in pre-order, handing each node to the rules
    /// registered for its kind. The result is sorted and does not depend on
    /// anything but the unit, its model and the settings.
    #[must_use]
    pub fn analyze_unit(
        &self,
        unit: &CompilationUnit,
        model: &dyn SemanticModel,
    ) -> Vec<Diagnostic> {
        debug!("Analyzing: {}", unit.path.display());

        let ctx = UnitContext::new(unit, model, &self.settings);
        let mut ancestors = Vec::new();
        let mut diagnostics = Vec::new();
        self.visit(&ctx, &unit.root, &mut ancestors, &mut diagnostics);

        sort_diagnostics(&mut diagnostics);
        diagnostics
    }

    fn visit<'a>(
        &self,
        ctx: &'a UnitContext<'a>,
        node: &'a SyntaxNode,
        ancestors: &mut Vec<&'a SyntaxNode>,
        out: &mut Vec<Diagnostic>,
    ) {
        if let Some(indices) = self.dispatch.get(&node.kind) {
            let node_ctx = NodeContext {
                unit: ctx,
                node,
                ancestors: ancestors.as_slice(),
            };
            for &index in indices {
                let rule = &self.rules[index];
                for diagnostic in rule.check(&node_ctx) {
                    if !rule.declares(&diagnostic.code) {
                        warn!(
                            "Rule {} produced undeclared code {}; dropped",
                            rule.name(),
                            diagnostic.code
                        );
                    } else if self.active_codes.contains(diagnostic.code.as_str()) {
                        out.push(diagnostic);
                    } else {
                        trace!(code = %diagnostic.code, "diagnostic for disabled code dropped");
                    }
                }
            }
        }

        ancestors.push(node);
        for child in &node.children {
            self.visit(ctx, child, ancestors, out);
        }
        ancestors.pop();
    }

    /// Analyzes many units concurrently.
    ///
    /// Units are independent; a panic while analyzing one is logged and
    /// the unit contributes nothing. Cancellation is observed before each
    /// unit starts.
    #[must_use]
    pub fn analyze_all(
        &self,
        units: &[(&CompilationUnit, &dyn SemanticModel)],
        cancel: &CancellationToken,
    ) -> LintResult {
        info!("Starting analysis of {} unit(s)", units.len());

        let sink = ConcurrentSink::new();
        let checked = AtomicUsize::new(0);

        let run = || {
            units.par_iter().for_each(|(unit, model)| {
                if cancel.is_cancelled() {
                    trace!("Cancelled before {}", unit.path.display());
                    return;
                }
                if self.analyze_into(unit, *model, &sink) {
                    checked.fetch_add(1, Ordering::Relaxed);
                }
            });
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }

        let result = LintResult {
            diagnostics: sink.into_sorted(),
            units_checked: checked.into_inner(),
        };

        info!(
            "Analysis complete: {} diagnostic(s) in {} unit(s)",
            result.diagnostics.len(),
            result.units_checked
        );
        result
    }

    /// Analyzes loaded snapshots concurrently.
    #[must_use]
    pub fn analyze_snapshots(
        &self,
        snapshots: &[UnitSnapshot],
        cancel: &CancellationToken,
    ) -> LintResult {
        let units: Vec<(&CompilationUnit, &dyn SemanticModel)> = snapshots
            .iter()
            .map(|s| (&s.unit, &s.symbols as &dyn SemanticModel))
            .collect();
        self.analyze_all(&units, cancel)
    }

    /// Analyzes one unit into `sink`, isolating panics. Returns false if
    /// the unit's analysis panicked.
    pub fn analyze_into(
        &self,
        unit: &CompilationUnit,
        model: &dyn SemanticModel,
        sink: &dyn DiagnosticSink,
    ) -> bool {
        match std::panic::catch_unwind(AssertUnwindSafe(|| self.analyze_unit(unit, model))) {
            Ok(diagnostics) => {
                sink.report(diagnostics);
                true
            }
            Err(_) => {
                warn!("Analysis of {} panicked; unit skipped", unit.path.display());
                false
            }
        }
    }
}
