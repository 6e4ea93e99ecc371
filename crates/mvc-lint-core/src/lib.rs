//! # mvc-lint-core
//!
//! Core framework for detecting architecture smells in layered MVC
//! codebases.
//!
//! The engine never parses source text. A host lowers each compilation unit
//! into a [`SyntaxNode`] tree and provides a [`SemanticModel`]; the
//! [`Analyzer`] walks the tree once and dispatches each node to the rules
//! registered for its kind. This crate provides:
//!
//! - [`Rule`] trait and [`RuleDescriptor`] for detectors
//! - [`Analyzer`] for registry, dispatch and concurrent analysis
//! - layer classification, metric counters and content scanners shared by
//!   the detectors
//! - [`Diagnostic`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use mvc_lint_core::{Analyzer, CancellationToken, load_snapshot};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let snapshot = load_snapshot("HomeController.json".as_ref())?;
//! let diagnostics = analyzer.analyze_unit(&snapshot.unit, &snapshot.symbols);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod descriptor;
mod rule;
mod semantic;
mod snapshot;
mod syntax;
mod types;

/// Layer classification from naming conventions.
pub mod layer;
/// Structural metric counters.
pub mod metrics;
/// Content and reference scanners.
pub mod scanners;
/// Vocabulary tables, naming tokens and thresholds.
pub mod vocabulary;

pub use analyzer::{
    Analyzer, AnalyzerBuilder, AnalyzerError, CancellationToken, ConcurrentSink, DiagnosticSink,
};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::{NodeContext, UnitContext};
pub use descriptor::RuleDescriptor;
pub use rule::{Rule, RuleBox};
pub use semantic::{
    AttributeData, ConstantValue, SemanticModel, Symbol, SymbolId, SymbolKind, SymbolTable,
    TypeInfo, TypeKind,
};
pub use snapshot::{load_snapshot, UnitSnapshot};
pub use syntax::{CompilationUnit, Descendants, Modifier, NodeId, SyntaxKind, SyntaxNode, TextSpan};
pub use types::{Diagnostic, DiagnosticReport, LintResult, Location, Severity};
pub use vocabulary::{Settings, Thresholds, Vocabulary};
