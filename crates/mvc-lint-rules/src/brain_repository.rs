//! Rule to limit query logic embedded in repository string literals.
//!
//! # Rationale
//!
//! A repository should issue simple queries. A literal full of
//! `where`/`and`/`or`/`join` is business logic written in SQL.
//!
//! # Detected Patterns
//!
//! - RA10-001: a string constant inside a repository method body whose
//!   whole-word logic keyword count exceeds `max_query_logic_keywords`.
//!   Reported at the literal, once per literal.

use mvc_lint_core::layer::{is_layer, LayerTag};
use mvc_lint_core::metrics::method_bodies;
use mvc_lint_core::scanners::query_logic_keyword_count;
use mvc_lint_core::{ConstantValue, Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};
use tracing::trace;

/// Rule name for brain-repository.
pub const NAME: &str = "brain-repository";

/// Too much query logic in one literal.
pub const COMPLEX_QUERY_LOGIC: RuleDescriptor = RuleDescriptor::error(
    "RA10-001",
    NAME,
    "Complex logic in the repository",
    "Query \"{0}\" has {1} logic keywords (limit {2})",
);

/// Limits query logic in repository literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrainRepository;

impl BrainRepository {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BrainRepository {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits SQL logic keywords in repository string literals"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[COMPLEX_QUERY_LOGIC]
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let class = ctx.node;
        let settings = ctx.settings();
        if !is_layer(class.name(), LayerTag::Repository, &settings.vocabulary) {
            return vec![];
        }

        let limit = settings.thresholds.max_query_logic_keywords;
        let mut diagnostics = Vec::new();

        for (_, body) in method_bodies(class) {
            for literal in body
                .descendants()
                .filter(|n| n.kind == SyntaxKind::LiteralExpression)
            {
                let Some(value) = ctx.model().constant_value(literal).and_then(ConstantValue::as_str)
                else {
                    trace!(literal = literal.text(), "no string constant; skipped");
                    continue;
                };

                let lowered = value.to_lowercase();
                let Some(count) = query_logic_keyword_count(&lowered) else {
                    continue;
                };
                if count > limit {
                    diagnostics.push(ctx.report(
                        &COMPLEX_QUERY_LOGIC,
                        ctx.node_location(literal),
                        &[&lowered, &count, &limit],
                    ));
                }
            }
        }

        diagnostics
    }
}
