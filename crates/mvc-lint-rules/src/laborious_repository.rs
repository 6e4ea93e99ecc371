//! Rule to limit database round trips in one repository method.
//!
//! # Rationale
//!
//! A repository method that calls the connection object dozens of times is
//! orchestrating a workflow instead of running a query.
//!
//! # Detected Patterns
//!
//! - RA12-001: invocations whose text contains the database-action token,
//!   counted per method body. A method over `max_database_actions` is
//!   reported at the class identifier, once per offending method.

use mvc_lint_core::layer::{contains_token, is_layer, LayerTag};
use mvc_lint_core::metrics::method_bodies;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for laborious-repository.
pub const NAME: &str = "laborious-repository";

/// Too many connection calls in one method.
pub const TOO_MANY_DATABASE_CALLS: RuleDescriptor = RuleDescriptor::error(
    "RA12-001",
    NAME,
    "Repository method makes too many database calls",
    "Method '{0}' of repository '{1}' makes {2} database calls (limit {3})",
);

/// Limits connection calls per repository method.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaboriousRepository;

impl LaboriousRepository {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for LaboriousRepository {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits connection-object calls in a single repository method"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[TOO_MANY_DATABASE_CALLS]
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let class = ctx.node;
        let settings = ctx.settings();
        let vocabulary = &settings.vocabulary;
        if !is_layer(class.name(), LayerTag::Repository, vocabulary) {
            return vec![];
        }

        let limit = settings.thresholds.max_database_actions;
        let class_name = ctx
            .model()
            .declared_symbol(class)
            .map_or(class.name(), |symbol| symbol.name.as_str());

        method_bodies(class)
            .filter(|(method, _)| method.kind == SyntaxKind::MethodDeclaration)
            .filter_map(|(method, body)| {
                let calls = body
                    .descendants()
                    .filter(|n| n.kind == SyntaxKind::InvocationExpression)
                    .filter(|n| contains_token(n.text(), &vocabulary.database_action))
                    .count();
                (calls > limit).then(|| {
                    ctx.report(
                        &TOO_MANY_DATABASE_CALLS,
                        ctx.identifier_location(class),
                        &[&method.name(), &class_name, &calls, &limit],
                    )
                })
            })
            .collect()
    }
}
