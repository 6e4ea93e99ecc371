//! Rule to limit the entities a repository manages.
//!
//! # Rationale
//!
//! A repository should own one aggregate. One that touches many entity
//! types has absorbed the persistence of several features.
//!
//! # Detected Patterns
//!
//! - RA11-001: identifiers in the method bodies of a repository resolving
//!   to named types whose name starts with the entity token. Types are
//!   counted by symbol identity, so aliases of one type count once; the
//!   class is reported when the count exceeds `max_repository_entities`.

use mvc_lint_core::layer::{is_layer, starts_with_token, LayerTag};
use mvc_lint_core::metrics::method_bodies;
use mvc_lint_core::{
    Diagnostic, NodeContext, Rule, RuleDescriptor, SymbolId, SymbolKind, SyntaxKind,
};
use std::collections::BTreeSet;
use tracing::trace;

/// Rule name for big-repository.
pub const NAME: &str = "big-repository";

/// Repository managing too many entities.
pub const TOO_MANY_ENTITIES: RuleDescriptor = RuleDescriptor::error(
    "RA11-001",
    NAME,
    "Repository manages too many entities",
    "Repository '{0}' manages {1} entities (limit {2})",
);

/// Limits the entity types a repository references.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigRepository;

impl BigRepository {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BigRepository {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits distinct entity types referenced by a repository"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[TOO_MANY_ENTITIES]
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

        let model = ctx.model();
        let mut entities: BTreeSet<SymbolId> = BTreeSet::new();
        for (_, body) in method_bodies(class) {
            for identifier in body
                .descendants()
                .filter(|n| n.kind == SyntaxKind::IdentifierName)
            {
                let Some(symbol) = model.symbol_info(identifier) else {
                    trace!(identifier = identifier.name(), "unresolved identifier");
                    continue;
                };
                if symbol.kind == SymbolKind::NamedType
                    && starts_with_token(&symbol.name, &vocabulary.entity)
                {
                    entities.insert(symbol.id);
                }
            }
        }

        let limit = settings.thresholds.max_repository_entities;
        if entities.len() <= limit {
            return vec![];
        }

        let class_name = model
            .declared_symbol(class)
            .map_or(class.name(), |symbol| symbol.name.as_str());
        vec![ctx.report(
            &TOO_MANY_ENTITIES,
            ctx.identifier_location(class),
            &[&class_name, &entities.len(), &limit],
        )]
    }
}
