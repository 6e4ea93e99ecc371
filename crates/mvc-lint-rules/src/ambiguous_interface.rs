//! Rule to limit interface size.
//!
//! # Rationale
//!
//! An interface with many methods forces every implementor to provide
//! behavior for unrelated concerns.
//!
//! # Detected Patterns
//!
//! - RA14-001: an interface declaring more than `max_interface_methods`
//!   methods. Properties and events do not count.

use mvc_lint_core::metrics::interface_method_count;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for ambiguous-interface.
pub const NAME: &str = "ambiguous-interface";

/// Interface with too many methods.
pub const TOO_MANY_METHODS: RuleDescriptor = RuleDescriptor::error(
    "RA14-001",
    NAME,
    "Ambiguous interface",
    "Interface '{0}' declares {1} methods (limit {2})",
);

/// Limits the methods an interface declares.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbiguousInterface;

impl AmbiguousInterface {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for AmbiguousInterface {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of methods declared by an interface"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[TOO_MANY_METHODS]
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::InterfaceDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let interface = ctx.node;
        let methods = interface_method_count(interface);
        let limit = ctx.settings().thresholds.max_interface_methods;
        if methods <= limit {
            return vec![];
        }

        vec![ctx.report(
            &TOO_MANY_METHODS,
            ctx.identifier_location(interface),
            &[&interface.name(), &methods, &limit],
        )]
    }
}
