//! Rule to detect interfaces that provide no decoupling at the access site.
//!
//! # Rationale
//!
//! Reaching a property through an interface-typed reference is only useful
//! if the interface hides the concrete class. When the property is declared
//! on the class behind the interface, the caller still depends on that
//! class and the abstraction buys nothing.
//!
//! # Detected Patterns
//!
//! - RA13-001: a member access resolving to a property whose containing
//!   type is a class, where the receiver's static type is an interface in
//!   that class's implemented-interface set. Reported at the access.

use mvc_lint_core::{
    Diagnostic, NodeContext, Rule, RuleDescriptor, SymbolKind, SyntaxKind, TypeKind,
};
use tracing::trace;

/// Rule name for abstraction-without-decoupling.
pub const NAME: &str = "abstraction-without-decoupling";

/// Interface reference reaching a concrete member.
pub const INTERFACE_WITHOUT_DECOUPLING: RuleDescriptor = RuleDescriptor::error(
    "RA13-001",
    NAME,
    "Class with abstraction without decoupling",
    "Class '{0}' uses the interface '{1}' to access the member '{2}' of class '{3}'",
);

/// Flags property access through an interface implemented by the
/// property's declaring class.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbstractionWithoutDecoupling;

impl AbstractionWithoutDecoupling {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for AbstractionWithoutDecoupling {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Detects interface references used to reach members of the class behind them"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[INTERFACE_WITHOUT_DECOUPLING]
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::MemberAccessExpression]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let access = ctx.node;
        let model = ctx.model();

        let Some(property) = model.symbol_info(access) else {
            trace!(access = access.text(), "member access did not resolve");
            return vec![];
        };
        if property.kind != SymbolKind::Property {
            return vec![];
        }
        let Some(container) = property
            .containing_type
            .as_ref()
            .filter(|ty| ty.kind == TypeKind::Class && !ty.all_interfaces.is_empty())
        else {
            return vec![];
        };

        let Some(receiver) = access.receiver() else {
            trace!(access = access.text(), "member access without receiver");
            return vec![];
        };
        let Some(interface) = model
            .type_info(receiver)
            .filter(|ty| ty.kind == TypeKind::Interface && container.implements(ty.id))
        else {
            return vec![];
        };

        let accessor = ctx
            .enclosing_class()
            .map_or(container.name.as_str(), |class| class.name());
        vec![ctx.report(
            &INTERFACE_WITHOUT_DECOUPLING,
            ctx.node_location(access),
            &[&accessor, &interface.name, &property.name, &container.name],
        )]
    }
}
