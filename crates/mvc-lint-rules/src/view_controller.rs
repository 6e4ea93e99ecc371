//! Rule to keep HTTP actions out of views.
//!
//! # Detected Patterns
//!
//! - RA04-001: the first member carrying an HTTP verb attribute in a unit
//!   whose path contains the view token.

use mvc_lint_core::layer::{is_layer, LayerTag};
use mvc_lint_core::scanners::first_http_action_member;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for view-controller.
pub const NAME: &str = "view-controller";

/// HTTP verb attribute on a view member.
pub const HTTP_ACTION_IN_VIEW: RuleDescriptor = RuleDescriptor::error(
    "RA04-001",
    NAME,
    "HTTP actions are not allowed in the view",
    "View '{0}' declares the HTTP action '{1}'",
);

/// Keeps HTTP actions out of views.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewController;

impl ViewController {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ViewController {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids HTTP verb attributes on view members"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[HTTP_ACTION_IN_VIEW]
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        if !is_layer(&ctx.unit.path_str(), LayerTag::View, &ctx.settings().vocabulary) {
            return vec![];
        }

        let class = ctx.node;
        match first_http_action_member(class, ctx.model()) {
            Some(member) => vec![ctx.report(
                &HTTP_ACTION_IN_VIEW,
                ctx.node_location(member),
                &[&class.name(), &member.name()],
            )],
            None => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{class, codes, public_method, run, unit};
    use mvc_lint_core::{AttributeData, Symbol, SymbolKind, SymbolTable, TextSpan};

    #[test]
    fn http_attribute_with_suffix_is_reported() {
        let unit = unit(
            "Views/Pedido/Editar.cshtml",
            "",
            [class("Editar_Page").with_child(
                public_method("OnPost")
                    .with_id(4)
                    .with_span(TextSpan::lines(12, 20)),
            )],
        );
        let symbols = SymbolTable::new().with_declaration(
            4,
            Symbol::new(40, "OnPost", SymbolKind::Method)
                .with_attribute(AttributeData::new("HttpPostAttribute", None)),
        );

        let diagnostics = run(ViewController::new(), &unit, &symbols);
        assert_eq!(codes(&diagnostics), vec!["RA04-001"]);
        assert_eq!(diagnostics[0].location.line, 12);
    }

    #[test]
    fn other_attributes_are_fine() {
        let unit = unit(
            "Views/Pedido/Editar.cshtml",
            "",
            [class("Editar_Page").with_child(public_method("OnPost").with_id(4))],
        );
        let symbols = SymbolTable::new().with_declaration(
            4,
            Symbol::new(40, "OnPost", SymbolKind::Method)
                .with_attribute(AttributeData::new("ValidateAntiForgeryToken", None)),
        );
        assert!(run(ViewController::new(), &unit, &symbols).is_empty());
    }
}
