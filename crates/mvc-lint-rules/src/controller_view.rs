//! Rule to keep markup out of controllers.
//!
//! # Detected Patterns
//!
//! - RA05-001: the first HTML tag token in the text of a unit declaring a
//!   class whose identifier contains the controller token.

use mvc_lint_core::layer::{is_layer, LayerTag};
use mvc_lint_core::scanners::first_forbidden_token;
use mvc_lint_core::vocabulary::HTML_TAGS;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for controller-view.
pub const NAME: &str = "controller-view";

/// HTML markup in a controller.
pub const HTML_IN_CONTROLLER: RuleDescriptor = RuleDescriptor::error(
    "RA05-001",
    NAME,
    "HTML tags are not allowed in the controller",
    "Controller '{0}' contains the HTML tag '{1}'",
);

/// Keeps markup out of controllers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerView;

impl ControllerView {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ControllerView {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids HTML tags in controllers"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[HTML_IN_CONTROLLER]
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let class = ctx.node;
        if !is_layer(class.name(), LayerTag::Controller, &ctx.settings().vocabulary) {
            return vec![];
        }

        let Some(tag) = first_forbidden_token(ctx.unit.lowered_text(), HTML_TAGS) else {
            return vec![];
        };
        vec![ctx.report(
            &HTML_IN_CONTROLLER,
            ctx.identifier_location(class),
            &[&class.name(), &tag],
        )]
    }
}
