//! Rule to limit the public surface of controllers.
//!
//! # Rationale
//!
//! A controller offering many actions, taking many action parameters or
//! injecting many collaborators is serving several features at once and
//! should be split.
//!
//! # Detected Patterns
//!
//! - RA08-001: a controller whose action count exceeds
//!   `max_controller_methods`, whose action parameters exceed
//!   `max_controller_parameters`, or whose first constructor takes more
//!   than `max_constructor_dependencies` parameters. Reported once.

use mvc_lint_core::layer::{is_layer, LayerTag};
use mvc_lint_core::metrics::action_metrics;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for promiscuous-controller.
pub const NAME: &str = "promiscuous-controller";

/// Too many actions, routes or dependencies in a controller.
pub const TOO_MANY_ACTIONS: RuleDescriptor = RuleDescriptor::error(
    "RA08-001",
    NAME,
    "Controller offers too many actions and routes",
    "Controller '{0}' has {1} actions, {2} action parameters and {3} constructor dependencies",
);

/// Limits the public surface of controllers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromiscuousController;

impl PromiscuousController {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PromiscuousController {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits actions, action parameters and constructor dependencies of controllers"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[TOO_MANY_ACTIONS]
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let class = ctx.node;
        let settings = ctx.settings();
        if !is_layer(class.name(), LayerTag::Controller, &settings.vocabulary) {
            return vec![];
        }

        let metrics = action_metrics(class);
        let limits = &settings.thresholds;
        let exceeded = metrics.methods > limits.max_controller_methods
            || metrics.parameters > limits.max_controller_parameters
            || metrics.dependencies > limits.max_constructor_dependencies;
        if !exceeded {
            return vec![];
        }

        vec![ctx.report(
            &TOO_MANY_ACTIONS,
            ctx.identifier_location(class),
            &[
                &class.name(),
                &metrics.methods,
                &metrics.parameters,
                &metrics.dependencies,
            ],
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{class, codes, public_method, run, unit};
    use mvc_lint_core::{SymbolTable, SyntaxNode};

    fn check(controller: SyntaxNode) -> Vec<Diagnostic> {
        let unit = unit("Controllers/PedidoController.cs", "", [controller]);
        run(PromiscuousController::new(), &unit, &SymbolTable::new())
    }

    fn with_actions(mut controller: SyntaxNode, n: usize) -> SyntaxNode {
        for i in 0..n {
            controller = controller.with_child(public_method(&format!("Accion{i}")));
        }
        controller
    }

    #[test]
    fn too_many_actions() {
        let diagnostics = check(with_actions(class("PedidoController"), 21));
        assert_eq!(codes(&diagnostics), vec!["RA08-001"]);
        assert_eq!(
            diagnostics[0].message,
            "Controller 'PedidoController' has 21 actions, 0 action parameters and 0 constructor dependencies"
        );
    }

    #[test]
    fn twenty_actions_is_fine() {
        assert!(check(with_actions(class("PedidoController"), 20)).is_empty());
    }

    #[test]
    fn too_many_parameters() {
        let mut action = public_method("Buscar");
        for i in 0..11 {
            action = action.with_parameter(format!("p{i}"));
        }
        let diagnostics = check(class("PedidoController").with_child(action));
        assert_eq!(codes(&diagnostics), vec!["RA08-001"]);
    }

    #[test]
    fn too_many_constructor_dependencies() {
        let mut ctor = SyntaxNode::new(SyntaxKind::ConstructorDeclaration).named("PedidoController");
        for i in 0..6 {
            ctor = ctor.with_parameter(format!("dep{i}"));
        }
        let diagnostics = check(class("PedidoController").with_child(ctor));
        assert_eq!(codes(&diagnostics), vec!["RA08-001"]);
        assert!(diagnostics[0].message.ends_with("6 constructor dependencies"));
    }
}
