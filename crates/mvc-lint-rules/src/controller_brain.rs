//! Rule to limit control flow in controller actions.
//!
//! # Rationale
//!
//! Branching belongs in the business layer. A controller whose actions carry
//! many `if`/`switch`/loop/`catch` nodes is making decisions it should
//! delegate.
//!
//! # Detected Patterns
//!
//! - RA07-001: control-flow nodes summed over the public, non-override,
//!   non-self-named methods of a controller exceed `max_control_flow`.

use mvc_lint_core::layer::{is_layer, LayerTag};
use mvc_lint_core::metrics::control_flow_complexity;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for controller-brain.
pub const NAME: &str = "controller-brain";

/// Too much control flow in a controller.
pub const CONTROL_FLOW_TOO_LARGE: RuleDescriptor = RuleDescriptor::error(
    "RA07-001",
    NAME,
    "Controller control flow is too large",
    "Controller '{0}' has {1} control-flow statements in its actions (limit {2})",
);

/// Limits control flow in controller actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerBrain;

impl ControllerBrain {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ControllerBrain {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits control-flow statements across a controller's actions"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[CONTROL_FLOW_TOO_LARGE]
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

        let complexity = control_flow_complexity(class);
        let limit = settings.thresholds.max_control_flow;
        if complexity <= limit {
            return vec![];
        }

        vec![ctx.report(
            &CONTROL_FLOW_TOO_LARGE,
            ctx.identifier_location(class),
            &[&class.name(), &complexity, &limit],
        )]
    }
}
