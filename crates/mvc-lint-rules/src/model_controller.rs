//! Rule to keep HTTP actions out of model classes.
//!
//! # Rationale
//!
//! Members marked `[HttpPost]` or `[HttpGet]` are controller actions. A
//! model that declares one is acting as a controller.
//!
//! # Detected Patterns
//!
//! - RA02-001: the first member of a model class carrying an HTTP verb
//!   attribute. The class is a model when its identifier *contains* the
//!   model token, a looser test than the one the model content rule uses.

use mvc_lint_core::layer::{is_layer, LayerTag};
use mvc_lint_core::scanners::first_http_action_member;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for model-controller.
pub const NAME: &str = "model-controller";

/// HTTP verb attribute on a model member.
pub const HTTP_ACTION_IN_MODEL: RuleDescriptor = RuleDescriptor::error(
    "RA02-001",
    NAME,
    "HTTP actions are not allowed in the model",
    "Model '{0}' declares the HTTP action '{1}'",
);

/// Keeps HTTP actions out of model classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelController;

impl ModelController {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ModelController {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids HTTP verb attributes on model members"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[HTTP_ACTION_IN_MODEL]
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let class = ctx.node;
        if !is_layer(class.name(), LayerTag::Model, &ctx.settings().vocabulary) {
            return vec![];
        }

        first_http_action_member(class, ctx.model())
            .map(|member| {
                ctx.report(
                    &HTTP_ACTION_IN_MODEL,
                    ctx.node_location(member),
                    &[&class.name(), &member.name()],
                )
            })
            .into_iter()
            .collect()
    }
}
