//! Rule to keep data access out of controllers.
//!
//! # Rationale
//!
//! Controllers coordinate requests and delegate to services. SQL text or
//! members typed from data-access libraries mean the controller is doing
//! the repository's job.
//!
//! # Detected Patterns
//!
//! - RA06-001: the first SQL token in a unit whose path contains the
//!   controller token.
//! - RA06-002: a member whose type, or one of whose attributes, belongs to
//!   a data-access namespace. Reported once per class.

use mvc_lint_core::layer::{is_layer, LayerTag};
use mvc_lint_core::scanners::{first_forbidden_token, member_references_data_access};
use mvc_lint_core::vocabulary::SQL_TOKENS;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for controller-model.
pub const NAME: &str = "controller-model";

/// SQL text in a controller.
pub const SQL_IN_CONTROLLER: RuleDescriptor = RuleDescriptor::error(
    "RA06-001",
    NAME,
    "SQL commands are not allowed in the controller",
    "Controller '{0}' contains the SQL command '{1}'",
);

/// Data-access library reference in a controller.
pub const DATA_ACCESS_IN_CONTROLLER: RuleDescriptor = RuleDescriptor::error(
    "RA06-002",
    NAME,
    "Data-access library references are not allowed in the controller",
    "Controller '{0}' references a data-access library",
);

const DESCRIPTORS: &[RuleDescriptor] = &[SQL_IN_CONTROLLER, DATA_ACCESS_IN_CONTROLLER];

/// Keeps SQL and data-access references out of controllers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerModel;

impl ControllerModel {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ControllerModel {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids SQL commands and data-access library references in controllers"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        DESCRIPTORS
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        if !is_layer(&ctx.unit.path_str(), LayerTag::Controller, &ctx.settings().vocabulary) {
            return vec![];
        }

        let class = ctx.node;
        let location = ctx.identifier_location(class);
        let mut diagnostics = Vec::new();

        if let Some(command) = first_forbidden_token(ctx.unit.lowered_text(), SQL_TOKENS) {
            diagnostics.push(ctx.report(
                &SQL_IN_CONTROLLER,
                location.clone(),
                &[&class.name(), &command],
            ));
        }

        if class
            .members()
            .any(|member| member_references_data_access(member, ctx.model()))
        {
            diagnostics.push(ctx.report(&DATA_ACCESS_IN_CONTROLLER, location, &[&class.name()]));
        }

        diagnostics
    }
}
