//! Rule to keep markup and SQL out of model classes.
//!
//! # Rationale
//!
//! A model (`ClienteVm`) describes data handed to a view. Markup belongs in
//! the view and SQL in the repository; either one inside a model file ties
//! the model to a layer it should not know about.
//!
//! # Detected Patterns
//!
//! - RA01-001: any HTML tag token anywhere in the unit's text. Every
//!   matching tag is reported, unlike the controller and view variants
//!   which stop at the first one.
//! - RA01-002: the first SQL token in the unit's text.
//!
//! Only classes whose identifier *ends* with the model token are checked.

use mvc_lint_core::layer::is_model_by_suffix;
use mvc_lint_core::scanners::{all_forbidden_tokens, first_forbidden_token};
use mvc_lint_core::vocabulary::{HTML_TAGS, SQL_TOKENS};
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for model-view.
pub const NAME: &str = "model-view";

/// HTML markup in a model.
pub const HTML_IN_MODEL: RuleDescriptor = RuleDescriptor::error(
    "RA01-001",
    NAME,
    "HTML tags are not allowed in the model",
    "Model '{0}' contains the HTML tag '{1}'",
);

/// SQL text in a model.
pub const SQL_IN_MODEL: RuleDescriptor = RuleDescriptor::error(
    "RA01-002",
    NAME,
    "SQL commands are not allowed in the model",
    "Model '{0}' contains the SQL command '{1}'",
);

const DESCRIPTORS: &[RuleDescriptor] = &[HTML_IN_MODEL, SQL_IN_MODEL];

/// Keeps markup and SQL out of model classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelView;

impl ModelView {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ModelView {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids HTML tags and SQL commands in model classes"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        DESCRIPTORS
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let class = ctx.node;
        if !is_model_by_suffix(class.name(), &ctx.settings().vocabulary) {
            return vec![];
        }

        let text = ctx.unit.lowered_text();
        let location = ctx.identifier_location(class);

        let mut diagnostics: Vec<Diagnostic> = all_forbidden_tokens(text, HTML_TAGS)
            .into_iter()
            .map(|tag| ctx.report(&HTML_IN_MODEL, location.clone(), &[&class.name(), &tag]))
            .collect();

        if let Some(command) = first_forbidden_token(text, SQL_TOKENS) {
            diagnostics.push(ctx.report(&SQL_IN_MODEL, location, &[&class.name(), &command]));
        }

        diagnostics
    }
}
