//! Rule to enforce the direction of layer dependencies.
//!
//! # Rationale
//!
//! Dependencies run Controller/View -> Service -> Business logic ->
//! Repository. Instantiating an object of a layer that is above the current
//! one, or skipping the layer in between, inverts that direction.
//!
//! # Detected Patterns
//!
//! Every object creation inside a class, classified by the unit path and
//! the created type's text:
//!
//! - RA15-001: a service unit creating a data-access object.
//! - RA15-002: a business-logic unit creating a service object.
//! - RA15-003: a data-access unit creating a service or business-logic
//!   object.
//!
//! The checks are independent; one creation can trigger several of them
//! when a path carries more than one token.

use mvc_lint_core::layer::contains_token;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};
use tracing::trace;

/// Rule name for architecture-violation.
pub const NAME: &str = "architecture-violation";

/// Service creating a data-access object.
pub const SERVICE_CREATES_DATA_ACCESS: RuleDescriptor = RuleDescriptor::error(
    "RA15-001",
    NAME,
    "The service layer references data access",
    "Service classes must not instantiate the data-access object '{0}' directly",
);

/// Business logic creating a service object.
pub const LOGIC_CREATES_SERVICE: RuleDescriptor = RuleDescriptor::error(
    "RA15-002",
    NAME,
    "The business-logic layer references services",
    "Business-logic classes must not instantiate the service object '{0}' directly",
);

/// Data access creating a service or business-logic object.
pub const DATA_ACCESS_CREATES_UPPER_LAYER: RuleDescriptor = RuleDescriptor::error(
    "RA15-003",
    NAME,
    "The data-access layer references business logic or services",
    "Data-access classes must not instantiate the service or business-logic object '{0}' directly",
);

const DESCRIPTORS: &[RuleDescriptor] = &[
    SERVICE_CREATES_DATA_ACCESS,
    LOGIC_CREATES_SERVICE,
    DATA_ACCESS_CREATES_UPPER_LAYER,
];

/// Flags object creations that point up or across the layer stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchitectureViolation;

impl ArchitectureViolation {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ArchitectureViolation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids instantiating objects of a higher or skipped layer"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        DESCRIPTORS
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ObjectCreationExpression]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let creation = ctx.node;
        if ctx.enclosing_class().is_none() {
            trace!(created = creation.text(), "object creation outside a class");
            return vec![];
        }

        let vocabulary = &ctx.settings().vocabulary;
        let path = ctx.unit.path_str();
        let created = creation.text();
        let path_is = |token: &str| contains_token(&path, token);
        let creates = |token: &str| contains_token(created, token);

        let mut diagnostics = Vec::new();
        let mut flag = |descriptor: &RuleDescriptor| {
            diagnostics.push(ctx.report(descriptor, ctx.node_location(creation), &[&created]));
        };

        if path_is(&vocabulary.service) && creates(&vocabulary.data_access) {
            flag(&SERVICE_CREATES_DATA_ACCESS);
        }
        if path_is(&vocabulary.business_logic) && creates(&vocabulary.service) {
            flag(&LOGIC_CREATES_SERVICE);
        }
        if path_is(&vocabulary.data_access)
            && (creates(&vocabulary.service) || creates(&vocabulary.business_logic))
        {
            flag(&DATA_ACCESS_CREATES_UPPER_LAYER);
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{class, codes, method_with, run, unit};
    use mvc_lint_core::{SymbolTable, SyntaxNode, TextSpan};

    fn new_object(ty: &str) -> SyntaxNode {
        SyntaxNode::new(SyntaxKind::ObjectCreationExpression)
            .with_span(TextSpan::new(7, 23, 7, 40))
            .with_text(ty)
    }

    fn check(path: &str, ty: &str) -> Vec<Diagnostic> {
        let unit = unit(path, "", [class("Clase").with_child(method_with("Ejecutar", [new_object(ty)]))]);
        run(ArchitectureViolation::new(), &unit, &SymbolTable::new())
    }

    #[test]
    fn service_creating_data_access() {
        let diagnostics = check("Servicios/Cliente.wsr.cs", "ClienteDal");
        assert_eq!(codes(&diagnostics), vec!["RA15-001"]);
        assert_eq!(diagnostics[0].location.line, 7);
        assert_eq!(
            diagnostics[0].message,
            "Service classes must not instantiate the data-access object 'ClienteDal' directly"
        );
    }

    #[test]
    fn logic_creating_service() {
        assert_eq!(codes(&check("Negocio/Cliente.bll.cs", "ClienteWsr")), vec!["RA15-002"]);
    }

    #[test]
    fn data_access_creating_upper_layers() {
        assert_eq!(codes(&check("Datos/Cliente.dal.cs", "ClienteBll")), vec!["RA15-003"]);
        assert_eq!(codes(&check("Datos/Cliente.dal.cs", "ClienteWsr")), vec!["RA15-003"]);
    }

    #[test]
    fn downward_creation_is_fine() {
        assert!(check("Servicios/Cliente.wsr.cs", "ClienteBll").is_empty());
        assert!(check("Negocio/Cliente.bll.cs", "ClienteDal").is_empty());
        assert!(check("Controllers/ClienteController.cs", "ClienteDal").is_empty());
    }

    #[test]
    fn checks_are_independent() {
        let diagnostics = check("Servicios/Dal/Cliente.wsr.cs", "ClienteDalWsr");
        assert_eq!(codes(&diagnostics), vec!["RA15-001", "RA15-003"]);
    }

    #[test]
    fn creation_outside_a_class_is_ignored() {
        let unit = unit("Servicios/Cliente.wsr.cs", "", [new_object("ClienteDal")]);
        assert!(run(ArchitectureViolation::new(), &unit, &SymbolTable::new()).is_empty());
    }
}
