//! Rule to keep data access out of the service layer.
//!
//! # Rationale
//!
//! Services sit between controllers and the business layer. SQL text or an
//! import of a data-access library means the service reaches past the
//! layers below it.
//!
//! # Detected Patterns
//!
//! - RA09-001: the first SQL token in a unit whose path contains the service
//!   token.
//! - RA09-002: every `using` directive of such a unit naming a data-access
//!   namespace, one diagnostic per directive.

use mvc_lint_core::layer::{is_layer, LayerTag};
use mvc_lint_core::scanners::{first_forbidden_token, is_data_access_namespace};
use mvc_lint_core::vocabulary::SQL_TOKENS;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for meddling-service.
pub const NAME: &str = "meddling-service";

/// SQL text in a service.
pub const SQL_IN_SERVICE: RuleDescriptor = RuleDescriptor::error(
    "RA09-001",
    NAME,
    "SQL commands are not allowed in the service layer",
    "Service '{0}' contains the SQL command '{1}'",
);

/// Data-access library import in a service.
pub const DATA_ACCESS_IMPORT_IN_SERVICE: RuleDescriptor = RuleDescriptor::error(
    "RA09-002",
    NAME,
    "Data-access library references are not allowed in the service layer",
    "Service '{0}' imports the data-access library '{1}'",
);

const DESCRIPTORS: &[RuleDescriptor] = &[SQL_IN_SERVICE, DATA_ACCESS_IMPORT_IN_SERVICE];

/// Keeps SQL and data-access imports out of services.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeddlingService;

impl MeddlingService {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MeddlingService {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids SQL commands and data-access imports in the service layer"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        DESCRIPTORS
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        if !is_layer(&ctx.unit.path_str(), LayerTag::Service, &ctx.settings().vocabulary) {
            return vec![];
        }

        let class = ctx.node;
        let location = ctx.identifier_location(class);
        let mut diagnostics = Vec::new();

        if let Some(command) = first_forbidden_token(ctx.unit.lowered_text(), SQL_TOKENS) {
            diagnostics.push(ctx.report(&SQL_IN_SERVICE, location.clone(), &[&class.name(), &command]));
        }

        for directive in ctx.unit.unit.using_directives() {
            let namespace = directive.text().trim();
            if is_data_access_namespace(namespace) {
                diagnostics.push(ctx.report(
                    &DATA_ACCESS_IMPORT_IN_SERVICE,
                    location.clone(),
                    &[&class.name(), &namespace],
                ));
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{class, codes, run, unit};
    use mvc_lint_core::{SymbolTable, SyntaxNode};

    fn using(name: &str) -> SyntaxNode {
        SyntaxNode::new(SyntaxKind::UsingDirective).with_text(name)
    }

    #[test]
    fn select_in_service_reported_once() {
        let unit = unit(
            "Modulos/Usuario.wsr.cs",
            "string q = \"select nombre\";",
            [class("UsuarioServicio")],
        );
        let diagnostics = run(MeddlingService::new(), &unit, &SymbolTable::new());
        assert_eq!(codes(&diagnostics), vec!["RA09-001"]);
        assert_eq!(
            diagnostics[0].message,
            "Service 'UsuarioServicio' contains the SQL command 'select'"
        );
    }

    #[test]
    fn every_data_access_import_is_reported() {
        let unit = unit(
            "Modulos/Usuario.wsr.cs",
            "",
            [
                using("System"),
                using("System.Data"),
                using("System.Linq"),
                using("System.Data.SqlClient"),
                SyntaxNode::new(SyntaxKind::Namespace)
                    .with_child(using("System.Xml"))
                    .with_child(class("UsuarioServicio")),
            ],
        );
        let diagnostics = run(MeddlingService::new(), &unit, &SymbolTable::new());
        assert_eq!(codes(&diagnostics), vec!["RA09-002"; 3]);
        let imports: Vec<_> = diagnostics
            .iter()
            .map(|d| d.message.rsplit(' ').next().unwrap_or_default())
            .collect();
        assert_eq!(imports, vec!["'System.Data'", "'System.Linq'", "'System.Xml'"]);
    }

    #[test]
    fn non_service_path_is_ignored() {
        let unit = unit("Modulos/Usuario.bll.cs", "select", [using("System.Data"), class("UsuarioBll")]);
        assert!(run(MeddlingService::new(), &unit, &SymbolTable::new()).is_empty());
    }
}
