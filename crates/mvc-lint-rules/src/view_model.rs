//! Rule to keep data access out of views.
//!
//! # Rationale
//!
//! A Razor view renders what the controller hands it. SQL text or members
//! typed from data-access libraries mean the view is fetching its own data.
//!
//! # Detected Patterns
//!
//! - RA03-001: the first SQL token in a unit whose path contains the view
//!   token.
//! - RA03-002: a member whose type, or one of whose attributes, belongs to
//!   a data-access namespace. Reported once per class.

use mvc_lint_core::layer::{is_layer, LayerTag};
use mvc_lint_core::scanners::{first_forbidden_token, member_references_data_access};
use mvc_lint_core::vocabulary::SQL_TOKENS;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for view-model.
pub const NAME: &str = "view-model";

/// SQL text in a view.
pub const SQL_IN_VIEW: RuleDescriptor = RuleDescriptor::error(
    "RA03-001",
    NAME,
    "SQL commands are not allowed in the view",
    "View '{0}' contains the SQL command '{1}'",
);

/// Data-access library reference in a view.
pub const DATA_ACCESS_IN_VIEW: RuleDescriptor = RuleDescriptor::error(
    "RA03-002",
    NAME,
    "Data-access library references are not allowed in the view",
    "View '{0}' references a data-access library",
);

const DESCRIPTORS: &[RuleDescriptor] = &[SQL_IN_VIEW, DATA_ACCESS_IN_VIEW];

/// Keeps SQL and data-access references out of views.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewModel;

impl ViewModel {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ViewModel {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids SQL commands and data-access library references in views"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        DESCRIPTORS
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        if !is_layer(&ctx.unit.path_str(), LayerTag::View, &ctx.settings().vocabulary) {
            return vec![];
        }

        let class = ctx.node;
        let location = ctx.identifier_location(class);
        let mut diagnostics = Vec::new();

        if let Some(command) = first_forbidden_token(ctx.unit.lowered_text(), SQL_TOKENS) {
            diagnostics.push(ctx.report(&SQL_IN_VIEW, location.clone(), &[&class.name(), &command]));
        }

        if class
            .members()
            .any(|member| member_references_data_access(member, ctx.model()))
        {
            diagnostics.push(ctx.report(&DATA_ACCESS_IN_VIEW, location, &[&class.name()]));
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{class, codes, run, unit};
    use mvc_lint_core::{
        AttributeData, Symbol, SymbolKind, SymbolTable, SyntaxNode, TypeInfo, TypeKind,
    };

    const VIEW_PATH: &str = "Views/Cliente/Index.cshtml";

    #[test]
    fn sql_in_view_stops_at_first_match() {
        let unit = unit(
            VIEW_PATH,
            "@{ var rows = db.Query(\"SELECT * FROM Clientes GROUP BY Zona\"); }",
            [class("Index_Page")],
        );
        let diagnostics = run(ViewModel::new(), &unit, &SymbolTable::new());
        assert_eq!(codes(&diagnostics), vec!["RA03-001"]);
        assert!(diagnostics[0].message.ends_with("'group by'"));
    }

    #[test]
    fn data_access_member_reported_once() {
        let page = class("Index_Page")
            .with_child(SyntaxNode::new(SyntaxKind::FieldDeclaration).with_id(1))
            .with_child(SyntaxNode::new(SyntaxKind::PropertyDeclaration).with_id(2));
        let unit = unit(VIEW_PATH, "", [page]);
        let symbols = SymbolTable::new()
            .with_type(
                1,
                TypeInfo::new(100, "DataSet", TypeKind::Class).in_namespace("System.Data"),
            )
            .with_declaration(
                2,
                Symbol::new(200, "Items", SymbolKind::Property)
                    .with_attribute(AttributeData::new("XmlIgnore", Some("System.Xml"))),
            );

        let diagnostics = run(ViewModel::new(), &unit, &symbols);
        assert_eq!(codes(&diagnostics), vec!["RA03-002"]);
        assert_eq!(diagnostics[0].message, "View 'Index_Page' references a data-access library");
    }

    #[test]
    fn nested_namespace_is_not_a_match() {
        let page = class("Index_Page")
            .with_child(SyntaxNode::new(SyntaxKind::FieldDeclaration).with_id(1));
        let unit = unit(VIEW_PATH, "", [page]);
        let symbols = SymbolTable::new().with_type(
            1,
            TypeInfo::new(100, "SqlConnection", TypeKind::Class)
                .in_namespace("System.Data.SqlClient"),
        );
        assert!(run(ViewModel::new(), &unit, &symbols).is_empty());
    }

    #[test]
    fn non_view_path_is_ignored() {
        let unit = unit("Models/Cliente.cs", "select", [class("Cliente")]);
        assert!(run(ViewModel::new(), &unit, &SymbolTable::new()).is_empty());
    }
}
