//! Rule to limit class length.
//!
//! # Detected Patterns
//!
//! - RA16-001: a class declaration spanning more than `max_class_lines`
//!   lines. Nested classes are measured on their own.

use mvc_lint_core::metrics::line_count;
use mvc_lint_core::{Diagnostic, NodeContext, Rule, RuleDescriptor, SyntaxKind};

/// Rule name for god-class.
pub const NAME: &str = "god-class";

/// Class too long.
pub const CLASS_TOO_LONG: RuleDescriptor = RuleDescriptor::error(
    "RA16-001",
    NAME,
    "The class is too large",
    "Class '{0}' has {1} lines (limit {2})",
);

/// Limits the length of a class declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct GodClass;

impl GodClass {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for GodClass {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of source lines in a class"
    }

    fn descriptors(&self) -> &'static [RuleDescriptor] {
        &[CLASS_TOO_LONG]
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ClassDeclaration]
    }

    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
        let class = ctx.node;
        let lines = line_count(class);
        let limit = ctx.settings().thresholds.max_class_lines;
        if lines <= limit {
            return vec![];
        }

        vec![ctx.report(
            &CLASS_TOO_LONG,
            ctx.identifier_location(class),
            &[&class.name(), &lines, &limit],
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{class_at, codes, run, run_with, unit};
    use mvc_lint_core::{Settings, SymbolTable, Thresholds, Vocabulary};

    #[test]
    fn long_class_with_nested_class_reports_once() {
        let outer = class_at("Facturacion", 1, 600).with_child(class_at("Detalle", 10, 40));
        let unit = unit("Negocio/Facturacion.bll.cs", "", [outer]);

        let diagnostics = run(GodClass::new(), &unit, &SymbolTable::new());
        assert_eq!(codes(&diagnostics), vec!["RA16-001"]);
        assert_eq!(
            diagnostics[0].message,
            "Class 'Facturacion' has 600 lines (limit 500)"
        );
    }

    #[test]
    fn exactly_five_hundred_lines_is_fine() {
        let unit = unit("Negocio/Facturacion.bll.cs", "", [class_at("Facturacion", 1, 500)]);
        assert!(run(GodClass::new(), &unit, &SymbolTable::new()).is_empty());
    }

    #[test]
    fn limit_follows_settings() {
        let thresholds = Thresholds {
            max_class_lines: 100,
            ..Thresholds::default()
        };
        let settings = Settings::new(Vocabulary::default(), thresholds);
        let unit = unit("Negocio/Facturacion.bll.cs", "", [class_at("Facturacion", 1, 150)]);
        let diagnostics = run_with(GodClass::new(), settings, &unit, &SymbolTable::new());
        assert_eq!(codes(&diagnostics), vec!["RA16-001"]);
    }
}
