//! Context types for rule execution.

use crate::descriptor::RuleDescriptor;
use crate::semantic::SemanticModel;
use crate::syntax::{CompilationUnit, SyntaxKind, SyntaxNode, TextSpan};
use crate::types::{Diagnostic, Location};
use crate::vocabulary::Settings;

use std::path::Path;
use std::sync::OnceLock;

/// Per-unit state shared by every detector invocation on that unit.
pub struct UnitContext<'a> {
    /// The compilation unit being analyzed.
    pub unit: &'a CompilationUnit,
    /// Host symbol resolution for this unit.
    pub model: &'a dyn SemanticModel,
    /// Naming tokens and thresholds.
    pub settings: &'a Settings,
    lowered: OnceLock<String>,
}

impl<'a> UnitContext<'a> {
    /// Creates a unit context.
    #[must_use]
    pub fn new(
        unit: &'a CompilationUnit,
        model: &'a dyn SemanticModel,
        settings: &'a Settings,
    ) -> Self {
        Self {
            unit,
            model,
            settings,
            lowered: OnceLock::new(),
        }
    }

    /// Path of the unit.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.unit.path
    }

    /// Path of the unit as text, for naming-convention checks.
    #[must_use]
    pub fn path_str(&self) -> std::borrow::Cow<'_, str> {
        self.unit.path.to_string_lossy()
    }

    /// Full text of the unit in lower case, computed on first use.
    #[must_use]
    pub fn lowered_text(&self) -> &str {
        self.lowered.get_or_init(|| self.unit.text.to_lowercase())
    }

    /// Calculates byte offset for a given line and column.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-indexed line number
    /// * `column` - 1-indexed column number
    ///
    /// # Returns
    ///
    /// Byte offset from the start of the file, or 0 if out of bounds.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }

        let mut offset = 0;
        for (i, line_content) in self.unit.text.split_inclusive('\n').enumerate() {
            if i + 1 == line {
                return offset + column.saturating_sub(1);
            }
            // counts the terminator as written, `\r\n` included
            offset += line_content.len();
        }

        offset
    }

    /// Converts a span of this unit into a diagnostic location.
    #[must_use]
    pub fn location(&self, span: TextSpan) -> Location {
        let start = self.offset_for(span.start_line, span.start_column);
        let end = self.offset_for(span.end_line, span.end_column);
        Location::new(self.unit.path.clone(), span.start_line, span.start_column)
            .with_span(start, end.saturating_sub(start))
    }
}

/// Context handed to a detector for one dispatched node.
pub struct NodeContext<'a> {
    /// Unit-level context.
    pub unit: &'a UnitContext<'a>,
    /// The dispatched node.
    pub node: &'a SyntaxNode,
    /// Ancestors of `node`, outermost first.
    pub ancestors: &'a [&'a SyntaxNode],
}

impl<'a> NodeContext<'a> {
    /// Host symbol resolution.
    #[must_use]
    pub fn model(&self) -> &'a dyn SemanticModel {
        self.unit.model
    }

    /// Naming tokens and thresholds.
    #[must_use]
    pub fn settings(&self) -> &'a Settings {
        self.unit.settings
    }

    /// Nearest enclosing class declaration, or the node itself if it is one.
    #[must_use]
    pub fn enclosing_class(&self) -> Option<&'a SyntaxNode> {
        if self.node.kind == SyntaxKind::ClassDeclaration {
            return Some(self.node);
        }
        self.ancestors
            .iter()
            .rev()
            .copied()
            .find(|n| n.kind == SyntaxKind::ClassDeclaration)
    }

    /// Location of a node's identifier token.
    #[must_use]
    pub fn identifier_location(&self, node: &SyntaxNode) -> Location {
        self.unit.location(node.identifier_span())
    }

    /// Location of a whole node.
    #[must_use]
    pub fn node_location(&self, node: &SyntaxNode) -> Location {
        self.unit.location(node.span)
    }

    /// Builds a diagnostic for `descriptor` with positional message arguments.
    #[must_use]
    pub fn report(
        &self,
        descriptor: &RuleDescriptor,
        location: Location,
        args: &[&dyn std::fmt::Display],
    ) -> Diagnostic {
        descriptor.diagnostic(location, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SymbolTable;

    fn unit(text: &str) -> CompilationUnit {
        CompilationUnit::new(
            "Controllers/HomeController.cs",
            text,
            SyntaxNode::new(SyntaxKind::CompilationUnit),
        )
    }

    #[test]
    fn test_offset_calculation() {
        let unit = unit("line1\nline2\nline3");
        let table = SymbolTable::new();
        let settings = Settings::default();
        let ctx = UnitContext::new(&unit, &table, &settings);

        assert_eq!(ctx.offset_for(1, 1), 0); // Start of line 1
        assert_eq!(ctx.offset_for(2, 1), 6); // Start of line 2
        assert_eq!(ctx.offset_for(2, 3), 8); // "ne" in line2
    }

    #[test]
    fn offsets_follow_crlf_line_endings() {
        let unit = unit("using System;\r\n\r\nclass HomeController\r\n{\r\n}\r\n");
        let table = SymbolTable::new();
        let settings = Settings::default();
        let ctx = UnitContext::new(&unit, &table, &settings);

        assert_eq!(ctx.offset_for(2, 1), 15);
        assert_eq!(ctx.offset_for(3, 7), 23);
        let location = ctx.location(TextSpan::new(3, 7, 3, 21));
        assert_eq!(&unit.text[location.offset..location.offset + location.length], "HomeController");
    }

    #[test]
    fn location_carries_byte_span() {
        let unit = unit("class HomeController {\n}\n");
        let table = SymbolTable::new();
        let settings = Settings::default();
        let ctx = UnitContext::new(&unit, &table, &settings);

        let location = ctx.location(TextSpan::new(1, 7, 1, 21));
        assert_eq!(location.line, 1);
        assert_eq!(location.column, 7);
        assert_eq!(location.offset, 6);
        assert_eq!(location.length, 14);
    }

    #[test]
    fn lowered_text_is_cached() {
        let unit = unit("SELECT * FROM Clientes");
        let table = SymbolTable::new();
        let settings = Settings::default();
        let ctx = UnitContext::new(&unit, &table, &settings);

        assert_eq!(ctx.lowered_text(), "select * from clientes");
        assert!(std::ptr::eq(ctx.lowered_text(), ctx.lowered_text()));
    }

    #[test]
    fn enclosing_class_searches_ancestors() {
        let unit = unit("");
        let table = SymbolTable::new();
        let settings = Settings::default();
        let ctx = UnitContext::new(&unit, &table, &settings);

        let class = SyntaxNode::new(SyntaxKind::ClassDeclaration).named("Outer");
        let method = SyntaxNode::new(SyntaxKind::MethodDeclaration);
        let creation = SyntaxNode::new(SyntaxKind::ObjectCreationExpression);
        let ancestors = [&class, &method];
        let node_ctx = NodeContext {
            unit: &ctx,
            node: &creation,
            ancestors: &ancestors,
        };
        assert_eq!(node_ctx.enclosing_class().map(SyntaxNode::name), Some("Outer"));

        let orphan = NodeContext {
            unit: &ctx,
            node: &creation,
            ancestors: &[],
        };
        assert!(orphan.enclosing_class().is_none());
    }
}
