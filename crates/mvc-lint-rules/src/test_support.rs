//! Fixture builders shared by the rule tests.

use mvc_lint_core::{
    Analyzer, CompilationUnit, Diagnostic, Modifier, Rule, Settings, SymbolTable, SyntaxKind,
    SyntaxNode, TextSpan,
};

/// Class declaration spanning `lines` lines from `line`, identifier at column 14.
pub(crate) fn class_at(name: &str, line: usize, lines: usize) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::ClassDeclaration)
        .with_span(TextSpan::lines(line, line + lines.saturating_sub(1)))
        .with_identifier(name, TextSpan::new(line, 14, line, 14 + name.len()))
}

/// Ten-line class declaration starting at line 1.
pub(crate) fn class(name: &str) -> SyntaxNode {
    class_at(name, 1, 10)
}

/// Public method with an empty body.
pub(crate) fn public_method(name: &str) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::MethodDeclaration)
        .named(name)
        .with_modifier(Modifier::Public)
        .with_child(SyntaxNode::new(SyntaxKind::Block))
}

/// Method whose body holds `statements`.
pub(crate) fn method_with(name: &str, statements: impl IntoIterator<Item = SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::MethodDeclaration)
        .named(name)
        .with_modifier(Modifier::Public)
        .with_child(SyntaxNode::new(SyntaxKind::Block).with_children(statements))
}

/// Compilation unit wrapping `nodes` under its root.
pub(crate) fn unit(path: &str, text: &str, nodes: impl IntoIterator<Item = SyntaxNode>) -> CompilationUnit {
    CompilationUnit::new(
        path,
        text,
        SyntaxNode::new(SyntaxKind::CompilationUnit).with_children(nodes),
    )
}

/// Runs one rule over a unit with default settings.
pub(crate) fn run<R: Rule + 'static>(rule: R, unit: &CompilationUnit, symbols: &SymbolTable) -> Vec<Diagnostic> {
    run_with(rule, Settings::default(), unit, symbols)
}

/// Runs one rule over a unit with the given settings.
pub(crate) fn run_with<R: Rule + 'static>(
    rule: R,
    settings: Settings,
    unit: &CompilationUnit,
    symbols: &SymbolTable,
) -> Vec<Diagnostic> {
    Analyzer::builder()
        .settings(settings)
        .rule(rule)
        .build()
        .expect("Failed to build analyzer")
        .analyze_unit(unit, symbols)
}

/// Diagnostic codes, in emission order.
pub(crate) fn codes(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.code.as_str()).collect()
}
