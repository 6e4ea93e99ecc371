//! Integration test: the full catalog over a small multi-layer project.

use mvc_lint_core::{
    Analyzer, CancellationToken, CompilationUnit, Config, Modifier, SemanticModel, Symbol,
    SymbolKind, SymbolTable, SyntaxKind, SyntaxNode, TextSpan, UnitSnapshot,
};
use mvc_lint_rules::all_rules;
use std::path::Path;

fn class(name: &str) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::ClassDeclaration)
        .with_id(1)
        .with_span(TextSpan::lines(1, 40))
        .with_identifier(name, TextSpan::new(1, 14, 1, 14 + name.len()))
}

fn method(name: &str, statements: impl IntoIterator<Item = SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::MethodDeclaration)
        .named(name)
        .with_modifier(Modifier::Public)
        .with_child(SyntaxNode::new(SyntaxKind::Block).with_children(statements))
}

fn unit(path: &str, text: &str, class: SyntaxNode) -> CompilationUnit {
    CompilationUnit::new(
        path,
        text,
        SyntaxNode::new(SyntaxKind::CompilationUnit).with_child(class),
    )
}

/// A controller with 21 branches in one action.
fn controller() -> (CompilationUnit, SymbolTable) {
    let ifs = (0..21).map(|_| SyntaxNode::new(SyntaxKind::IfStatement));
    let unit = unit(
        "Controllers/ClienteController.cs",
        "public class ClienteController : Controller { }",
        class("ClienteController").with_child(method("Index", ifs)),
    );
    (unit, SymbolTable::new())
}

/// A service embedding a query.
fn service() -> (CompilationUnit, SymbolTable) {
    let unit = unit(
        "Modulos/Usuario.wsr.cs",
        "string q = \"select nombre\";",
        class("UsuarioServicio"),
    );
    (unit, SymbolTable::new())
}

/// A repository touching four entity types.
fn repository() -> (CompilationUnit, SymbolTable) {
    let idents = (10..14).map(|id| SyntaxNode::new(SyntaxKind::IdentifierName).with_id(id));
    let unit = unit(
        "Dal/VentaDal.cs",
        "",
        class("VentaDal").with_child(method("Guardar", idents)),
    );
    let symbols = ["EntCliente", "EntPedido", "EntProducto", "EntFactura"]
        .into_iter()
        .zip(10..)
        .fold(SymbolTable::new(), |table, (name, id)| {
            table.with_symbol(id, Symbol::new(id + 100, name, SymbolKind::NamedType))
        });
    (unit, symbols)
}

fn project() -> Vec<(CompilationUnit, SymbolTable)> {
    vec![controller(), service(), repository()]
}

fn analyze(analyzer: &Analyzer, project: &[(CompilationUnit, SymbolTable)]) -> Vec<String> {
    let units: Vec<(&CompilationUnit, &dyn SemanticModel)> = project
        .iter()
        .map(|(unit, symbols)| (unit, symbols as &dyn SemanticModel))
        .collect();
    analyzer
        .analyze_all(&units, &CancellationToken::new())
        .diagnostics
        .into_iter()
        .map(|d| d.code)
        .collect()
}

#[test]
fn each_layer_reports_its_smell() {
    let analyzer = Analyzer::builder()
        .rules(all_rules())
        .build()
        .expect("analyzer should build");

    let project = project();
    assert_eq!(
        analyze(&analyzer, &project),
        vec!["RA07-001", "RA11-001", "RA09-001"]
    );
}

#[test]
fn analysis_is_idempotent() {
    let analyzer = Analyzer::builder()
        .rules(all_rules())
        .parallelism(2)
        .build()
        .expect("analyzer should build");

    for (unit, symbols) in project() {
        let first = analyzer.analyze_unit(&unit, &symbols);
        let second = analyzer.analyze_unit(&unit, &symbols);
        assert_eq!(first, second, "{}", unit.path.display());
    }

    let project = project();
    assert_eq!(analyze(&analyzer, &project), analyze(&analyzer, &project));
}

#[test]
fn rules_disabled_in_config_are_silent() {
    let config = Config::parse(
        r#"
[rules.controller-brain]
enabled = false

[rules.RA11-001]
enabled = false
"#,
    )
    .expect("config should parse");

    let analyzer = Analyzer::builder()
        .config(config)
        .rules(all_rules())
        .build()
        .expect("analyzer should build");

    assert_eq!(analyze(&analyzer, &project()), vec!["RA09-001"]);
}

#[test]
fn thresholds_come_from_config() {
    let config = Config::parse(
        r#"
[thresholds]
max_control_flow = 30
max_repository_entities = 4
"#,
    )
    .expect("config should parse");

    let analyzer = Analyzer::builder()
        .config(config)
        .rules(all_rules())
        .build()
        .expect("analyzer should build");

    assert_eq!(analyze(&analyzer, &project()), vec!["RA09-001"]);
}

#[test]
fn selection_narrows_the_catalog() {
    let analyzer = Analyzer::builder()
        .rules(all_rules())
        .select(["big-repository"])
        .build()
        .expect("analyzer should build");

    assert_eq!(analyzer.rule_count(), 1);
    assert_eq!(analyze(&analyzer, &project()), vec!["RA11-001"]);
}

#[test]
fn snapshot_units_run_through_the_catalog() {
    let json = r#"{
        "unit": {
            "path": "Negocio/Facturacion.bll.cs",
            "root": {
                "kind": "compilation_unit",
                "children": [{
                    "id": 1,
                    "kind": "class_declaration",
                    "identifier": "Facturacion",
                    "identifier_span": {"start_line": 3, "start_column": 18, "end_line": 3, "end_column": 29},
                    "span": {"start_line": 3, "start_column": 5, "end_line": 620, "end_column": 6},
                    "children": [{
                        "kind": "method_declaration",
                        "identifier": "Calcular",
                        "modifiers": ["public"],
                        "children": [{
                            "kind": "block",
                            "children": [{
                                "kind": "object_creation_expression",
                                "text": "ClienteWsr",
                                "span": {"start_line": 9, "start_column": 23, "end_line": 9, "end_column": 39}
                            }]
                        }]
                    }]
                }]
            }
        }
    }"#;
    let snapshot = UnitSnapshot::from_json(Path::new("facturacion.json"), json)
        .expect("snapshot should parse");

    let analyzer = Analyzer::builder()
        .rules(all_rules())
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze_snapshots(&[snapshot], &CancellationToken::new());

    assert_eq!(result.units_checked, 1);
    let found: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| (d.code.as_str(), d.location.line))
        .collect();
    assert_eq!(found, vec![("RA16-001", 3), ("RA15-002", 9)]);
}
