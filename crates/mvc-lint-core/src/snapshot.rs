//! JSON snapshots of parsed compilation units.
//!
//! A host that parses and resolves source files in another process writes
//! one snapshot per unit; the engine loads it back without any parser.

use crate::analyzer::AnalyzerError;
use crate::semantic::SymbolTable;
use crate::syntax::CompilationUnit;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A compilation unit together with its pre-computed symbol facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// The lowered syntax tree and source text.
    pub unit: CompilationUnit,
    /// Symbol facts keyed by node id.
    #[serde(default)]
    pub symbols: SymbolTable,
}

impl UnitSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(unit: CompilationUnit, symbols: SymbolTable) -> Self {
        Self { unit, symbols }
    }

    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Snapshot`] if the JSON does not describe a
    /// unit.
    pub fn from_json(path: &Path, json: &str) -> Result<Self, AnalyzerError> {
        serde_json::from_str(json).map_err(|source| AnalyzerError::Snapshot {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reads a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<UnitSnapshot, AnalyzerError> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::trace!(path = %path.display(), bytes = content.len(), "loaded snapshot");
    UnitSnapshot::from_json(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SyntaxKind, SyntaxNode};
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "unit": {
            "path": "Controllers/HomeController.cs",
            "text": "public class HomeController {}",
            "root": {
                "kind": "compilation_unit",
                "children": [
                    {
                        "id": 1,
                        "kind": "class_declaration",
                        "identifier": "HomeController",
                        "span": {"start_line": 1, "start_column": 1, "end_line": 1, "end_column": 31}
                    }
                ]
            }
        },
        "symbols": {
            "declarations": {
                "1": {"id": 100, "name": "HomeController", "kind": "named_type"}
            }
        }
    }"#;

    #[test]
    fn loads_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let snapshot = load_snapshot(file.path()).unwrap();
        let class = &snapshot.unit.root.children[0];
        assert_eq!(class.kind, SyntaxKind::ClassDeclaration);
        assert_eq!(class.name(), "HomeController");
        assert_eq!(snapshot.symbols.declarations.len(), 1);
    }

    #[test]
    fn symbols_are_optional() {
        let json = r#"{"unit": {"path": "a.cs", "root": {"kind": "compilation_unit"}}}"#;
        let snapshot = UnitSnapshot::from_json(Path::new("a.json"), json).unwrap();
        assert_eq!(snapshot.symbols, SymbolTable::default());
        assert_eq!(snapshot.unit.root, SyntaxNode::new(SyntaxKind::CompilationUnit));
    }

    #[test]
    fn invalid_json_names_the_file() {
        let err = UnitSnapshot::from_json(Path::new("broken.json"), "{").unwrap_err();
        assert!(matches!(err, AnalyzerError::Snapshot { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AnalyzerError::Io { .. }));
    }
}
