//! Symbol model supplied by the host's symbol-resolution service.
//!
//! [`SemanticModel`] is the seam between the engine and whatever compiler
//! front-end the host runs. Every lookup may miss; detectors treat a miss as
//! "not applicable here" and move on.

use crate::syntax::{NodeId, SyntaxNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of a resolved symbol. Two references to the same type through
/// different aliases resolve to the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// What kind of entity a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum SymbolKind {
    NamedType,
    Property,
    Field,
    Method,
    Local,
    Parameter,
    Namespace,
    #[serde(other)]
    Other,
}

/// Kind of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
    #[serde(other)]
    Other,
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Symbol identity of the type.
    pub id: SymbolId,
    /// Simple name.
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
    /// Fully qualified containing namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Every interface the type implements, directly or transitively.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_interfaces: Vec<SymbolId>,
}

impl TypeInfo {
    /// Creates a type with no namespace and no interfaces.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            id: SymbolId(id),
            name: name.into(),
            kind,
            namespace: None,
            all_interfaces: Vec::new(),
        }
    }

    /// Sets the containing namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implementing(mut self, interface: SymbolId) -> Self {
        self.all_interfaces.push(interface);
        self
    }

    /// Returns true if `interface` is in the implemented-interface set.
    #[must_use]
    pub fn implements(&self, interface: SymbolId) -> bool {
        self.all_interfaces.contains(&interface)
    }
}

/// An attribute applied to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeData {
    /// Simple name of the attribute class (e.g. `HttpPost`).
    pub class_name: String,
    /// Namespace the attribute class is declared in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl AttributeData {
    /// Creates an attribute reference.
    #[must_use]
    pub fn new(class_name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            class_name: class_name.into(),
            namespace: namespace.map(String::from),
        }
    }
}

/// Resolved semantic facts for a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol identity.
    pub id: SymbolId,
    /// Simple name.
    pub name: String,
    /// Symbol kind.
    pub kind: SymbolKind,
    /// Type declaring this symbol, for members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containing_type: Option<TypeInfo>,
    /// Fully qualified containing namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containing_namespace: Option<String>,
    /// Attributes declared on the symbol.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeData>,
}

impl Symbol {
    /// Creates a symbol with no container and no attributes.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            id: SymbolId(id),
            name: name.into(),
            kind,
            containing_type: None,
            containing_namespace: None,
            attributes: Vec::new(),
        }
    }

    /// Sets the containing type.
    #[must_use]
    pub fn contained_in(mut self, ty: TypeInfo) -> Self {
        self.containing_type = Some(ty);
        self
    }

    /// Sets the containing namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.containing_namespace = Some(namespace.into());
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A compile-time constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    /// Boolean constant.
    Bool(bool),
    /// Integer constant.
    Int(i64),
    /// Floating-point constant.
    Float(f64),
    /// String or char constant.
    Str(String),
}

impl ConstantValue {
    /// Returns the string payload, if this is a string constant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Symbol and type resolution capability provided by the host.
///
/// Implementations must be safe to query from several threads at once.
/// Each method returns `None` when the host cannot resolve the node.
pub trait SemanticModel: Send + Sync {
    /// Symbol referenced by an expression node.
    fn symbol_info(&self, node: &SyntaxNode) -> Option<&Symbol>;

    /// Static type of an expression or declaration node.
    fn type_info(&self, node: &SyntaxNode) -> Option<&TypeInfo>;

    /// Constant value of a literal node.
    fn constant_value(&self, node: &SyntaxNode) -> Option<&ConstantValue>;

    /// Symbol declared by a declaration node.
    fn declared_symbol(&self, node: &SyntaxNode) -> Option<&Symbol>;
}

/// In-memory [`SemanticModel`] keyed by [`NodeId`].
///
/// Hosts that resolve ahead of time serialize one of these next to each
/// compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolTable {
    /// Referenced symbols.
    #[serde(default)]
    pub symbols: HashMap<NodeId, Symbol>,
    /// Static types.
    #[serde(default)]
    pub types: HashMap<NodeId, TypeInfo>,
    /// Constant values.
    #[serde(default)]
    pub constants: HashMap<NodeId, ConstantValue>,
    /// Declared symbols.
    #[serde(default)]
    pub declarations: HashMap<NodeId, Symbol>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the symbol referenced by a node.
    #[must_use]
    pub fn with_symbol(mut self, node: u32, symbol: Symbol) -> Self {
        self.symbols.insert(NodeId(node), symbol);
        self
    }

    /// Records the static type of a node.
    #[must_use]
    pub fn with_type(mut self, node: u32, ty: TypeInfo) -> Self {
        self.types.insert(NodeId(node), ty);
        self
    }

    /// Records the constant value of a node.
    #[must_use]
    pub fn with_constant(mut self, node: u32, value: ConstantValue) -> Self {
        self.constants.insert(NodeId(node), value);
        self
    }

    /// Records the symbol declared by a node.
    #[must_use]
    pub fn with_declaration(mut self, node: u32, symbol: Symbol) -> Self {
        self.declarations.insert(NodeId(node), symbol);
        self
    }
}

impl SemanticModel for SymbolTable {
    fn symbol_info(&self, node: &SyntaxNode) -> Option<&Symbol> {
        self.symbols.get(&node.id)
    }

    fn type_info(&self, node: &SyntaxNode) -> Option<&TypeInfo> {
        self.types.get(&node.id)
    }

    fn constant_value(&self, node: &SyntaxNode) -> Option<&ConstantValue> {
        self.constants.get(&node.id)
    }

    fn declared_symbol(&self, node: &SyntaxNode) -> Option<&Symbol> {
        self.declarations.get(&node.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxKind;

    #[test]
    fn table_resolves_by_node_id() {
        let table = SymbolTable::new()
            .with_type(3, TypeInfo::new(10, "IRepo", TypeKind::Interface))
            .with_constant(4, ConstantValue::Str("select 1".into()));

        let node = SyntaxNode::new(SyntaxKind::IdentifierName).with_id(3);
        assert_eq!(table.type_info(&node).map(|t| t.name.as_str()), Some("IRepo"));
        assert!(table.symbol_info(&node).is_none());

        let literal = SyntaxNode::new(SyntaxKind::LiteralExpression).with_id(4);
        assert_eq!(
            table.constant_value(&literal).and_then(ConstantValue::as_str),
            Some("select 1")
        );
    }

    #[test]
    fn unassigned_nodes_resolve_nothing() {
        let table = SymbolTable::new().with_symbol(1, Symbol::new(1, "X", SymbolKind::Local));
        let node = SyntaxNode::new(SyntaxKind::IdentifierName);
        assert!(table.symbol_info(&node).is_none());
    }

    #[test]
    fn table_round_trips_through_json() {
        let table = SymbolTable::new().with_declaration(
            7,
            Symbol::new(70, "Save", SymbolKind::Method)
                .with_attribute(AttributeData::new("HttpPost", Some("System.Web.Mvc"))),
        );
        let json = serde_json::to_string(&table).unwrap();
        let back: SymbolTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn interface_membership() {
        let class = TypeInfo::new(1, "ClienteDal", TypeKind::Class).implementing(SymbolId(2));
        assert!(class.implements(SymbolId(2)));
        assert!(!class.implements(SymbolId(3)));
    }
}
