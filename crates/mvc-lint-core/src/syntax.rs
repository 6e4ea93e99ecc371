//! Host-neutral syntax tree for parsed compilation units.
//!
//! The engine never parses source text. A host parser lowers its own tree
//! into [`SyntaxNode`]s carrying only what the detectors look at: node kind,
//! identifier, modifiers, parameters, rendered text and line spans.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identity of a syntax node, used as the key for semantic lookups.
///
/// Nodes the host has no semantic facts for may keep [`NodeId::UNASSIGNED`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id of nodes without semantic facts.
    pub const UNASSIGNED: Self = Self(0);
}

/// Kinds of syntax nodes the detectors care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    /// Root of a compilation unit.
    CompilationUnit,
    /// `namespace X { ... }`
    Namespace,
    /// `using X.Y;` (name in `text`)
    UsingDirective,
    /// `class X { ... }`
    ClassDeclaration,
    /// `interface X { ... }`
    InterfaceDeclaration,
    /// Ordinary method.
    MethodDeclaration,
    /// Constructor.
    ConstructorDeclaration,
    /// Operator or conversion operator.
    OperatorDeclaration,
    /// Property.
    PropertyDeclaration,
    /// Field.
    FieldDeclaration,
    /// `{ ... }`
    Block,
    /// `if`
    IfStatement,
    /// `switch`
    SwitchStatement,
    /// `for`
    ForStatement,
    /// `foreach`
    ForEachStatement,
    /// `while`
    WhileStatement,
    /// `do ... while`
    DoStatement,
    /// `catch (...)`
    CatchClause,
    /// `a ? b : c`
    ConditionalExpression,
    /// Call expression; full rendered text in `text`.
    InvocationExpression,
    /// `receiver.Name`; receiver is the first child, name in `identifier`.
    MemberAccessExpression,
    /// `new T(...)`; created type name in `text`.
    ObjectCreationExpression,
    /// Literal expression; source token in `text`.
    LiteralExpression,
    /// Bare identifier reference.
    IdentifierName,
    /// Anything else.
    #[serde(other)]
    Other,
}

impl SyntaxKind {
    /// Returns true for control-flow constructs counted by complexity metrics.
    #[must_use]
    pub fn is_control_flow(self) -> bool {
        matches!(
            self,
            Self::IfStatement
                | Self::SwitchStatement
                | Self::ForStatement
                | Self::ForEachStatement
                | Self::WhileStatement
                | Self::DoStatement
                | Self::CatchClause
                | Self::ConditionalExpression
        )
    }

    /// Returns true for members that may carry an executable body.
    #[must_use]
    pub fn is_method_like(self) -> bool {
        matches!(
            self,
            Self::MethodDeclaration | Self::ConstructorDeclaration | Self::OperatorDeclaration
        )
    }
}

/// Declaration modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Override,
    Virtual,
    Abstract,
    Partial,
    Async,
    Sealed,
}

/// Inclusive line/column span (both 1-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    /// First line.
    pub start_line: usize,
    /// First column.
    pub start_column: usize,
    /// Last line.
    pub end_line: usize,
    /// Column just past the last character.
    pub end_column: usize,
}

impl TextSpan {
    /// Creates a span.
    #[must_use]
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Span covering whole lines `start..=end`.
    #[must_use]
    pub fn lines(start: usize, end: usize) -> Self {
        Self::new(start, 1, end, 1)
    }

    /// Number of lines covered, counting both ends.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// A node of the lowered syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    /// Key for semantic lookups.
    #[serde(default)]
    pub id: NodeId,
    /// Node kind.
    pub kind: SyntaxKind,
    /// Full span of the node.
    #[serde(default)]
    pub span: TextSpan,
    /// Declared or referenced name, when the node has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Span of the identifier token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_span: Option<TextSpan>,
    /// Rendered source text for using directives, invocations, created
    /// types and literals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Declaration modifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    /// Parameter names of method-like declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    /// Child nodes in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Creates a node of the given kind with no payload.
    #[must_use]
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            id: NodeId::UNASSIGNED,
            kind,
            span: TextSpan::default(),
            identifier: None,
            identifier_span: None,
            text: None,
            modifiers: Vec::new(),
            parameters: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the node id.
    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = NodeId(id);
        self
    }

    /// Sets the node span.
    #[must_use]
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = span;
        self
    }

    /// Sets the identifier and its span.
    #[must_use]
    pub fn with_identifier(mut self, name: impl Into<String>, span: TextSpan) -> Self {
        self.identifier = Some(name.into());
        self.identifier_span = Some(span);
        self
    }

    /// Sets the identifier without a dedicated span.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.identifier = Some(name.into());
        self
    }

    /// Sets the rendered text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds a modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(name.into());
        self
    }

    /// Adds a child node.
    #[must_use]
    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    /// Adds several child nodes.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = SyntaxNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Identifier text, or the empty string.
    #[must_use]
    pub fn name(&self) -> &str {
        self.identifier.as_deref().unwrap_or("")
    }

    /// Rendered text, or the empty string.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Span of the identifier token, falling back to the node span.
    #[must_use]
    pub fn identifier_span(&self) -> TextSpan {
        self.identifier_span.unwrap_or(self.span)
    }

    /// Returns true if the node carries the modifier.
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Direct members of a type declaration.
    pub fn members(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter()
    }

    /// Body block of a method-like declaration.
    ///
    /// `None` for abstract, partial or expression-bodied members.
    #[must_use]
    pub fn body(&self) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == SyntaxKind::Block)
    }

    /// Receiver expression of a member access.
    #[must_use]
    pub fn receiver(&self) -> Option<&SyntaxNode> {
        if self.kind == SyntaxKind::MemberAccessExpression {
            self.children.first()
        } else {
            None
        }
    }

    /// Pre-order iterator over all descendants, excluding `self`.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Iterator returned by [`SyntaxNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A parsed source file handed to the engine by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// File path as reported by the host.
    pub path: PathBuf,
    /// Full source text.
    #[serde(default)]
    pub text: String,
    /// Root node (kind [`SyntaxKind::CompilationUnit`]).
    pub root: SyntaxNode,
}

impl CompilationUnit {
    /// Creates a compilation unit.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>, root: SyntaxNode) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            root,
        }
    }

    /// File path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All using directives anywhere in the unit.
    pub fn using_directives(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.root
            .descendants()
            .filter(|n| n.kind == SyntaxKind::UsingDirective)
    }
}
