//! Structural metric counters over class and interface declarations.
//!
//! All counters are pure and linear in the size of the subtree.

use crate::syntax::{Modifier, SyntaxKind, SyntaxNode};

/// Inclusive line span length of a declaration.
#[must_use]
pub fn line_count(node: &SyntaxNode) -> usize {
    node.span.line_count()
}

/// Public, non-override methods whose name differs from the class name.
///
/// The name check drops members that merely look like constructors.
pub fn action_methods(class: &SyntaxNode) -> impl Iterator<Item = &SyntaxNode> {
    let class_name = class.name();
    class.members().filter(move |member| {
        member.kind == SyntaxKind::MethodDeclaration
            && member.has_modifier(Modifier::Public)
            && !member.has_modifier(Modifier::Override)
            && member.name() != class_name
    })
}

/// Number of control-flow nodes below `node`.
#[must_use]
pub fn control_flow_nodes(node: &SyntaxNode) -> usize {
    node.descendants()
        .filter(|n| n.kind.is_control_flow())
        .count()
}

/// Control-flow nodes summed over the class's action methods.
#[must_use]
pub fn control_flow_complexity(class: &SyntaxNode) -> usize {
    action_methods(class).map(control_flow_nodes).sum()
}

/// Size of a controller's public surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionMetrics {
    /// Action methods.
    pub methods: usize,
    /// Parameters summed over action methods.
    pub parameters: usize,
    /// Parameters of the first declared constructor.
    pub dependencies: usize,
}

/// Computes [`ActionMetrics`] for a class.
#[must_use]
pub fn action_metrics(class: &SyntaxNode) -> ActionMetrics {
    let (methods, parameters) = action_methods(class)
        .fold((0, 0), |(m, p), method| (m + 1, p + method.parameters.len()));

    let dependencies = class
        .members()
        .find(|m| m.kind == SyntaxKind::ConstructorDeclaration)
        .map_or(0, |ctor| ctor.parameters.len());

    ActionMetrics {
        methods,
        parameters,
        dependencies,
    }
}

/// Method members of an interface declaration.
#[must_use]
pub fn interface_method_count(interface: &SyntaxNode) -> usize {
    interface
        .members()
        .filter(|m| m.kind == SyntaxKind::MethodDeclaration)
        .count()
}

/// Method-like members paired with their body, skipping bodiless members.
pub fn method_bodies(class: &SyntaxNode) -> impl Iterator<Item = (&SyntaxNode, &SyntaxNode)> {
    class
        .members()
        .filter(|m| m.kind.is_method_like())
        .filter_map(|method| match method.body() {
            Some(body) => Some((method, body)),
            None => {
                tracing::trace!(member = method.name(), "member has no body; skipped");
                None
            }
        })
}
