//! Content and reference scanners.
//!
//! Text scanners take the lower-cased full text of a compilation unit, so a
//! token anywhere in the file counts even when it lies outside the class
//! being reported.

use crate::semantic::{AttributeData, SemanticModel};
use crate::syntax::SyntaxNode;
use crate::vocabulary::{DATA_ACCESS_NAMESPACES, HTTP_VERB_ATTRIBUTES, SQL_LOGIC_KEYWORDS};

/// First token of `table` contained in `lowered_text`, in table order.
#[must_use]
pub fn first_forbidden_token<'t>(lowered_text: &str, table: &[&'t str]) -> Option<&'t str> {
    table.iter().copied().find(|token| lowered_text.contains(token))
}

/// Every token of `table` contained in `lowered_text`, in table order.
#[must_use]
pub fn all_forbidden_tokens<'t>(lowered_text: &str, table: &[&'t str]) -> Vec<&'t str> {
    table
        .iter()
        .copied()
        .filter(|token| lowered_text.contains(token))
        .collect()
}

/// Exact, case-insensitive match against the data-access namespace list.
#[must_use]
pub fn is_data_access_namespace(namespace: &str) -> bool {
    DATA_ACCESS_NAMESPACES
        .iter()
        .any(|ns| ns.eq_ignore_ascii_case(namespace.trim()))
}

/// Returns true if the attribute class is one of the HTTP verb attributes,
/// with or without the conventional `Attribute` suffix.
#[must_use]
pub fn is_http_verb_attribute(attribute: &AttributeData) -> bool {
    let name = attribute
        .class_name
        .strip_suffix("Attribute")
        .unwrap_or(&attribute.class_name);
    HTTP_VERB_ATTRIBUTES.contains(&name)
}

/// Returns true if a member's resolved type, or any attribute declared on
/// it, belongs to a data-access namespace.
///
/// Attributes are judged by the namespace their class is declared in.
#[must_use]
pub fn member_references_data_access(member: &SyntaxNode, model: &dyn SemanticModel) -> bool {
    let by_type = model
        .type_info(member)
        .and_then(|ty| ty.namespace.as_deref())
        .is_some_and(is_data_access_namespace);
    if by_type {
        return true;
    }

    model.declared_symbol(member).is_some_and(|symbol| {
        symbol
            .attributes
            .iter()
            .filter_map(|a| a.namespace.as_deref())
            .any(is_data_access_namespace)
    })
}

/// First member of a type declaration carrying an HTTP verb attribute.
#[must_use]
pub fn first_http_action_member<'n>(
    class: &'n SyntaxNode,
    model: &dyn SemanticModel,
) -> Option<&'n SyntaxNode> {
    class.members().find(|member| {
        model
            .declared_symbol(member)
            .is_some_and(|symbol| symbol.attributes.iter().any(is_http_verb_attribute))
    })
}

/// Counts the SQL logic keywords in a lower-cased literal.
///
/// Returns `None` when the literal contains no logic keyword at all;
/// otherwise splits on space, comma and parentheses and counts the pieces
/// that are exactly a logic keyword.
#[must_use]
pub fn query_logic_keyword_count(lowered_literal: &str) -> Option<usize> {
    if !SQL_LOGIC_KEYWORDS
        .iter()
        .any(|keyword| lowered_literal.contains(keyword))
    {
        return None;
    }

    let count = lowered_literal
        .split([' ', ',', '(', ')'])
        .filter(|word| SQL_LOGIC_KEYWORDS.contains(word))
        .count();
    Some(count)
}
