//! Layer classification from naming conventions.
//!
//! Layer membership is inferred from strings: the compilation-unit path or a
//! class identifier is folded to lower case and tested against the tokens of
//! a [`Vocabulary`]. Two policies coexist and are kept as separate
//! predicates:
//!
//! - [`contains_token`]: substring containment, used by most rules;
//! - [`ends_with_token`]: suffix match, used only by the model content rules
//!   (RA01) while the sibling model attribute rule (RA02) uses containment.
//!
//! No ambiguity resolution happens: a name may belong to several layers.

use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Architectural layer tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerTag {
    /// Model / view-model.
    Model,
    /// Razor view.
    View,
    /// MVC controller.
    Controller,
    /// Service layer.
    Service,
    /// Repository / data-access class.
    Repository,
    /// Entity type.
    Entity,
    /// Low-level database action.
    DatabaseAction,
    /// Business-logic layer.
    BusinessLogic,
    /// Nothing matched.
    Unclassified,
}

impl std::fmt::Display for LayerTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Model => "model",
            Self::View => "view",
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Repository => "repository",
            Self::Entity => "entity",
            Self::DatabaseAction => "database-action",
            Self::BusinessLogic => "business-logic",
            Self::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}

/// Case-insensitive substring test. `token` must already be lower case.
#[must_use]
pub fn contains_token(haystack: &str, token: &str) -> bool {
    haystack.to_lowercase().contains(token)
}

/// Case-insensitive suffix test. `token` must already be lower case.
#[must_use]
pub fn ends_with_token(haystack: &str, token: &str) -> bool {
    haystack.to_lowercase().ends_with(token)
}

/// Case-insensitive prefix test. `token` must already be lower case.
#[must_use]
pub fn starts_with_token(haystack: &str, token: &str) -> bool {
    haystack.to_lowercase().starts_with(token)
}

/// Returns the token a layer is recognised by, if it has one.
#[must_use]
pub fn token_for(vocabulary: &Vocabulary, layer: LayerTag) -> Option<&str> {
    let token = match layer {
        LayerTag::Model => &vocabulary.model,
        LayerTag::View => &vocabulary.view,
        LayerTag::Controller => &vocabulary.controller,
        LayerTag::Service => &vocabulary.service,
        LayerTag::Repository => &vocabulary.repository,
        LayerTag::Entity => &vocabulary.entity,
        LayerTag::DatabaseAction => &vocabulary.database_action,
        LayerTag::BusinessLogic => &vocabulary.business_logic,
        LayerTag::Unclassified => return None,
    };
    Some(token.as_str())
}

/// Tests one layer under the substring policy.
#[must_use]
pub fn is_layer(name: &str, layer: LayerTag, vocabulary: &Vocabulary) -> bool {
    token_for(vocabulary, layer).is_some_and(|token| contains_token(name, token))
}

/// Model membership under the suffix policy (`ClienteVm`, not `VmHelper`).
#[must_use]
pub fn is_model_by_suffix(name: &str, vocabulary: &Vocabulary) -> bool {
    ends_with_token(name, &vocabulary.model)
}

/// Every layer whose token is contained in `name`.
///
/// Returns `{Unclassified}` when no token matches.
#[must_use]
pub fn classify(name: &str, vocabulary: &Vocabulary) -> BTreeSet<LayerTag> {
    let tags: BTreeSet<LayerTag> = [
        LayerTag::Model,
        LayerTag::View,
        LayerTag::Controller,
        LayerTag::Service,
        LayerTag::Repository,
        LayerTag::Entity,
        LayerTag::DatabaseAction,
        LayerTag::BusinessLogic,
    ]
    .into_iter()
    .filter(|layer| is_layer(name, *layer, vocabulary))
    .collect();

    if tags.is_empty() {
        BTreeSet::from([LayerTag::Unclassified])
    } else {
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::default()
    }

    #[test]
    fn substring_policy_is_case_insensitive() {
        assert!(is_layer("ClienteController", LayerTag::Controller, &vocab()));
        assert!(is_layer("src/Web/CONTROLLERS/Home.cs", LayerTag::Controller, &vocab()));
        assert!(!is_layer("ClienteService", LayerTag::Controller, &vocab()));
    }

    #[test]
    fn suffix_and_substring_policies_differ() {
        // Substring: "vm" anywhere.
        assert!(is_layer("VmHelper", LayerTag::Model, &vocab()));
        // Suffix: only at the end.
        assert!(!is_model_by_suffix("VmHelper", &vocab()));
        assert!(is_model_by_suffix("ClienteVM", &vocab()));
    }

    #[test]
    fn multiple_tags_are_kept() {
        let tags = classify("Modules/Usuario.wsr/UsuarioDal.cs", &vocab());
        assert!(tags.contains(&LayerTag::Service));
        assert!(tags.contains(&LayerTag::Repository));
        assert!(!tags.contains(&LayerTag::Unclassified));
    }

    #[test]
    fn unmatched_name_is_unclassified() {
        let tags = classify("Program.cs", &vocab());
        assert_eq!(tags, BTreeSet::from([LayerTag::Unclassified]));
    }

    #[test]
    fn unclassified_has_no_token() {
        assert!(token_for(&vocab(), LayerTag::Unclassified).is_none());
        assert!(!is_layer("anything", LayerTag::Unclassified, &vocab()));
    }
}
