//! Naming vocabulary, forbidden-content tables and numeric thresholds.
//!
//! The token tables are fixed. Layer naming tokens and thresholds have
//! defaults matching the conventions the rules were written for and can be
//! overridden through [`crate::Config`]; [`Settings::validate`] rejects empty
//! tokens and zero thresholds before any analysis runs.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// HTML tag fragments that must not appear in model or controller sources.
pub const HTML_TAGS: &[&str] = &[
    "@html",
    "<a ", "<abbr", "<address", "<area", "<article", "<aside", "<audio",
    "<b>", "<base", "<bdi", "<bdo", "<blockquote", "<body", "<br", "<button",
    "<canvas", "<caption", "<cite", "<code", "<col", "<colgroup",
    "<data", "<datalist", "<dd", "<del", "<details", "<dfn", "<dialog", "<div", "<dl", "<dt",
    "<em", "<embed",
    "<fieldset", "<figcaption", "<figure", "<footer", "<form",
    "<h1", "<h2", "<h3", "<h4", "<h5", "<h6", "<head", "<header", "<hgroup", "<hr", "<html",
    "<i>", "<iframe", "<img", "<input", "<ins",
    "<kbd", "<keygen",
    "<label", "<legend", "<li", "<link",
    "<main", "<map", "<mark", "<menu", "<menuitem", "<meta", "<meter",
    "<nav", "<noscript",
    "<ol", "<optgroup", "<option", "<output",
    "<p>", "<picture", "<pre", "<progress",
    "<q>",
    "<rb", "<rp", "<rt", "<rtc", "<ruby",
    "<s>", "<samp", "<script", "<search", "<section", "<small", "<source", "<span",
    "<strong", "<style", "<sub", "<sup", "<svg",
    "<table", "<tbody", "<td", "<template", "<textarea", "<tfoot", "<th", "<thead",
    "<time", "<title", "<tr", "<track",
    "<u>", "<ul",
    "<var", "<video",
    "<wbr",
    "/>",
];

/// SQL statements and data-helper names of the in-house data framework.
pub const SQL_TOKENS: &[&str] = &[
    "alter ",
    "create ",
    "database", "delete from", "drop",
    "excecute",
    "grant", "group by",
    "having",
    "insert into",
    "lock",
    "order by",
    "replicate", "revoke",
    "select", "schema", "syncrhonize",
    "table",
    // stored-procedure prefixes
    "pr_", "prd_", "pri_", "pru_", "sp_", "fc_",
    // data-helper methods
    "borrarregistro",
    "ejecutarfuncionretornotabla",
    "ejecutarvista",
    "insertarregistro",
    "listarregistros",
    "listarregistroscoleccion",
    "listarregistroslista",
    "listarregistroslistacoleccion",
    "modificarregistro",
    "obtenerdatospaginacionfuncionretornotabla",
    "obtenerdatospaginacionvista",
    "obtenerregistro",
    "obtenerregistrodetallado",
    "obtenertotalregistrosconsulta",
];

/// Keywords that carry query logic inside SQL literals.
pub const SQL_LOGIC_KEYWORDS: &[&str] = &[
    "where", "and", "or", "join", "exists", "not", "from", "xor", "if", "else", "case", "in",
];

/// Namespaces that only the data-access layer may reference.
pub const DATA_ACCESS_NAMESPACES: &[&str] =
    &["System.Data", "System.Linq", "System.Xml", "System.Collections"];

/// Attribute classes that mark HTTP actions.
pub const HTTP_VERB_ATTRIBUTES: &[&str] = &["HttpPost", "HttpGet"];

/// Layer naming tokens, matched case-insensitively against paths and
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Model / view-model classes (`ClienteVm`).
    pub model: String,
    /// View files (`Index.cshtml`).
    pub view: String,
    /// Controllers.
    pub controller: String,
    /// Service layer files.
    pub service: String,
    /// Repository classes.
    pub repository: String,
    /// Entity type names (prefix).
    pub entity: String,
    /// Low-level database connection object.
    pub database_action: String,
    /// Data-access layer type names.
    pub data_access: String,
    /// Business-logic layer.
    pub business_logic: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            model: "vm".into(),
            view: "cshtml".into(),
            controller: "controller".into(),
            service: "wsr".into(),
            repository: "dal".into(),
            entity: "ent".into(),
            database_action: "vgo_conexion".into(),
            data_access: "dal".into(),
            business_logic: "bll".into(),
        }
    }
}

impl Vocabulary {
    fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("model", self.model.as_str()),
            ("view", self.view.as_str()),
            ("controller", self.controller.as_str()),
            ("service", self.service.as_str()),
            ("repository", self.repository.as_str()),
            ("entity", self.entity.as_str()),
            ("database_action", self.database_action.as_str()),
            ("data_access", self.data_access.as_str()),
            ("business_logic", self.business_logic.as_str()),
        ]
    }

    /// Lower-cases every token so matchers can compare against folded text.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for token in [
            &mut self.model,
            &mut self.view,
            &mut self.controller,
            &mut self.service,
            &mut self.repository,
            &mut self.entity,
            &mut self.database_action,
            &mut self.data_access,
            &mut self.business_logic,
        ] {
            *token = token.trim().to_lowercase();
        }
        self
    }
}

/// Numeric limits. A value is exceeded when the measured count is strictly
/// greater than the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Lines in a class declaration.
    pub max_class_lines: usize,
    /// Control-flow nodes across a controller's public actions.
    pub max_control_flow: usize,
    /// Public actions in a controller.
    pub max_controller_methods: usize,
    /// Parameters summed over a controller's public actions.
    pub max_controller_parameters: usize,
    /// Parameters of a controller's first constructor.
    pub max_constructor_dependencies: usize,
    /// Logic keywords in one repository string literal.
    pub max_query_logic_keywords: usize,
    /// Distinct entity types referenced by one repository.
    pub max_repository_entities: usize,
    /// Connection-object calls in one repository method.
    pub max_database_actions: usize,
    /// Methods declared by an interface.
    pub max_interface_methods: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_class_lines: 500,
            max_control_flow: 20,
            max_controller_methods: 20,
            max_controller_parameters: 10,
            max_constructor_dependencies: 5,
            max_query_logic_keywords: 3,
            max_repository_entities: 3,
            max_database_actions: 50,
            max_interface_methods: 20,
        }
    }
}

impl Thresholds {
    fn entries(&self) -> [(&'static str, usize); 9] {
        [
            ("max_class_lines", self.max_class_lines),
            ("max_control_flow", self.max_control_flow),
            ("max_controller_methods", self.max_controller_methods),
            ("max_controller_parameters", self.max_controller_parameters),
            ("max_constructor_dependencies", self.max_constructor_dependencies),
            ("max_query_logic_keywords", self.max_query_logic_keywords),
            ("max_repository_entities", self.max_repository_entities),
            ("max_database_actions", self.max_database_actions),
            ("max_interface_methods", self.max_interface_methods),
        ]
    }
}

/// Read-only settings shared by every detector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Layer naming tokens (lower-cased).
    pub vocabulary: Vocabulary,
    /// Numeric limits.
    pub thresholds: Thresholds,
}

impl Settings {
    /// Creates settings from a vocabulary and thresholds, folding tokens to
    /// lower case.
    #[must_use]
    pub fn new(vocabulary: Vocabulary, thresholds: Thresholds) -> Self {
        Self {
            vocabulary: vocabulary.normalized(),
            thresholds,
        }
    }

    /// Checks that no token or table is empty and no threshold is zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, token) in self.vocabulary.entries() {
            if token.is_empty() {
                return Err(ConfigError::Invalid {
                    key: format!("naming.{key}"),
                    message: "naming token must not be empty".into(),
                });
            }
        }

        for (key, limit) in self.thresholds.entries() {
            if limit == 0 {
                return Err(ConfigError::Invalid {
                    key: format!("thresholds.{key}"),
                    message: "threshold must be greater than zero".into(),
                });
            }
        }

        for (key, table) in [
            ("html_tags", HTML_TAGS),
            ("sql_tokens", SQL_TOKENS),
            ("sql_logic_keywords", SQL_LOGIC_KEYWORDS),
            ("data_access_namespaces", DATA_ACCESS_NAMESPACES),
            ("http_verb_attributes", HTTP_VERB_ATTRIBUTES),
        ] {
            if table.is_empty() || table.iter().any(|t| t.is_empty()) {
                return Err(ConfigError::Invalid {
                    key: key.into(),
                    message: "vocabulary table must not be empty".into(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn empty_token_is_rejected() {
        let vocabulary = Vocabulary {
            service: "  ".into(),
            ..Vocabulary::default()
        };
        let err = Settings::new(vocabulary, Thresholds::default())
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("naming.service"));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let thresholds = Thresholds {
            max_interface_methods: 0,
            ..Thresholds::default()
        };
        let err = Settings::new(Vocabulary::default(), thresholds)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("thresholds.max_interface_methods"));
    }

    #[test]
    fn tokens_are_folded() {
        let vocabulary = Vocabulary {
            controller: "Controller".into(),
            ..Vocabulary::default()
        };
        let settings = Settings::new(vocabulary, Thresholds::default());
        assert_eq!(settings.vocabulary.controller, "controller");
    }

    #[test]
    fn sql_logic_keywords_are_lowercase_words() {
        assert!(SQL_LOGIC_KEYWORDS
            .iter()
            .all(|k| k.chars().all(|c| c.is_ascii_lowercase())));
    }
}
