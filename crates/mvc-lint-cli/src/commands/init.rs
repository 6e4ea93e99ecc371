//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# mvc-lint configuration

[analyzer]
# Worker threads for parallel analysis (default: one per core)
# parallelism = 4

# Layer naming tokens, matched case-insensitively against file paths and
# class names
[naming]
model = "vm"
view = "cshtml"
controller = "controller"
service = "wsr"
repository = "dal"
entity = "ent"
database_action = "vgo_conexion"
data_access = "dal"
business_logic = "bll"

# A diagnostic fires when a count is strictly greater than its limit
[thresholds]
max_class_lines = 500
max_control_flow = 20
max_controller_methods = 20
max_controller_parameters = 10
max_constructor_dependencies = 5
max_query_logic_keywords = 3
max_repository_entities = 3
max_database_actions = 50
max_interface_methods = 20

# Rules can be disabled by name or by code
# [rules.god-class]
# enabled = false
#
# [rules.RA09-002]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(PROJECT_CONFIG_NAMES[0]), force)?;

    println!("Created {}", PROJECT_CONFIG_NAMES[0]);
    println!("\nNext steps:");
    println!("  1. Edit {} to match your naming conventions", PROJECT_CONFIG_NAMES[0]);
    println!("  2. Run: mvc-lint check <snapshot-dir>");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvc_lint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_built_in_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        let defaults = Config::default();
        assert_eq!(config.naming, defaults.naming);
        assert_eq!(config.thresholds, defaults.thresholds);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mvc-lint.toml");
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
