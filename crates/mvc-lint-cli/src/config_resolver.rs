//! Locates the `mvc-lint.toml` that applies to a set of snapshot paths.
//!
//! An explicit `--config` always wins. Otherwise the directory holding the
//! first snapshot path is searched, then each of its ancestors, so a config at
//! the solution root covers snapshots exported into nested folders. The global
//! `config.toml` (`$MVC_LINT_CONFIG_DIR` or `~/.mvc-lint/`) comes last, and
//! built-in defaults apply when nothing is found.

use anyhow::{Context, Result};
use mvc_lint_core::Config;
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order within each directory.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["mvc-lint.toml", ".mvc-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the snapshots or in one of their parent directories.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Loads the naming tokens, thresholds and rule switches this source
    /// points at.
    pub fn load(&self) -> Result<Config> {
        let path = match self {
            Self::Default => return Ok(Config::default()),
            Self::Global(path) => {
                tracing::info!("Using global config: {}", path.display());
                path
            }
            Self::Explicit(path) | Self::Project(path) => path,
        };
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }

    fn exists(&self) -> bool {
        match self {
            Self::Explicit(_) => true,
            Self::Project(path) | Self::Global(path) => path.is_file(),
            Self::Default => false,
        }
    }
}

/// Config lookup for one `check` invocation.
#[derive(Debug, Clone)]
pub struct ConfigLookup {
    explicit: Option<PathBuf>,
    snapshot_root: PathBuf,
    global_dir: Option<PathBuf>,
}

impl ConfigLookup {
    /// Lookup rooted at the first snapshot path, or its parent when that path
    /// names a single snapshot file.
    #[must_use]
    pub fn for_snapshots(paths: &[PathBuf], explicit: Option<&Path>) -> Self {
        let snapshot_root = match paths.first() {
            Some(first) if first.is_file() => first
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
            Some(first) => first.clone(),
            None => PathBuf::from("."),
        };
        Self {
            explicit: explicit.map(Path::to_path_buf),
            snapshot_root,
            global_dir: global_config_dir(),
        }
    }

    fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Every place a config may live, highest priority first.
    fn candidates(&self) -> Vec<ConfigSource> {
        let mut candidates: Vec<ConfigSource> =
            self.explicit.iter().cloned().map(ConfigSource::Explicit).collect();

        let root = self
            .snapshot_root
            .canonicalize()
            .unwrap_or_else(|_| self.snapshot_root.clone());
        for dir in root.ancestors() {
            candidates.extend(
                PROJECT_CONFIG_NAMES
                    .iter()
                    .map(|name| ConfigSource::Project(dir.join(name))),
            );
        }

        if let Some(dir) = &self.global_dir {
            candidates.push(ConfigSource::Global(dir.join(GLOBAL_CONFIG_NAME)));
        }
        candidates
    }

    /// The first candidate that exists, or [`ConfigSource::Default`].
    #[must_use]
    pub fn resolve(&self) -> ConfigSource {
        let source = self
            .candidates()
            .into_iter()
            .find(ConfigSource::exists)
            .unwrap_or(ConfigSource::Default);
        tracing::debug!("Config for {}: {:?}", self.snapshot_root.display(), source);
        source
    }
}

/// `$MVC_LINT_CONFIG_DIR`, else `~/.mvc-lint/`.
fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("MVC_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".mvc-lint"))
}
