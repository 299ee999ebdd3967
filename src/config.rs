//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/critree/critree.toml`
//! 3. Explicit config file given by the caller
//! 4. Environment variables: `CRITREE_*` prefix, `__` between nested keys
//!    (e.g. `CRITREE_TREE__DUPLICATES=reject`)

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{Criterion, CriterionTree, DuplicatePolicy, RemovalMode, TreePolicy};
use crate::errors::{CritreeError, CritreeResult};

/// Unified configuration for critree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Policies applied to trees built from these settings
    pub tree: TreePolicy,
}

/// Raw tree policy for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawTreePolicy {
    duplicates: Option<DuplicatePolicy>,
    removal: Option<RemovalMode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    tree: RawTreePolicy,
}

fn config_err(e: config::ConfigError) -> CritreeError {
    CritreeError::Config {
        message: e.to_string(),
    }
}

/// Get the XDG config directory for critree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "critree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("critree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> CritreeResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| CritreeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| CritreeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn env_source() -> Environment {
    Environment::with_prefix("CRITREE")
        .prefix_separator("_")
        .separator("__")
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree: TreePolicy {
                duplicates: overlay.tree.duplicates.unwrap_or(self.tree.duplicates),
                removal: overlay.tree.removal.unwrap_or(self.tree.removal),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit TOML file; it must exist when given
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> CritreeResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("Loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("Loading config file: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current, env_source())?;
        debug!(?current, "Effective settings");
        Ok(current)
    }

    /// Apply `CRITREE_*` environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, source: Environment) -> CritreeResult<Self> {
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(config_err)?;

        match config.get::<DuplicatePolicy>("tree.duplicates") {
            Ok(val) => settings.tree.duplicates = val,
            Err(config::ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get::<RemovalMode>("tree.removal") {
            Ok(val) => settings.tree.removal = val,
            Err(config::ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Serialize settings to TOML.
    pub fn to_toml(&self) -> CritreeResult<String> {
        toml::to_string_pretty(self).map_err(|e| CritreeError::Config {
            message: format!("serialize: {}", e),
        })
    }

    /// A tree rooted at `root` governed by these settings.
    pub fn build_tree(&self, root: Criterion) -> CriterionTree {
        CriterionTree::with_policy(root, self.tree)
    }
}
