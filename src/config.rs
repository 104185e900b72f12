//! Configuration for the `postree` binary with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/postree/postree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Command-line flags (applied by the caller)
//!
//! There is deliberately no environment-variable layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Traversal used when listing a tree's labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    /// The tree's default traversal (postorder for a general tree)
    #[default]
    Positions,
    Preorder,
    Postorder,
    BreadthFirst,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Positions => "positions",
            Order::Preorder => "preorder",
            Order::Postorder => "postorder",
            Order::BreadthFirst => "breadth-first",
        }
    }
}

/// Unified configuration for postree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal used by `show`
    pub order: Order,
    /// Strip trailing whitespace from loaded files before parsing
    pub trim_input: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            order: Order::Positions,
            trim_input: true,
        }
    }
}

/// Error raised while loading or rendering settings.
#[derive(thiserror::Error, Debug)]
#[error("config error: {message}")]
pub struct ConfigLoadError {
    pub message: String,
}

/// Get the XDG config directory for postree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "postree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("postree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), explicit)
    }

    /// Load settings from an optional global file and an optional explicit file.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("order", defaults.order.as_str())
            .map_err(config_err)?
            .set_default("trim_input", defaults.trim_input)
            .map_err(config_err)?;

        if let Some(path) = global {
            debug!("global config: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        if let Some(path) = explicit {
            debug!("explicit config: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigLoadError> {
        toml::to_string_pretty(self).map_err(|e| ConfigLoadError {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# postree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/postree/postree.toml
#   Explicit: file passed with --config
#   Flags:    command-line options win over both

# Traversal used by `postree show`:
#   "positions" (tree default), "preorder", "postorder", "breadth-first"
# order = "positions"

# Strip trailing whitespace (e.g. the final newline) before parsing
# trim_input = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ConfigLoadError {
    ConfigLoadError {
        message: e.to_string(),
    }
}
