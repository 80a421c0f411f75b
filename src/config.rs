//! # Configuration Module
//!
//! This module provides optional configuration for autocopyright: extra
//! ignore rules, the concurrency limit and the git executable.
//!
//! Configuration can be specified in a `.autocopyright.toml` file in the
//! repository root or via the `AUTOCOPYRIGHT_CONFIG` environment variable.
//!
//! ```toml
//! ignore = ["vendor", "build"]
//! ignore-regex = ['\.generated\.(c|h)$']
//! jobs = 16
//! git = "/usr/local/bin/git"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".autocopyright.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "AUTOCOPYRIGHT_CONFIG";

/// Main configuration struct for autocopyright.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Additional path prefixes to skip, relative to the repository root.
  #[serde(default)]
  pub ignore: Vec<String>,

  /// Additional regular expressions matched against root-relative paths.
  #[serde(default, rename = "ignore-regex")]
  pub ignore_regex: Vec<String>,

  /// Maximum number of concurrent git processes and file rewrites.
  #[serde(default)]
  pub jobs: Option<usize>,

  /// git executable to invoke.
  #[serde(default)]
  pub git: Option<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is present but unusable.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: &'static str, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, is not valid TOML, or holds
  /// invalid values.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!(
      "Loaded {} ignore prefixes and {} ignore patterns",
      config.ignore.len(),
      config.ignore_regex.len()
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - `jobs` is positive
  /// - every `ignore-regex` entry compiles
  /// - no `ignore` entry is empty, since an empty prefix matches everything
  fn validate(&self) -> Result<(), ConfigError> {
    if self.jobs == Some(0) {
      return Err(ConfigError::InvalidValue {
        key: "jobs",
        message: "must be at least 1".to_string(),
      });
    }

    for prefix in &self.ignore {
      if prefix.is_empty() {
        return Err(ConfigError::InvalidValue {
          key: "ignore",
          message: "prefix cannot be empty".to_string(),
        });
      }
    }

    for pattern in &self.ignore_regex {
      if let Err(e) = Regex::new(pattern) {
        return Err(ConfigError::InvalidValue {
          key: "ignore-regex",
          message: format!("'{}': {}", pattern, e),
        });
      }
    }

    if let Some(ref git) = self.git
      && git.trim().is_empty()
    {
      return Err(ConfigError::InvalidValue {
        key: "git",
        message: "executable cannot be empty".to_string(),
      });
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `AUTOCOPYRIGHT_CONFIG` environment variable
/// 3. `.autocopyright.toml` in the repository root
pub fn discover_config_path(explicit_path: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let workspace_config = workspace_root.join(DEFAULT_CONFIG_FILENAME);
  if workspace_config.exists() {
    verbose_log!("Using workspace config: {}", workspace_config.display());
    return Some(workspace_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or return defaults.
///
/// # Errors
///
/// Returns an error if a config file was found but could not be loaded.
pub fn load_config(explicit_path: Option<&Path>, workspace_root: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  match discover_config_path(explicit_path, workspace_root) {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}
