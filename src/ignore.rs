//! # Ignore Module
//!
//! This module decides which paths the tool must never touch.
//!
//! It combines:
//! - A static rule list of plain prefixes and regular expressions, matched
//!   against the path relative to the repository root with `/` separators
//! - git's own ignore rules, asked through `git check-ignore` when no static
//!   rule matches

use std::path::{Component, Path};

use anyhow::{Context, Result};
use regex::Regex;

use crate::git::{Git, GitError};
use crate::verbose_log;

/// Prefixes that are always skipped.
pub const DEFAULT_IGNORE_PREFIXES: &[&str] = &[".git", "cmake/clang", "cmake/version", "third-party"];

/// A single static ignore rule.
#[derive(Debug, Clone)]
pub enum IgnoreRule {
  /// Matches any path whose normalized form starts with this string.
  Prefix(String),
  /// Matches any path whose normalized form contains a match.
  Pattern(Regex),
}

impl IgnoreRule {
  /// Compiles a regex rule.
  ///
  /// # Errors
  ///
  /// Returns an error if `pattern` is not a valid regular expression.
  pub fn pattern(pattern: &str) -> Result<Self> {
    let regex = Regex::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
    Ok(Self::Pattern(regex))
  }

  pub fn matches(&self, normalized: &str) -> bool {
    match self {
      Self::Prefix(prefix) => normalized.starts_with(prefix.as_str()),
      Self::Pattern(regex) => regex.is_match(normalized),
    }
  }
}

/// Renders `path` with `/` separators and without `.` components.
///
/// The repository root itself normalizes to the empty string.
pub fn normalize_for_matching(path: &Path) -> String {
  path
    .components()
    .filter_map(|component| match component {
      Component::CurDir => None,
      other => Some(other.as_os_str().to_string_lossy()),
    })
    .collect::<Vec<_>>()
    .join("/")
}

/// Filter combining static rules with git's ignore check.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
  rules: Vec<IgnoreRule>,
  git: Git,
}

impl IgnoreFilter {
  /// Creates a filter from explicit rules.
  pub const fn new(rules: Vec<IgnoreRule>, git: Git) -> Self {
    Self { rules, git }
  }

  /// Creates a filter with [`DEFAULT_IGNORE_PREFIXES`] plus extra prefixes
  /// and regex patterns.
  ///
  /// # Errors
  ///
  /// Returns an error if any regex pattern is invalid.
  pub fn with_defaults(extra_prefixes: &[String], extra_patterns: &[String], git: Git) -> Result<Self> {
    let mut rules: Vec<IgnoreRule> = DEFAULT_IGNORE_PREFIXES
      .iter()
      .map(|prefix| IgnoreRule::Prefix((*prefix).to_string()))
      .collect();

    rules.extend(extra_prefixes.iter().map(|prefix| IgnoreRule::Prefix(prefix.replace('\\', "/"))));

    for pattern in extra_patterns {
      rules.push(IgnoreRule::pattern(pattern)?);
    }

    Ok(Self::new(rules, git))
  }

  /// Checks `path` (relative to the repository root) against the static rules
  /// only.
  pub fn matches_static(&self, path: &Path) -> bool {
    let normalized = normalize_for_matching(path);
    self.rules.iter().any(|rule| rule.matches(&normalized))
  }

  /// Checks whether `path` should be skipped.
  ///
  /// # Errors
  ///
  /// Returns an error if git has to be asked and cannot be spawned. Callers
  /// must not process the path in that case.
  pub async fn is_ignored(&self, path: &Path) -> Result<bool, GitError> {
    if self.matches_static(path) {
      verbose_log!("Skipping: {} (matches static ignore rule)", path.display());
      return Ok(true);
    }

    let ignored = self.git.check_ignore(path).await?;
    if ignored {
      verbose_log!("Skipping: {} (ignored by git)", path.display());
    }
    Ok(ignored)
  }
}
