//! # Workspace Module
//!
//! This module locates the git repository the tool operates on and resolves
//! the target path relative to its root. Every later step (ignore checks,
//! `git log`, progress output) works with root-relative paths.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::verbose_log;

/// Upper bound on parent directories visited while looking for `.git`.
pub const MAX_ASCENT: usize = 256;

/// Name of the git metadata entry marking a repository root.
const GIT_DIR: &str = ".git";

/// Error type for workspace resolution.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
  /// No `.git` entry between the start directory and the filesystem root.
  #[error("no git repository found in '{}' or any of its parents", start.display())]
  NotARepository { start: PathBuf },

  /// The walk gave up after [`MAX_ASCENT`] levels without reaching the
  /// filesystem root. Reported separately from [`Self::NotARepository`] so
  /// the message names the limit.
  #[error("no git repository found within {limit} parent directories of '{}'", start.display())]
  AscentLimit { start: PathBuf, limit: usize },
}

/// Repository root plus the target path relative to it.
#[derive(Debug, Clone)]
pub struct Workspace {
  root: PathBuf,
  target: PathBuf,
}

impl Workspace {
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Target path relative to [`Self::root`]; `.` for the root itself.
  pub fn target(&self) -> &Path {
    &self.target
  }

  /// Absolute form of the target.
  pub fn absolute_target(&self) -> PathBuf {
    self.root.join(&self.target)
  }
}

/// Walks from `start` towards the filesystem root and returns the first
/// directory containing a `.git` entry.
///
/// # Errors
///
/// Fails when the filesystem root is reached or [`MAX_ASCENT`] directories
/// have been checked without a match.
pub fn discover_repo_root(start: &Path) -> Result<PathBuf, WorkspaceError> {
  let mut current = start.to_path_buf();
  for _ in 0..MAX_ASCENT {
    if current.join(GIT_DIR).exists() {
      verbose_log!("Found {} at '{}'.", GIT_DIR, current.display());
      return Ok(current);
    }
    if !current.pop() {
      return Err(WorkspaceError::NotARepository {
        start: start.to_path_buf(),
      });
    }
  }
  Err(WorkspaceError::AscentLimit {
    start: start.to_path_buf(),
    limit: MAX_ASCENT,
  })
}

/// Resolves the workspace for `target` as given on the command line.
///
/// The repository is discovered from `current_dir`, not from the target.
/// A relative `target` is resolved against `current_dir`.
pub fn resolve_workspace(current_dir: &Path, target: &Path) -> Result<Workspace, WorkspaceError> {
  let current_dir = lexical_normalize(current_dir);
  let root = discover_repo_root(&current_dir)?;

  let absolute = lexical_normalize(&abs_path_or_current(target, &current_dir));
  let relative = pathdiff::diff_paths(&absolute, &root).unwrap_or(absolute);
  let target = if relative.as_os_str().is_empty() {
    PathBuf::from(".")
  } else {
    relative
  };

  debug!("Workspace root '{}', target '{}'", root.display(), target.display());
  Ok(Workspace { root, target })
}

fn abs_path_or_current(path: &Path, current_dir: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    current_dir.join(path)
  }
}

/// Removes `.` components and folds `..` into the preceding component
/// without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if !normalized.pop() {
          normalized.push(component.as_os_str());
        }
      }
      other => normalized.push(other.as_os_str()),
    }
  }
  normalized
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_lexical_normalize() {
    assert_eq!(lexical_normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    assert_eq!(lexical_normalize(Path::new("a/b/..")), PathBuf::from("a"));
  }

  #[test]
  fn test_discover_from_nested_directory() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join(".git")).unwrap();
    let nested = temp.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();

    assert_eq!(discover_repo_root(&nested).unwrap(), temp.path());
  }

  #[test]
  fn test_discover_fails_without_repository() {
    let temp = tempdir().unwrap();
    let nested = temp.path().join("a");
    fs::create_dir_all(&nested).unwrap();

    // The temp dir may itself live inside a repository on a developer
    // machine; only assert that the walk terminates.
    match discover_repo_root(&nested) {
      Ok(root) => assert!(nested.starts_with(root)),
      Err(e) => assert!(matches!(e, WorkspaceError::NotARepository { .. })),
    }
  }

  #[test]
  fn test_resolve_relative_target() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join(".git")).unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("lib")).unwrap();

    let ws = resolve_workspace(&src, Path::new("lib")).unwrap();
    assert_eq!(ws.root(), temp.path());
    assert_eq!(ws.target(), Path::new("src/lib"));
    assert_eq!(ws.absolute_target(), src.join("lib"));

    let ws = resolve_workspace(&src, Path::new("..")).unwrap();
    assert_eq!(ws.target(), Path::new("."));
  }
}
