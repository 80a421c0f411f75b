//! # Git Module
//!
//! This module wraps the two `git` invocations the tool depends on: the
//! ignore check and the per-file author log. Both spawn the `git` binary with
//! the repository root as working directory.
//!
//! A failure to spawn the binary is always an error. Callers must be able to
//! tell "git said no" apart from "git could not be asked".

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::trace;

/// Pretty format requested from `git log`: strict ISO-8601 author date and the
/// author identity, separated by `|`.
pub const LOG_FORMAT: &str = "--format=format:%aI|%aN <%aE>";

/// Error type for git invocations.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
  /// The git binary could not be started at all.
  #[error("failed to spawn `{program} {subcommand}`: {source}")]
  Spawn {
    program: String,
    subcommand: &'static str,
    source: std::io::Error,
  },

  /// git ran but reported a failure.
  #[error("`git {subcommand}` exited with {status}: {stderr}")]
  Failed {
    subcommand: &'static str,
    status: ExitStatus,
    stderr: String,
  },
}

/// Handle on the `git` executable, bound to a repository root.
#[derive(Debug, Clone)]
pub struct Git {
  program: OsString,
  root: PathBuf,
}

impl Git {
  /// Creates a handle that runs `git` from `PATH` inside `root`.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      program: OsString::from("git"),
      root: root.into(),
    }
  }

  /// Overrides the executable used for every invocation.
  pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
    self.program = program.into();
    self
  }

  /// Repository root every command runs in.
  pub fn root(&self) -> &Path {
    &self.root
  }

  fn command(&self) -> Command {
    let mut cmd = Command::new(&self.program);
    cmd.current_dir(&self.root);
    cmd.stdin(Stdio::null());
    cmd.kill_on_drop(true);
    cmd
  }

  fn spawn_error(&self, subcommand: &'static str, source: std::io::Error) -> GitError {
    GitError::Spawn {
      program: self.program.to_string_lossy().into_owned(),
      subcommand,
      source,
    }
  }

  /// Asks git whether `path` is excluded by its ignore rules.
  ///
  /// Exit status 0 means ignored; every other status means not ignored.
  ///
  /// # Errors
  ///
  /// Returns [`GitError::Spawn`] if the git binary cannot be started.
  pub async fn check_ignore(&self, path: &Path) -> Result<bool, GitError> {
    let status = self
      .command()
      .arg("check-ignore")
      .arg("--quiet")
      .arg(path)
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .status()
      .await
      .map_err(|e| self.spawn_error("check-ignore", e))?;

    trace!("git check-ignore {} -> {}", path.display(), status);
    Ok(status.success())
  }

  /// Returns the raw `git log` output for `path`, oldest commit first, one
  /// line per commit formatted with [`LOG_FORMAT`].
  ///
  /// # Errors
  ///
  /// Returns an error if git cannot be spawned or exits unsuccessfully.
  pub async fn log_authors(&self, path: &Path) -> Result<String, GitError> {
    let output = self
      .command()
      .args(["--no-pager", "log", "--date-order", "--reverse", LOG_FORMAT, "--"])
      .arg(path)
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .output()
      .await
      .map_err(|e| self.spawn_error("log", e))?;

    if !output.status.success() {
      return Err(GitError::Failed {
        subcommand: "log",
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_missing_binary_is_a_spawn_error() {
    let git = Git::new(std::env::temp_dir()).with_program("autocopyright-no-such-git-binary");

    let err = git.check_ignore(Path::new("file.c")).await.expect_err("spawn must fail");
    assert!(matches!(err, GitError::Spawn { subcommand: "check-ignore", .. }));

    let err = git.log_authors(Path::new("file.c")).await.expect_err("spawn must fail");
    assert!(matches!(err, GitError::Spawn { subcommand: "log", .. }));
    assert!(err.to_string().contains("autocopyright-no-such-git-binary"));
  }
}
