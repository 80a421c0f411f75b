#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Checks if git is available on the system.
pub fn is_git_available() -> bool {
  Command::new("git").arg("--version").status().is_ok()
}

/// Runs a git command in the given directory, returning an error with stderr on
/// failure.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
  run_git_with_env(dir, args, &[])
}

fn run_git_with_env(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<()> {
  let output = Command::new("git")
    .args(args)
    .envs(envs.iter().copied())
    .current_dir(dir)
    .output()
    .with_context(|| format!("Failed to execute git {:?}", args))?;

  if !output.status.success() {
    anyhow::bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(())
}

/// Initializes a git repository in the given directory with deterministic
/// settings.
///
/// Configures:
/// - Default branch name set to `main`
/// - User name and email for commits
/// - Disables commit signing for test isolation
pub fn init_git_repo(dir: &Path) -> Result<()> {
  run_git(dir, &["init"])?;
  run_git(dir, &["config", "init.defaultBranch", "main"])?;
  run_git(dir, &["branch", "-M", "main"])?;
  run_git(dir, &["config", "user.name", "Test User"])?;
  run_git(dir, &["config", "user.email", "test@example.com"])?;
  // Disable commit signing for test isolation
  run_git(dir, &["config", "commit.gpgsign", "false"])?;
  // Keep line endings byte-exact on every platform
  run_git(dir, &["config", "core.autocrlf", "false"])?;
  Ok(())
}

/// Writes `content` to `file`, stages it and commits it as `author` at `date`.
///
/// `author` uses git's `Name <email>` form and `date` any format git accepts,
/// e.g. `2020-06-01T12:00:00+00:00`.
pub fn commit_as(dir: &Path, file: &str, content: &str, author: &str, date: &str) -> Result<()> {
  let path = dir.join(file);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(&path, content)?;
  run_git(dir, &["add", file])?;
  run_git_with_env(
    dir,
    &["commit", "-m", &format!("Update {}", file), "--author", author],
    &[("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)],
  )
}

/// Stages a file and creates a commit.
pub fn git_add_and_commit(dir: &Path, file: &str, message: &str) -> Result<()> {
  run_git(dir, &["add", file])?;
  run_git(dir, &["commit", "-m", message])
}

/// Writes an executable shell script named `git` into `dir` and returns its
/// path, for use with `Git::with_program`.
#[cfg(unix)]
pub fn write_fake_git(dir: &Path, body: &str) -> Result<std::path::PathBuf> {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join("git");
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", body))?;
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
  Ok(path)
}
