//! # Walker Module
//!
//! Directory listing for the tree walk. Each call lists one directory level;
//! recursion and fan-out live in [`super::Processor::process_tree`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::trace;

/// Kind of a directory entry worth visiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  Directory,
  File,
}

/// One directory entry, with its path relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
  pub path: PathBuf,
  pub kind: EntryKind,
}

/// Lists `dir` (relative to `root`) one level deep.
///
/// Entries are returned sorted by name. Symbolic links and special files are
/// left out.
pub async fn read_entries(root: &Path, dir: &Path) -> Result<Vec<Entry>> {
  let absolute = root.join(dir);
  let mut read_dir = tokio::fs::read_dir(&absolute)
    .await
    .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

  let mut entries = Vec::new();
  while let Some(entry) = read_dir
    .next_entry()
    .await
    .with_context(|| format!("Failed to read directory: {}", dir.display()))?
  {
    let path = join_relative(dir, &entry.file_name());

    // Prefer cached dirent file type to avoid extra syscalls where possible.
    let Ok(file_type) = entry.file_type().await else {
      continue;
    };
    let kind = if file_type.is_dir() {
      EntryKind::Directory
    } else if file_type.is_file() {
      EntryKind::File
    } else {
      trace!("Skipping: {} (not a regular file or directory)", path.display());
      continue;
    };
    entries.push(Entry { path, kind });
  }

  entries.sort_by(|a, b| a.path.cmp(&b.path));
  Ok(entries)
}

/// Joins without producing a leading `./` for the repository root.
fn join_relative(dir: &Path, name: &std::ffi::OsStr) -> PathBuf {
  if dir == Path::new(".") || dir.as_os_str().is_empty() {
    PathBuf::from(name)
  } else {
    dir.join(name)
  }
}
