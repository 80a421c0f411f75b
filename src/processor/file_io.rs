//! # File I/O Module
//!
//! This module provides the asynchronous reads and writes used by the
//! processor. The write side takes a fully computed [`SplicePlan`] so a file
//! is only truncated once nothing can fail before the first byte is written.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;

use super::splice::SplicePlan;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the complete file as raw bytes.
  pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
      .await
      .with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Rewrites `path` with the segments of `plan`.
  ///
  /// The file is opened (and truncated) once, the segments are written
  /// sequentially through that single handle, and the handle is flushed before
  /// being closed.
  pub async fn write_plan(path: &Path, plan: &SplicePlan<'_>) -> Result<()> {
    let mut file = tokio::fs::File::create(path)
      .await
      .with_context(|| format!("Failed to open file for writing: {}", path.display()))?;

    for segment in plan.segments() {
      file
        .write_all(segment)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }

    file
      .flush()
      .await
      .with_context(|| format!("Failed to flush file: {}", path.display()))
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;
  use crate::processor::splice::SpliceRegion;

  #[tokio::test]
  async fn test_write_plan_replaces_region() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.c");
    let original = b"before\nOLD\nafter\n".to_vec();
    tokio::fs::write(&path, &original).await.unwrap();

    let content = FileIO::read_bytes(&path).await.unwrap();
    let plan = SplicePlan::new(&content, b"NEW\n", Some(SpliceRegion { start: 7, end: 11 }));
    FileIO::write_plan(&path, &plan).await.unwrap();

    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"before\nNEW\nafter\n");
  }

  #[tokio::test]
  async fn test_read_missing_file_fails() {
    let dir = tempdir().unwrap();
    let err = FileIO::read_bytes(&dir.path().join("missing.c")).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
  }
}
