//! # Processor Module
//!
//! This module contains the core functionality: walking a tree, filtering
//! ignored paths, and rewriting each file's autogenerated copyright header.
//!
//! The module is organized into several submodules:
//! - [`walker`] - One-level directory listing
//! - [`splice`] - Header block detection and the rewrite plan
//! - [`file_io`] - File reading and writing operations
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules with the git, header and ignore modules.

mod file_io;
pub mod splice;
mod walker;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
pub use file_io::FileIO;
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use tokio::sync::Semaphore;
use tracing::{debug, trace};
pub use walker::{Entry, EntryKind, read_entries};

use self::splice::{Eol, SplicePlan, find_splice_region};
use crate::abort::AbortToken;
use crate::authors::retrieve_authors;
use crate::git::Git;
use crate::header::{find_style, make_header};
use crate::ignore::IgnoreFilter;
use crate::output::{print_file_error, print_ignoring, print_updating};
use crate::report::{FileAction, ProcessingSummary, ReportCounters};

/// Default concurrency limit: four in-flight git processes or file rewrites
/// per CPU.
pub fn default_jobs() -> usize {
  num_cpus::get().max(1) * 4
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub git: Git,
  pub ignore_filter: IgnoreFilter,
  /// Maximum number of concurrent git processes and file rewrites.
  pub jobs: usize,
  pub abort: AbortToken,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     jobs: 1,
  ///     ..ProcessorConfig::new(git, ignore_filter)
  /// }
  /// ```
  pub fn new(git: Git, ignore_filter: IgnoreFilter) -> Self {
    Self {
      git,
      ignore_filter,
      jobs: default_jobs(),
      abort: AbortToken::new(),
    }
  }
}

/// Processor for keeping copyright headers up to date.
///
/// All paths handed to a `Processor` are relative to the repository root of
/// its [`Git`] handle.
pub struct Processor {
  /// Repository root; every path is resolved against it.
  root: PathBuf,

  git: Git,

  ignore_filter: IgnoreFilter,

  /// Bounds concurrent git processes and file rewrites.
  permits: Semaphore,

  abort: AbortToken,

  counters: ReportCounters,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      root: config.git.root().to_path_buf(),
      git: config.git,
      ignore_filter: config.ignore_filter,
      permits: Semaphore::new(config.jobs.max(1)),
      abort: config.abort,
      counters: ReportCounters::default(),
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Snapshot of the counters collected so far.
  pub fn summary(&self, processing_time: Duration) -> ProcessingSummary {
    self.counters.summary(processing_time)
  }

  /// Processes `target`, a file or a directory relative to the root.
  ///
  /// # Errors
  ///
  /// Fails only if the target itself cannot be inspected or its ignore check
  /// cannot run. Failures below the target are logged and counted.
  pub async fn run(&self, target: &Path) -> Result<()> {
    let metadata = tokio::fs::metadata(self.root.join(target))
      .await
      .with_context(|| format!("Failed to access '{}'", target.display()))?;

    match self.is_ignored(target).await? {
      Some(true) => {
        print_ignoring(target);
        self.counters.record_ignored();
        return Ok(());
      }
      Some(false) => {}
      None => return Ok(()),
    }

    if metadata.is_dir() {
      self.process_tree(target.to_path_buf()).await;
    } else {
      self.process_file(target.to_path_buf()).await;
    }
    Ok(())
  }

  /// Recursively processes every non-ignored file below `dir`.
  ///
  /// All entries of a directory are visited concurrently and the call returns
  /// once the whole subtree is done. Errors are reported per path.
  pub async fn process_tree(&self, dir: PathBuf) {
    if self.abort.is_aborted() {
      return;
    }

    let entries = match read_entries(&self.root, &dir).await {
      Ok(entries) => entries,
      Err(e) => {
        print_file_error(&dir, &e);
        self.counters.record_failed();
        return;
      }
    };
    trace!("Scanning '{}' ({} entries)", dir.display(), entries.len());

    join_all(entries.into_iter().map(|entry| self.visit(entry))).await;
  }

  fn visit(&self, entry: Entry) -> BoxFuture<'_, ()> {
    async move {
      if self.abort.is_aborted() {
        return;
      }

      match self.is_ignored(&entry.path).await {
        Ok(Some(true)) => {
          print_ignoring(&entry.path);
          self.counters.record_ignored();
          return;
        }
        Ok(Some(false)) => {}
        Ok(None) => {
          if entry.kind == EntryKind::File {
            self.counters.record(FileAction::Aborted);
          }
          return;
        }
        Err(e) => {
          print_file_error(&entry.path, &e);
          self.counters.record_failed();
          return;
        }
      }

      match entry.kind {
        EntryKind::Directory => self.process_tree(entry.path).await,
        EntryKind::File => self.process_file(entry.path).await,
      }
    }
    .boxed()
  }

  /// Runs the ignore filter under a concurrency permit.
  ///
  /// Returns `None` if the run was aborted while waiting for the permit; git
  /// is not spawned in that case.
  async fn is_ignored(&self, path: &Path) -> Result<Option<bool>> {
    let _permit = self.permits.acquire().await.context("Worker pool closed")?;
    if self.abort.is_aborted() {
      return Ok(None);
    }
    Ok(Some(self.ignore_filter.is_ignored(path).await?))
  }

  /// Applies the header to one file, reporting instead of propagating
  /// failures.
  pub async fn process_file(&self, path: PathBuf) {
    let result = match self.permits.acquire().await {
      // The abort flag may have been set while waiting.
      Ok(_permit) if self.abort.is_aborted() => Ok(FileAction::Aborted),
      Ok(_permit) => self.apply_header(&path).await,
      Err(e) => Err(anyhow::Error::new(e).context("Worker pool closed")),
    };

    match result {
      Ok(action) => {
        debug!("{}: {:?}", path.display(), action);
        self.counters.record(action);
      }
      Err(e) => {
        print_file_error(&path, &e);
        self.counters.record_failed();
      }
    }
  }

  /// Inserts or replaces the autogenerated header of `path`.
  ///
  /// The file is opened for writing only after the new content has been
  /// computed in full, and not at all if the content would not change. The
  /// `Updating file` line is printed only for files that are rewritten.
  ///
  /// # Errors
  ///
  /// Returns an error if git cannot be queried, or the file cannot be read or
  /// written.
  pub async fn apply_header(&self, path: &Path) -> Result<FileAction> {
    if self.abort.is_aborted() {
      return Ok(FileAction::Aborted);
    }

    if find_style(path).is_none() {
      trace!("Skipping: {} (no comment style)", path.display());
      return Ok(FileAction::UnrecognizedFormat);
    }

    let authors = retrieve_authors(&self.git, path)
      .await
      .with_context(|| format!("Failed to query history of {}", path.display()))?;
    if authors.is_empty() {
      debug!("Skipping: {} (no commit history)", path.display());
      return Ok(FileAction::NoHistory);
    }

    let header = make_header(path, &authors)?;

    let absolute = self.root.join(path);
    let content = FileIO::read_bytes(&absolute).await?;
    let eol = Eol::detect(&content);
    let rendered = header.render(eol.as_str());
    let region = find_splice_region(&content, eol);
    let plan = SplicePlan::new(&content, rendered.as_bytes(), region);

    if plan.is_identity(&content) {
      return Ok(FileAction::Unchanged);
    }

    if self.abort.is_aborted() {
      return Ok(FileAction::Aborted);
    }

    print_updating(path);
    FileIO::write_plan(&absolute, &plan).await?;
    Ok(FileAction::Updated)
  }
}
