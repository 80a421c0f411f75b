//! # Report Module
//!
//! Outcome of each processed file and the run-wide counters that feed the
//! closing summary line.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
  /// The header block was inserted or replaced.
  Updated,
  /// The computed content equals the current content; nothing was written.
  Unchanged,
  /// No comment style matches the file.
  UnrecognizedFormat,
  /// git knows no commits touching the file.
  NoHistory,
  /// The run was aborted before the file was opened.
  Aborted,
}

/// Counters shared by all concurrent file tasks.
#[derive(Debug, Default)]
pub struct ReportCounters {
  updated: AtomicUsize,
  unchanged: AtomicUsize,
  skipped: AtomicUsize,
  ignored: AtomicUsize,
  failed: AtomicUsize,
}

impl ReportCounters {
  pub fn record(&self, action: FileAction) {
    let counter = match action {
      FileAction::Updated => &self.updated,
      FileAction::Unchanged => &self.unchanged,
      FileAction::UnrecognizedFormat | FileAction::NoHistory | FileAction::Aborted => &self.skipped,
    };
    counter.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_ignored(&self) {
    self.ignored.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_failed(&self) {
    self.failed.fetch_add(1, Ordering::Relaxed);
  }

  /// Freezes the counters into a summary.
  pub fn summary(&self, processing_time: Duration) -> ProcessingSummary {
    ProcessingSummary {
      updated: self.updated.load(Ordering::Relaxed),
      unchanged: self.unchanged.load(Ordering::Relaxed),
      skipped: self.skipped.load(Ordering::Relaxed),
      ignored: self.ignored.load(Ordering::Relaxed),
      failed: self.failed.load(Ordering::Relaxed),
      processing_time,
    }
  }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessingSummary {
  /// Files whose header was written
  pub updated: usize,
  /// Files already carrying the exact header
  pub unchanged: usize,
  /// Files without a comment style or without history
  pub skipped: usize,
  /// Paths excluded by an ignore rule (directories count once)
  pub ignored: usize,
  /// Files or directories that failed with an error
  pub failed: usize,
  pub processing_time: Duration,
}

impl ProcessingSummary {
  pub const fn has_failures(&self) -> bool {
    self.failed > 0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_counters_fold_skip_reasons() {
    let counters = ReportCounters::default();
    counters.record(FileAction::Updated);
    counters.record(FileAction::Updated);
    counters.record(FileAction::Unchanged);
    counters.record(FileAction::UnrecognizedFormat);
    counters.record(FileAction::NoHistory);
    counters.record_ignored();
    counters.record_failed();

    let summary = counters.summary(Duration::from_millis(5));
    assert_eq!(summary.updated, 2);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.ignored, 1);
    assert_eq!(summary.failed, 1);
    assert!(summary.has_failures());
  }
}
