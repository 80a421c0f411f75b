//! # Output Module
//!
//! This module centralizes the user-facing progress lines of autocopyright.
//! Progress goes to stdout, failures to stderr.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::ProcessingSummary;
use crate::{error_log, info_log};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

pub fn print_updating(path: &Path) {
  info_log!("Updating file '{}'...", path.display());
}

pub fn print_ignoring(path: &Path) {
  info_log!("Ignoring path '{}'...", path.display());
}

pub fn print_aborting() {
  info_log!("Sanely aborting all pending work...");
}

/// Prints a per-file failure with its full error chain.
pub fn print_file_error(path: &Path, error: &anyhow::Error) {
  error_log!("Error processing '{}'!: {:#}", path.display(), error);
}

/// Prints `Done`, the completion signal. Never suppressed.
pub fn print_done() {
  println!("Done");
}

/// Print the processing summary.
///
/// Format: "✓ Summary: X updated, Y unchanged, Z skipped, W ignored, V failed"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let symbol = if summary.has_failures() {
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()).to_string()
  };

  let failed_str = if summary.failed > 0 {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };

  let mut summary_line = format!(
    "{} Summary: {} updated, {} unchanged, {} skipped, {} ignored, {} failed",
    symbol,
    summary.updated.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.unchanged.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.skipped.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    summary.ignored.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    failed_str,
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}
