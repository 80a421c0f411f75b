//! # Logging Module
//!
//! This module provides logging utilities for the autocopyright tool,
//! including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Error lines for per-file failures
//!
//! Progress lines go to stdout so they can be piped, while verbose logs and
//! errors go to stderr. Structured diagnostics use `tracing` and are set up by
//! [`init_tracing`].
//!
//! ## Example
//!
//! ```rust
//! use autocopyright::logging::{ColorMode, set_verbose};
//! use autocopyright::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! verbose_log!("Scanning: {}", "src");
//! info_log!("Updating file '{}'...", "src/main.c");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose mode
/// is enabled via [`set_verbose`]. It uses the same format string syntax as
/// the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a progress message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Logs an error message to stderr. Never suppressed.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::logging::print_error_log(&format!($($arg)*));
    };
}

/// Internal function to print info log messages with formatting.
///
/// # Parameters
///
/// * `message` - The message to print
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}

/// Internal function used by [`error_log!`].
pub fn print_error_log(message: &str) {
  eprintln!("{}", message.if_supports_color(Stream::Stderr, |m| m.red()));
}
