//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod run;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::{RunArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Update every header in the repository
  autocopyright .

  # Update a single file
  autocopyright src/plugin.cpp

  # Limit concurrency and show what is skipped
  autocopyright -v --jobs 4 source/
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub run_args: RunArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_path_is_required() {
    assert!(Cli::try_parse_from(["autocopyright"]).is_err());

    let cli = Cli::try_parse_from(["autocopyright", "-vv", "--jobs", "3", "src"]).unwrap();
    assert_eq!(cli.run_args.path, std::path::PathBuf::from("src"));
    assert_eq!(cli.run_args.verbose, 2);
    assert_eq!(cli.run_args.jobs, Some(3));
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["autocopyright", "-q", "-v", "."]).is_err());
  }

  #[test]
  fn test_zero_jobs_rejected() {
    assert!(Cli::try_parse_from(["autocopyright", "--jobs", "0", "."]).is_err());
  }
}
