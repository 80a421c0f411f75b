//! # Run Command
//!
//! Bootstraps the workspace, wires configuration, signal handling and the
//! processor together, and prints the closing summary.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use clap::builder::RangedU64ValueParser;
use tracing::debug;

use crate::abort::AbortToken;
use crate::config::load_config;
use crate::git::Git;
use crate::ignore::IgnoreFilter;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_aborting, print_done, print_summary};
use crate::processor::{Processor, ProcessorConfig, default_jobs};
use crate::workspace::resolve_workspace;

/// Arguments for a run
#[derive(Args, Debug)]
pub struct RunArgs {
  /// File or directory to process, absolute or relative to the current
  /// directory. Directories are processed recursively.
  pub path: PathBuf,

  /// Maximum number of concurrent git processes and file rewrites
  #[arg(long, short = 'j', value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
  pub jobs: Option<usize>,

  /// Path to config file (default: .autocopyright.toml in the repository root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress progress output; errors and the final `Done` are still printed
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the tool with the given arguments.
///
/// # Errors
///
/// Fails if no repository can be found, the configuration is invalid, or the
/// target path cannot be accessed. Per-file failures are reported and do not
/// fail the run.
pub async fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let abort = AbortToken::new();
  spawn_interrupt_handler(abort.clone());

  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  let workspace = resolve_workspace(&current_dir, &args.path)?;
  debug!("Using repository root: {}", workspace.root().display());

  let config = load_config(args.config.as_deref(), workspace.root(), args.no_config)?;

  let mut git = Git::new(workspace.root());
  if let Some(ref program) = config.git {
    git = git.with_program(program);
  }

  let ignore_filter = IgnoreFilter::with_defaults(&config.ignore, &config.ignore_regex, git.clone())?;
  let jobs = args.jobs.or(config.jobs).unwrap_or_else(default_jobs);
  debug!("Running with {} concurrent jobs", jobs);

  let processor = Processor::new(ProcessorConfig {
    jobs,
    abort,
    ..ProcessorConfig::new(git, ignore_filter)
  });

  let start_time = Instant::now();
  processor.run(workspace.target()).await?;
  let summary = processor.summary(start_time.elapsed());

  print_done();
  print_summary(&summary);

  Ok(())
}

/// Sets `abort` on the first Ctrl-C.
fn spawn_interrupt_handler(abort: AbortToken) {
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      abort.abort();
      print_aborting();
    }
  });
}
