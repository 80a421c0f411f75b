//! # autocopyright
//!
//! A tool that keeps an autogenerated, history-derived copyright header in
//! every source file of a git repository.

mod abort;
mod authors;
mod cli;
mod config;
mod git;
mod header;
mod ignore;
mod logging;
mod output;
mod processor;
mod report;
mod workspace;

use anyhow::Result;

use crate::cli::{Cli, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.run_args).await
}
