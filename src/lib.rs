//! # autocopyright
//!
//! A tool that keeps an autogenerated copyright header at the top of every
//! source file in a git repository.
//!
//! Each header lists one line per contributor, spanning the years of their
//! first and last commit to that file:
//!
//! ```text
//! // AUTOGENERATED COPYRIGHT HEADER START
//! // Copyright (C) 2019-2024 Jane Doe <jane@example.com>
//! // Copyright (C) 2022 John Roe <john@example.com>
//! // AUTOGENERATED COPYRIGHT HEADER END
//! ```
//!
//! Running the tool again replaces the block between the two markers and
//! leaves everything around it untouched.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use autocopyright::git::Git;
//! use autocopyright::ignore::IgnoreFilter;
//! use autocopyright::processor::{Processor, ProcessorConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!   let git = Git::new("/path/to/repository");
//!   let ignore_filter = IgnoreFilter::with_defaults(&[], &[], git.clone())?;
//!
//!   let processor = Processor::new(ProcessorConfig::new(git, ignore_filter));
//!   processor.run(Path::new("src")).await?;
//!
//!   let summary = processor.summary(std::time::Duration::ZERO);
//!   println!("{} files updated", summary.updated);
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Tree walk and in-place header rewrite
//! * [`authors`] - Contributor year ranges from `git log`
//! * [`header`] - Comment styles and header rendering
//! * [`ignore`] - Static and git-delegated ignore rules
//!
//! [`processor`]: crate::processor
//! [`authors`]: crate::authors
//! [`header`]: crate::header
//! [`ignore`]: crate::ignore

pub mod abort;
pub mod authors;
pub mod config;
pub mod git;
pub mod header;
pub mod ignore;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod workspace;
