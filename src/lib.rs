//! # git-walk
//!
//! `git-walk` runs a command in every git repository found below a directory.
//! It powers the `git-walk` CLI tool.
//!
//! ## Core Features
//!
//! - **Pruned Discovery**: a directory containing `.git` is a repository root and
//!   its subtree is not searched any further.
//! - **Bounded Concurrency**: a fixed pool of workers runs one command at a time each.
//! - **Readable Output**: with more than one worker, each command's output is
//!   captured and printed in one piece right after its status line.
//! - **Signal Relay**: a command killed by a signal takes the whole run down with
//!   the same signal.
//!
//! ## Example
//!
//! ```rust,no_run
//! use git_walk::commands::handle_walk_command;
//! use git_walk::core::RunConfig;
//! use git_walk::process::CommandLine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RunConfig::new(".", CommandLine::from_tokens(["git", "fetch", "--all"]))
//!         .with_concurrency(8);
//!     let summary = handle_walk_command(config).await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod process;
