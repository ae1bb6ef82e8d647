//! Configuration constants and settings

use std::path::PathBuf;

use crate::process::{CommandLine, ConcurrencyMode};

// Concurrency Configuration
//
// Commands are mostly I/O-bound git invocations, so the default worker count
// is well above the core count. Serial mode forces a single worker, which also
// switches output to direct passthrough so commands can colorize on a terminal.
pub const DEFAULT_CONCURRENCY: usize = 20;

// Command run in every repository when none is given after `--`
pub const DEFAULT_COMMAND: &[&str] = &["git", "status", "--short", "-b"];

// A directory containing a child directory with this name is a repository root
pub const REPOSITORY_MARKER: &str = ".git";

// Slots in the handoff channel between discovery and the workers.
// Kept at one so discovery only runs a step ahead of the pool.
pub const HANDOFF_CAPACITY: usize = 1;

/// Determines the worker count from CLI args
///
/// Priority order:
/// 1. --serial flag → 1
/// 2. -n N flag → N (at least 1)
/// 3. Default → 20
pub fn resolve_concurrency(jobs: Option<usize>, serial: bool) -> usize {
    if serial {
        return 1;
    }

    match jobs {
        Some(n) => n.max(1),
        None => DEFAULT_CONCURRENCY,
    }
}

/// Everything one run needs, assembled by the CLI
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of workers, never below one
    pub concurrency: usize,
    /// Suppress success status lines
    pub quiet: bool,
    /// Directory the repository search starts from
    pub root_path: PathBuf,
    /// Command run in every repository root
    pub command: CommandLine,
}

impl RunConfig {
    pub fn new(root_path: impl Into<PathBuf>, command: CommandLine) -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            quiet: false,
            root_path: root_path.into(),
            command,
        }
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Output mode implied by the worker count
    pub fn mode(&self) -> ConcurrencyMode {
        ConcurrencyMode::for_concurrency(self.concurrency)
    }
}
