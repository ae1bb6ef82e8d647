//! Statistics tracking for a walk run

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::process::Outcome;

/// Per-outcome counters shared by all workers
///
/// Uses atomic counters so workers never contend on a lock just to count.
#[derive(Debug, Default)]
pub struct RunStatistics {
    pub discovered: AtomicU64,
    pub succeeded: AtomicU64,
    pub failed: AtomicU64,
    pub spawn_failed: AtomicU64,
    pub signaled: AtomicU64,
}

impl RunStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Records how many repository roots discovery handed to the pool
    pub fn set_discovered(&self, count: usize) {
        self.discovered.store(count as u64, Ordering::Relaxed);
    }

    /// Updates statistics based on the outcome of one invocation
    pub fn record(&self, outcome: &Outcome) {
        let counter = match outcome {
            Outcome::Success => &self.succeeded,
            Outcome::ExitFailure(_) => &self.failed,
            Outcome::SpawnFailure(_) => &self.spawn_failed,
            Outcome::SignalTermination(_) => &self.signaled,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> RunSummary {
        RunSummary {
            discovered: self.discovered.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            spawn_failed: self.spawn_failed.load(Ordering::Relaxed),
            signaled: self.signaled.load(Ordering::Relaxed),
        }
    }
}

/// Final tally of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub spawn_failed: u64,
    pub signaled: u64,
}

impl RunSummary {
    /// Number of invocations that reached a terminal state
    pub fn invocations(&self) -> u64 {
        self.succeeded + self.failures()
    }

    pub fn failures(&self) -> u64 {
        self.failed + self.spawn_failed + self.signaled
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repo_word = if self.discovered == 1 {
            "repository"
        } else {
            "repositories"
        };
        write!(
            f,
            "{} {repo_word} • {} succeeded • {} failed",
            self.discovered,
            self.succeeded,
            self.failures()
        )
    }
}
