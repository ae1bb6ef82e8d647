//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Repository root discovery
//! - Serialized result reporting
//! - The worker pool
//! - Run statistics and configuration
//!
//! Internal implementation details are not exposed through this API.

// Configuration
pub use super::config::{resolve_concurrency, RunConfig};
pub use super::config::{DEFAULT_COMMAND, DEFAULT_CONCURRENCY, HANDOFF_CAPACITY, REPOSITORY_MARKER};

// Discovery
pub use super::discovery::{
    find_repository_roots, is_repository_root, produce_repository_roots, walk_repository_roots,
};

// Reporting
pub use super::output::{OutputSerializer, Sink};

// Execution
pub use super::pool::{WorkerContext, WorkerPool};
pub use super::stats::{RunStatistics, RunSummary};
