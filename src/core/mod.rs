pub(crate) mod config;
pub(crate) mod discovery;
pub(crate) mod output;
pub(crate) mod pool;
pub(crate) mod stats;


// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;
