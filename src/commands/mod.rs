//! Command implementations

pub mod walk;

pub use walk::{handle_walk_command, run_walk};
