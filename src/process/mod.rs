//! External process execution: command lines, outcomes, executors and signal relay

pub mod command;
pub mod executor;
pub mod signal;
pub mod status;

// Re-export commonly used items
pub use command::*;
pub use executor::*;
pub use signal::*;
pub use status::*;
