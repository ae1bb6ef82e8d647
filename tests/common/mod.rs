//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fakes;
pub mod fixtures;

pub use self::fakes::{RecordingRelay, ScriptedExecutor, SharedBuffer};
pub use self::fixtures::TestTreeBuilder;
