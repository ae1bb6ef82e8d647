//! Execution outcomes for a single invocation

use std::io;
use std::process::ExitStatus;

use super::signal::signal_name;

/// Terminal state of one invocation
#[derive(Debug)]
pub enum Outcome {
    /// Command exited with status 0
    Success,
    /// Command exited nonzero without being signaled
    ExitFailure(Option<i32>),
    /// Command was terminated by the given signal
    SignalTermination(i32),
    /// Command could not be started at all
    SpawnFailure(io::Error),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Signal that killed the child, if any
    pub fn signal(&self) -> Option<i32> {
        match self {
            Outcome::SignalTermination(signal) => Some(*signal),
            _ => None,
        }
    }

    /// Human readable failure reason, `None` on success
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Outcome::Success => None,
            Outcome::ExitFailure(Some(code)) => Some(format!("exit status {code}")),
            Outcome::ExitFailure(None) => Some("exit status unknown".to_string()),
            Outcome::SignalTermination(signal) => Some(format!("signal: {}", signal_name(*signal))),
            Outcome::SpawnFailure(err) => Some(err.to_string()),
        }
    }
}

impl From<ExitStatus> for Outcome {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            return Outcome::Success;
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Outcome::SignalTermination(signal);
            }
        }

        Outcome::ExitFailure(status.code())
    }
}

/// Bytes a child wrote while its output was buffered
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Outcome of one invocation plus whatever output was captured
#[derive(Debug)]
pub struct ExecutionResult {
    pub outcome: Outcome,
    /// `None` when the child wrote straight to our own streams
    pub captured: Option<CapturedOutput>,
}

impl ExecutionResult {
    /// Result of a child whose output was passed through
    pub fn direct(outcome: Outcome) -> Self {
        Self {
            outcome,
            captured: None,
        }
    }

    /// Result of a child whose output was captured
    pub fn buffered(outcome: Outcome, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            outcome,
            captured: Some(CapturedOutput { stdout, stderr }),
        }
    }
}
