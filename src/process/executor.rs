//! Spawning the command inside a repository root

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::command::{ConcurrencyMode, Invocation};
use super::status::{ExecutionResult, Outcome};

/// Runs one invocation to completion
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, invocation: &Invocation) -> ExecutionResult;
}

/// Executor backed by real child processes
#[derive(Debug, Clone, Copy)]
pub struct ProcessExecutor {
    mode: ConcurrencyMode,
}

impl ProcessExecutor {
    pub fn new(mode: ConcurrencyMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ConcurrencyMode {
        self.mode
    }

    fn command_for(invocation: &Invocation) -> Command {
        let mut command = Command::new(invocation.command().program());
        command
            .args(invocation.command().args())
            .current_dir(invocation.dir())
            .stdin(Stdio::null());
        command
    }
}

#[async_trait]
impl Executor for ProcessExecutor {
    async fn execute(&self, invocation: &Invocation) -> ExecutionResult {
        debug!(dir = %invocation.dir().display(), mode = ?self.mode, "execute where");
        let mut command = Self::command_for(invocation);

        match self.mode {
            ConcurrencyMode::Direct => {
                let status = command
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await;
                match status {
                    Ok(status) => ExecutionResult::direct(status.into()),
                    Err(err) => ExecutionResult::direct(Outcome::SpawnFailure(err)),
                }
            }
            ConcurrencyMode::Buffered => {
                let output = command
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .output()
                    .await;
                match output {
                    Ok(output) => ExecutionResult::buffered(
                        output.status.into(),
                        output.stdout,
                        output.stderr,
                    ),
                    Err(err) => ExecutionResult::buffered(
                        Outcome::SpawnFailure(err),
                        Vec::new(),
                        Vec::new(),
                    ),
                }
            }
        }
    }
}
