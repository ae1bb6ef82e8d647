//! In-memory stand-ins for output streams, executors and the signal relay

use async_trait::async_trait;
use git_walk::process::{ExecutionResult, Executor, Invocation, Outcome, SignalRelay};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Clonable writer collecting everything into one buffer
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn boxed(&self) -> Box<dyn Write + Send> {
        Box::new(self.clone())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Relay recording the signals it was asked to deliver
#[derive(Default)]
pub struct RecordingRelay {
    signals: Mutex<Vec<i32>>,
}

impl RecordingRelay {
    pub fn signals(&self) -> Vec<i32> {
        self.signals.lock().unwrap().clone()
    }
}

impl SignalRelay for RecordingRelay {
    fn relay(&self, signal: i32) {
        self.signals.lock().unwrap().push(signal);
    }
}

type Script = dyn Fn(&Invocation) -> ExecutionResult + Send + Sync;

/// Executor returning scripted results and recording every directory it saw
pub struct ScriptedExecutor {
    script: Box<Script>,
    delay: Duration,
    seen: Mutex<Vec<PathBuf>>,
}

impl ScriptedExecutor {
    pub fn new(script: impl Fn(&Invocation) -> ExecutionResult + Send + Sync + 'static) -> Self {
        Self {
            script: Box::new(script),
            delay: Duration::ZERO,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Executor whose every invocation succeeds
    pub fn succeeding() -> Self {
        Self::new(|_| ExecutionResult::direct(Outcome::Success))
    }

    /// Sleep this long inside every invocation to force overlap between workers
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn seen(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn execute(&self, invocation: &Invocation) -> ExecutionResult {
        self.seen.lock().unwrap().push(invocation.dir().to_path_buf());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.script)(invocation)
    }
}
