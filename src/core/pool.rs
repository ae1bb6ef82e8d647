//! Fixed-size worker pool draining the handoff channel

use futures::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::output::OutputSerializer;
use super::stats::RunStatistics;
use crate::process::{CommandLine, Executor, Invocation, SignalRelay};

/// Shared state every worker needs to run and report one invocation
#[derive(Clone)]
pub struct WorkerContext {
    pub command: Arc<CommandLine>,
    pub executor: Arc<dyn Executor>,
    pub relay: Arc<dyn SignalRelay>,
    pub serializer: Arc<OutputSerializer>,
    pub statistics: Arc<RunStatistics>,
}

impl WorkerContext {
    /// Runs the command in `dir`, reports the result and relays a fatal signal
    pub async fn run_one(&self, dir: PathBuf) {
        let invocation = Invocation::new(Arc::clone(&self.command), dir);
        let result = self.executor.execute(&invocation).await;
        self.statistics.record(&result.outcome);

        if let Err(err) = self.serializer.report(&invocation, &result).await {
            warn!(dir = %invocation.dir().display(), %err, "failed to write report");
        }

        // Relay even when the report could not be written
        if let Some(signal) = result.outcome.signal() {
            self.relay.relay(signal);
        }
    }
}

/// Handles of the running workers
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `concurrency` workers (at least one) sharing `receiver`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        concurrency: usize,
        receiver: mpsc::Receiver<PathBuf>,
        context: WorkerContext,
    ) -> Self {
        let receiver = Arc::new(Mutex::new(receiver));
        let handles = (0..concurrency.max(1))
            .map(|id| {
                let receiver = Arc::clone(&receiver);
                let context = context.clone();
                tokio::spawn(worker_loop(id, receiver, context))
            })
            .collect();
        Self { handles }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker to finish; returns how many panicked
    pub async fn join(self) -> usize {
        let mut pending: FuturesUnordered<_> = self.handles.into_iter().collect();
        let mut panicked = 0;
        while let Some(joined) = pending.next().await {
            if let Err(err) = joined {
                warn!(%err, "worker terminated abnormally");
                panicked += 1;
            }
        }
        panicked
    }
}

async fn worker_loop(
    id: usize,
    receiver: Arc<Mutex<mpsc::Receiver<PathBuf>>>,
    context: WorkerContext,
) {
    loop {
        // Hold the receiver only while waiting, never while running a command
        let next = receiver.lock().await.recv().await;
        let Some(dir) = next else {
            debug!(worker = id, "handoff channel closed");
            break;
        };
        context.run_one(dir).await;
    }
}
