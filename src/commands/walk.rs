//! Repository walk command implementation
//!
//! This module wires discovery, the worker pool, the process executor and the
//! output serializer together for one run: discovery feeds repository roots
//! into a bounded channel, a fixed number of workers run the command in each
//! root, and every result is reported under one lock.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::core::{
    produce_repository_roots, OutputSerializer, RunConfig, RunStatistics, RunSummary,
    WorkerContext, WorkerPool, HANDOFF_CAPACITY,
};
use crate::process::{Executor, ProcessExecutor, ProcessSignalRelay, SignalRelay};

/// Handles the walk command with real child processes and our own stdio
pub async fn handle_walk_command(config: RunConfig) -> Result<RunSummary> {
    let mode = config.mode();
    debug!(concurrency = config.concurrency, ?mode, "pool");
    debug!(command = %config.command, "cmd");
    debug!(root = ?config.root_path, "where");

    let executor = Arc::new(ProcessExecutor::new(mode));
    let serializer = Arc::new(OutputSerializer::stdio(config.quiet));
    let summary = run_walk(&config, executor, Arc::new(ProcessSignalRelay), serializer).await?;

    debug!(%summary, "walk finished");
    Ok(summary)
}

/// Runs the command in every repository root below `config.root_path`
///
/// Workers are started before discovery begins. Returns once discovery has
/// finished and every worker has drained the channel.
pub async fn run_walk(
    config: &RunConfig,
    executor: Arc<dyn Executor>,
    relay: Arc<dyn SignalRelay>,
    serializer: Arc<OutputSerializer>,
) -> Result<RunSummary> {
    let statistics = Arc::new(RunStatistics::new());
    let (sender, receiver) = mpsc::channel(HANDOFF_CAPACITY);

    let context = WorkerContext {
        command: Arc::new(config.command.clone()),
        executor,
        relay,
        serializer: Arc::clone(&serializer),
        statistics: Arc::clone(&statistics),
    };
    let pool = WorkerPool::spawn(config.concurrency, receiver, context);

    let root = config.root_path.clone();
    let discovery = tokio::task::spawn_blocking(move || {
        produce_repository_roots(&root, sender, &serializer)
    })
    .await;

    // Discovery dropped the sender either way, so the workers will drain and stop
    let panicked = pool.join().await;

    let discovered = discovery.context("repository discovery failed")?;
    statistics.set_discovered(discovered);
    if panicked > 0 {
        anyhow::bail!("{panicked} worker(s) stopped unexpectedly");
    }

    Ok(statistics.snapshot())
}
