//! Serialized reporting of invocation results
//!
//! Every status line, together with any output captured for it, is written
//! while holding one lock. Reports from concurrent workers therefore never
//! interleave. The lock is tokio's FIFO mutex, so waiters are served in turn.

use std::io::{self, Write};
use tokio::sync::Mutex;

use crate::process::{ExecutionResult, Invocation};

/// Destination for one output stream
pub type Sink = Box<dyn Write + Send>;

struct Sinks {
    out: Sink,
    err: Sink,
}

impl Sinks {
    fn write_result(
        &mut self,
        invocation: &Invocation,
        result: &ExecutionResult,
        quiet: bool,
    ) -> io::Result<()> {
        let dir = invocation.dir().display();
        let command = invocation.command();

        match result.outcome.failure_reason() {
            None if quiet => {}
            None => writeln!(self.out, "cd {dir}; {command}")?,
            Some(reason) => writeln!(self.err, "cd {dir}: `{command}` failed on {reason}")?,
        }

        if let Some(captured) = &result.captured {
            self.out.write_all(&captured.stdout)?;
            self.err.write_all(&captured.stderr)?;
        }

        self.flush()
    }

    fn write_error_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.err, "{line}")?;
        self.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }
}

/// Exclusive gate in front of the process output streams
pub struct OutputSerializer {
    sinks: Mutex<Sinks>,
    quiet: bool,
}

impl OutputSerializer {
    pub fn new(out: Sink, err: Sink, quiet: bool) -> Self {
        Self {
            sinks: Mutex::new(Sinks { out, err }),
            quiet,
        }
    }

    /// Serializer writing to the process's own stdout and stderr
    pub fn stdio(quiet: bool) -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()), quiet)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Writes the status line for one result, then its captured output
    pub async fn report(
        &self,
        invocation: &Invocation,
        result: &ExecutionResult,
    ) -> io::Result<()> {
        let mut sinks = self.sinks.lock().await;
        sinks.write_result(invocation, result, self.quiet)
    }

    /// Writes one line to the error stream
    pub async fn error_line(&self, line: &str) -> io::Result<()> {
        self.sinks.lock().await.write_error_line(line)
    }

    /// Same as [`error_line`](Self::error_line), for threads outside the runtime.
    ///
    /// Panics if called from within an async context.
    pub fn blocking_error_line(&self, line: &str) -> io::Result<()> {
        self.sinks.blocking_lock().write_error_line(line)
    }
}
