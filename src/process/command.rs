//! Command lines and per-directory invocations

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::config::DEFAULT_COMMAND;

/// The external command run inside every repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Builds a command line from its tokens.
    ///
    /// An empty token list yields the default command (`git status --short -b`).
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = tokens.into_iter().map(Into::into);
        match tokens.next() {
            Some(program) => Self {
                program,
                args: tokens.collect(),
            },
            None => Self::default(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for CommandLine {
    fn default() -> Self {
        Self::from_tokens(DEFAULT_COMMAND.iter().copied())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How child output is wired for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyMode {
    /// Single worker: children write straight to our stdout/stderr
    Direct,
    /// Several workers: children write into private buffers that are
    /// dumped after their status line
    Buffered,
}

impl ConcurrencyMode {
    /// Picks the mode implied by the worker count
    pub fn for_concurrency(concurrency: usize) -> Self {
        if concurrency <= 1 {
            ConcurrencyMode::Direct
        } else {
            ConcurrencyMode::Buffered
        }
    }
}

/// One run of the command inside one repository root
#[derive(Debug, Clone)]
pub struct Invocation {
    command: Arc<CommandLine>,
    dir: PathBuf,
}

impl Invocation {
    pub fn new(command: Arc<CommandLine>, dir: PathBuf) -> Self {
        Self { command, dir }
    }

    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
