//! git-walk: run a command in every git repository found below a directory

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use git_walk::commands::handle_walk_command;
use git_walk::core::{resolve_concurrency, RunConfig};
use git_walk::process::CommandLine;

const LONG_HELP: &str = "\
Run `command` in every git repo found. The command defaults to:

    git status --short -b

By default, the commands are run in parallel, and their stderr and stdout are
printed when the command completes, to avoid having the parallel command
output intermingled unintelligibly. Some commands only colorize when writing to
a terminal, in which case --serial may be useful, which runs the command with
output directly to the console at the price of being slower.

Examples:

    git-walk -p -q -- git describe
    git-walk git describe --tags
    git-walk -- git fetch --prune --all
    git-walk -- git co master";

#[derive(Parser, Debug)]
#[command(name = "git-walk")]
#[command(about = "Run a command in every git repository found")]
#[command(version, after_help = LONG_HELP)]
struct Cli {
    /// Print debug trace
    #[arg(short, long)]
    debug: bool,

    /// Do not print commands that are being run
    #[arg(short, long)]
    quiet: bool,

    /// Look for git repos in W and below [default: current directory]
    #[arg(short = 'w', long = "where", value_name = "W")]
    search_root: Option<PathBuf>,

    /// Run serially
    #[arg(short = '1', long)]
    serial: bool,

    /// Run commands in parallel (the default)
    #[arg(short, long)]
    parallel: bool,

    /// Run this many commands in parallel [default: 20]
    #[arg(short = 'n', value_name = "CONCURRENCY")]
    concurrency: Option<usize>,

    /// Command to run in every repository; flags after its first word belong to it
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    command: Vec<String>,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let root_path = match cli.search_root {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let concurrency = resolve_concurrency(cli.concurrency, cli.serial);
    debug!(parallel = cli.parallel || !cli.serial, concurrency, "parallel");

    let config = RunConfig::new(root_path, CommandLine::from_tokens(cli.command))
        .with_concurrency(concurrency)
        .with_quiet(cli.quiet);

    handle_walk_command(config).await?;
    Ok(())
}
