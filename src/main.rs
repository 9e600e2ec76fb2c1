mod calc;
mod chat;
mod cmd;
mod data;
mod session;
mod speech;
mod ui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "antibarrier", about = "to-dos, phrases, chat and calendar notes")]
struct Cli {
    /// Path to the data directory containing config.yaml and the log (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml into the data directory
    Init,
    /// Print the week-aligned day grid for a month
    Month {
        /// Month as YYYY-MM (default: the current month)
        month: Option<String>,
        /// Print the grid as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the canned phrases
    Phrases,
    /// Speak a canned phrase
    Speak {
        /// 1-based phrase number as shown by `phrases`
        index: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command {
        auto_init(&data_dir, &mut std::io::stderr())?;
    }

    init_logging(&data_dir, cli.verbose)?;

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Month { month, json }) => cmd::month::run(month.as_deref(), json),
        Some(Commands::Phrases) => cmd::phrases::run(),
        Some(Commands::Speak { index }) => cmd::speak::run(index),
    }
}

/// Logs go to a file in the data dir; stdout belongs to the TUI.
fn init_logging(data_dir: &Path, verbose: bool) -> anyhow::Result<()> {
    fs::create_dir_all(data_dir)?;
    let path = data_dir.join("antibarrier.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Writes the default config into a missing or empty `dir`, reporting on `notice`.
/// Returns true when it ran.
fn auto_init<W: Write>(dir: &Path, notice: &mut W) -> anyhow::Result<bool> {
    if !dir_needs_init(dir) {
        return Ok(false);
    }
    writeln!(
        notice,
        "Data directory '{}' is missing or empty, running init...",
        dir.display()
    )?;
    cmd::init::run_in_dir(dir)?;
    Ok(true)
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
