use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use gridcalc::eval::DEFAULT_MAX_DEPTH;
use gridcalc::{ExtensionPolicy, Menu, OpenOutcome, Session, WorkbookConfig};

const DEFAULT_DEPTH: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MAX_DEPTH) {
    Some(depth) => depth,
    None => NonZeroUsize::MIN,
};

#[derive(Parser, Debug)]
#[command(name = "gridcalc", version, about = "Console spreadsheet over comma-separated files")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Accept any file name whose last three characters are `txt`.
    #[arg(long, global = true)]
    legacy_extension: bool,

    /// Deepest chain of nested formula cells one evaluation may follow.
    #[arg(long, global = true, default_value_t = DEFAULT_DEPTH)]
    max_depth: NonZeroUsize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive menu, optionally with a table already loaded.
    Edit { path: Option<PathBuf> },
    /// Print a table and exit.
    Print { path: PathBuf },
    /// Set one cell and save.
    Set {
        path: PathBuf,
        row: u32,
        col: u32,
        value: String,
        /// Write to this file instead of overwriting PATH.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn workbook_config(&self) -> WorkbookConfig {
        let policy = if self.legacy_extension {
            ExtensionPolicy::Legacy
        } else {
            ExtensionPolicy::Strict
        };
        WorkbookConfig::default()
            .with_extension_policy(policy)
            .with_max_depth(self.max_depth.get())
    }
}

#[cfg(feature = "tracing")]
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    #[cfg(feature = "tracing")]
    init_tracing(cli.verbose);

    let config = cli.workbook_config();
    match cli.command {
        None => run_edit(None, config),
        Some(Command::Edit { path }) => run_edit(path, config),
        Some(Command::Print { path }) => run_print(path, config),
        Some(Command::Set {
            path,
            row,
            col,
            value,
            output,
        }) => run_set(path, row, col, &value, output, config),
    }
}

fn open_session(path: &Path, config: WorkbookConfig) -> Result<Session> {
    let mut session = Session::new(config);
    let outcome = session
        .open(path)
        .with_context(|| format!("failed to load table: {}", path.display()))?;
    if let OpenOutcome::Opened { rejected, .. } = outcome {
        for r in rejected {
            eprintln!("warning: skipped {} at {}: {}", r.token, r.coord, r.error);
        }
    }
    Ok(session)
}

fn run_edit(path: Option<PathBuf>, config: WorkbookConfig) -> Result<()> {
    let session = match path {
        Some(path) => open_session(&path, config)?,
        None => Session::new(config),
    };
    let stdin = io::stdin();
    let mut menu = Menu::new(session, stdin.lock(), io::stdout());
    menu.run().context("terminal I/O failed")?;
    Ok(())
}

fn run_print(path: PathBuf, config: WorkbookConfig) -> Result<()> {
    let session = open_session(&path, config)?;
    session
        .print(&mut io::stdout())
        .context("failed to print table")?;
    Ok(())
}

fn run_set(
    path: PathBuf,
    row: u32,
    col: u32,
    value: &str,
    output: Option<PathBuf>,
    config: WorkbookConfig,
) -> Result<()> {
    let mut session = open_session(&path, config)?;
    if session.grid().is_empty() {
        bail!("table {} has no cells to edit", path.display());
    }
    session
        .edit_cell(row, col, value)
        .with_context(|| format!("failed to set R{row}C{col}"))?;
    match output {
        Some(out) => session
            .save_as(&out)
            .with_context(|| format!("failed to save table: {}", out.display()))?,
        None => session
            .save()
            .with_context(|| format!("failed to save table: {}", path.display()))?,
    }
    Ok(())
}
