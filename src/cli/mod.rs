//! Command-line entry point.
//!
//! With no subcommand the archive is opened in the interactive browser. `stats`, `list`
//! and `show` run the same load and filter pipeline and print to stdout.

mod commands;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::error::ArchiveError;
use crate::filters::{SortMode, ViewQuery};
use crate::tui::run_interactive;
use crate::utils::format_path_with_tilde;
use crate::viewer::Viewer;

/// Archive location used when `--archive` is not given, relative to the working directory.
pub const DEFAULT_ARCHIVE_PATH: &str = "data/conversations.json";

#[derive(Parser, Debug)]
#[command(name = "chat-archive-viewer")]
#[command(version)]
#[command(about = "Browse and search an exported chat conversation archive", long_about = None)]
pub struct Cli {
    /// Path to the exported conversations.json
    #[arg(short, long, global = true, default_value = DEFAULT_ARCHIVE_PATH)]
    pub archive: PathBuf,

    /// Log verbosity (RUST_LOG overrides this)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show statistics about the archive
    Stats,
    /// List conversations in the filtered view
    List(FilterArgs),
    /// Print one conversation's thread
    Show {
        /// Position in the filtered view (as printed by `list`)
        index: usize,

        #[command(flatten)]
        filters: FilterArgs,

        /// Print the conversation as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Case-insensitive substring the title must contain
    #[arg(short, long)]
    pub search: Option<String>,

    /// Keyword the title must contain (repeatable, all must match)
    #[arg(short = 'k', long = "keyword")]
    pub keywords: Vec<String>,

    /// Sort order: newest, oldest or title
    #[arg(long, default_value = "newest")]
    pub sort: SortMode,
}

impl FilterArgs {
    pub fn to_query(&self) -> ViewQuery {
        ViewQuery::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_keywords(&self.keywords)
            .with_sort(self.sort)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_string(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Install the global tracing subscriber.
///
/// The interactive browser owns the terminal, so without `--log-file` it runs unlogged.
fn init_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let interactive = cli.command.is_none();
    if interactive && cli.log_file.is_none() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_string()));

    let result = match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
        None => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
    Ok(())
}

/// Turn an initial-load failure into a user-facing error.
///
/// A missing archive gets its own message so the user knows where the file is expected.
fn describe_load_error(path: &Path, err: ArchiveError) -> anyhow::Error {
    if err.is_not_found() {
        anyhow!(
            "No archive found at {}. Place your exported conversations.json there or pass --archive <PATH>.",
            format_path_with_tilde(path)
        )
    } else {
        anyhow::Error::new(err).context("Failed to load archive")
    }
}

fn open_viewer(cli: &Cli, query: Option<ViewQuery>) -> Result<Viewer> {
    let mut viewer = Viewer::open(&cli.archive).map_err(|e| describe_load_error(&cli.archive, e))?;
    if let Some(query) = query {
        debug!(?query, "Applying command-line query");
        viewer.set_query(query);
    }
    Ok(viewer)
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        None => {
            let viewer = open_viewer(&cli, None)?;
            drop(stdout);
            run_interactive(viewer)?;
        }
        Some(Commands::Stats) => {
            let viewer = open_viewer(&cli, None)?;
            commands::show_stats(&viewer, &mut stdout)?;
        }
        Some(Commands::List(filters)) => {
            let viewer = open_viewer(&cli, Some(filters.to_query()))?;
            commands::list_conversations(&viewer, &mut stdout)?;
        }
        Some(Commands::Show { index, filters, json }) => {
            let viewer = open_viewer(&cli, Some(filters.to_query()))?;
            commands::show_conversation(&viewer, *index, *json, &mut stdout)?;
        }
    }

    Ok(())
}
