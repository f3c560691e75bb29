//! # gt-cli
//!
//! Interactive shell for tracking employee performance goals.
//!
//! `gt` loads the goal snapshot, then reads commands at a `$:` prompt:
//! - `add <employee> <description> <team>` — create a goal
//! - `list <employee>` — an employee's goals by status
//! - `update <goal_id> <status>` — change a goal's status
//! - `delete <goal_id>` — remove a goal
//! - `summary <team>` — a team's goals by status
//!
//! An empty line ends the session and saves the snapshot.

mod commands;
mod config;

use std::path::PathBuf;

use clap::Parser;
use gt_goal::JsonFileStore;
use tracing_subscriber::EnvFilter;

use commands::render::Renderer;
use commands::session::Session;
use config::{GoalsConfig, PersistPolicy};

/// Track employee performance goals from an interactive prompt.
#[derive(Parser)]
#[command(
    name = "gt",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GT_GIT_HASH"), ")"),
    about
)]
struct Cli {
    /// Config file (missing file means defaults).
    #[arg(long, default_value = "goals.toml")]
    config: PathBuf,

    /// Snapshot file, overriding `[storage] path`.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Save after every change instead of only at exit.
    #[arg(long)]
    persist_each_change: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,

    /// Log debug detail to stderr (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut GoalsConfig) {
        if let Some(ref data) = self.data {
            config.storage.path = data.clone();
        }
        if self.persist_each_change {
            config.storage.persist = PersistPolicy::AfterEachChange;
        }
        if self.no_color {
            config.display.color = false;
        }
    }
}

fn init_logging(verbose: bool) {
    // Logs go to stderr so they don't interleave with shell output.
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = GoalsConfig::load_or_default(&cli.config)?;
    cli.apply_to(&mut config);
    tracing::debug!(?config, "configuration resolved");

    let store = JsonFileStore::new(&config.storage.path);
    let session = Session::open(
        store,
        config.storage.persist,
        Renderer::new(config.display.color),
    )?;

    if config.storage.persist == PersistPolicy::OnExit {
        tracing::info!("changes are saved only when the shell exits");
    }

    commands::shell::run(session, config.display.banner)
}
