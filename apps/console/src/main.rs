use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use storage::{IdStrategy, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;
use views::ViewContext;

mod config;
mod shell;

use config::load_settings;
use shell::Shell;

/// Course registration desk backed by an in-memory store.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file; defaults to ./registrar.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start with an empty store instead of the demo data.
    #[arg(long)]
    empty: bool,
    /// Identifier scheme: sequential or random.
    #[arg(long)]
    ids: Option<IdStrategy>,
    /// tracing filter directive, e.g. "debug" or "storage=debug".
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if args.empty {
        settings.seed = false;
    }
    if let Some(ids) = args.ids {
        settings.id_strategy = ids;
    }
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }

    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let storage = if settings.seed {
        Storage::seeded(settings.id_strategy)
    } else {
        Storage::empty(settings.id_strategy)
    };
    let mut ctx = ViewContext::new(storage);
    info!(
        seed = settings.seed,
        ids = %ctx.storage.id_strategy(),
        "store ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut ctx, stdin.lock(), stdout.lock()).run()
}
