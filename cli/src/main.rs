mod batch;
mod config;
mod logging;
mod seed;
mod tui;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use todomaster_core::{
    IdGenerator, InMemoryTaskRepository, SequentialIds, TaskRepository, TaskStore, UuidIds,
};

use crate::batch::{render_table, Batch};
use crate::config::Config;
use crate::logging::Fallback;
use crate::tui::app::App;

#[derive(Parser)]
#[command(name = "todomaster")]
#[command(about = "Your personal task manager", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/todomaster/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the Terminal User Interface
    Tui {
        /// Start from the tasks in this JSON file
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Run form commands from a file or stdin (usage: batch script.txt --json)
    Batch {
        /// Command file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Start from the tasks in this JSON file
        #[arg(long)]
        seed: Option<PathBuf>,
        /// Print the final task list as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Number ids 1, 2, 3... instead of random UUIDs
        #[arg(long)]
        sequential_ids: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Batch { file, seed, json, sequential_ids }) => {
            logging::init(&config.log, Fallback::Stderr)?;
            let repo = seeded_repository(seed.as_deref())?;
            if sequential_ids {
                let ids = SequentialIds::starting_after(seed::last_id(&repo.list()?));
                run_batch(TaskStore::with_parts(repo, ids), file.as_deref(), json, &config)
            } else {
                run_batch(TaskStore::with_parts(repo, UuidIds), file.as_deref(), json, &config)
            }
        },
        Some(Commands::Tui { seed }) => run_tui(seed.as_deref(), &config),
        None => run_tui(None, &config),
    }
}

fn seeded_repository(seed: Option<&Path>) -> Result<InMemoryTaskRepository> {
    match seed {
        Some(path) => {
            let tasks = seed::load_seed(path)?;
            tracing::info!(count = tasks.len(), path = %path.display(), "seed loaded");
            Ok(InMemoryTaskRepository::with_tasks(tasks))
        },
        None => Ok(InMemoryTaskRepository::new()),
    }
}

fn run_tui(seed: Option<&Path>, config: &Config) -> Result<()> {
    logging::init(&config.log, Fallback::Discard)?;
    let repo = seeded_repository(seed)?;
    let app = App::new(TaskStore::with_parts(repo, UuidIds), config)?;
    tui::run(app, config.tui.tick())
}

fn run_batch<G: IdGenerator>(
    mut store: TaskStore<InMemoryTaskRepository, G>,
    file: Option<&Path>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let input: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let today = Local::now().date_naive();

    let mut batch = Batch::new(&mut store, today, config.date_format()?);
    let summary = batch.run(input, &mut out)?;
    let cards = batch.cards()?;

    if json {
        serde_json::to_writer_pretty(&mut out, &cards)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render_table(&cards))?;
    }

    tracing::info!(commands = summary.commands, errors = summary.errors, "batch finished");
    Ok(())
}
