//! Command-line front-end for `quillnote_core`.
//!
//! # Responsibility
//! - Resolve the data directory and start file logging.
//! - Map subcommands onto `NoteService` use-cases and print the results.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use quillnote_core::{
    default_log_level, init_logging, JsonNoteService, SortDirection, SortKey, StorePaths,
};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "quillnote";
const LOG_DIR_NAME: &str = "logs";

/// quillnote - append-only notes with labels, characters and ordering
#[derive(Parser)]
#[command(name = "quillnote")]
#[command(about = "Append-only notes with labels, characters and ordering")]
#[command(version)]
struct Cli {
    /// Directory holding notes.json, labels.json and settings.json
    #[arg(long, env = "QUILLNOTE_DATA_DIR", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new note
    Add(AddCommand),
    /// List all notes
    List(ListCommand),
    /// Show registered labels
    Labels,
    /// Register a label without creating a note
    Label {
        /// Label text (surrounding whitespace is ignored)
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

#[derive(Parser)]
struct AddCommand {
    /// The content of the note
    #[arg(value_name = "CONTENT")]
    content: String,

    /// Label for the note
    #[arg(short, long, value_name = "LABEL")]
    label: Option<String>,

    /// Participant tag; repeat for several
    #[arg(short, long = "character", value_name = "NAME")]
    characters: Vec<String>,

    /// Calendar date (YYYY-MM-DD); defaults to today
    #[arg(short, long, value_name = "DATE")]
    date: Option<NaiveDate>,
}

#[derive(Parser)]
struct ListCommand {
    /// Sort column: content|label|character|date|order
    #[arg(short, long, value_name = "COLUMN")]
    sort: Option<SortKey>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    desc: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &data_dir.join(LOG_DIR_NAME)) {
        eprintln!("Warning: logging disabled: {err}");
    }

    let paths = StorePaths::in_dir(&data_dir);
    paths
        .ensure_dirs()
        .with_context(|| format!("Failed to prepare data directory {}", data_dir.display()))?;
    let service = JsonNoteService::open(&paths);

    match cli.command {
        Commands::Add(cmd) => handle_add(&service, cmd),
        Commands::List(cmd) => {
            handle_list(&service, &cmd);
            Ok(())
        }
        Commands::Labels => {
            for label in service.list_labels() {
                println!("{label}");
            }
            Ok(())
        }
        Commands::Label { text } => {
            let labels = service
                .register_label(&text)
                .context("Failed to save label")?;
            println!("{} label(s) registered", labels.len());
            Ok(())
        }
    }
}

fn handle_add(service: &JsonNoteService, cmd: AddCommand) -> Result<()> {
    let order = service
        .create_and_persist_note(cmd.content, cmd.label.as_deref(), cmd.characters, cmd.date)
        .context("Failed to save note")?;
    info!("event=cli_add module=cli status=ok order={order}");
    println!("Note saved (order: {order})");
    Ok(())
}

fn handle_list(service: &JsonNoteService, cmd: &ListCommand) {
    let notes = match cmd.sort {
        Some(key) => {
            let direction = if cmd.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            service.sorted_notes(key, direction)
        }
        None => service.list_all_notes(),
    };

    if notes.is_empty() {
        println!("No notes.");
        return;
    }
    for note in &notes {
        let order = note
            .order
            .map_or_else(|| "-".to_string(), |order| order.to_string());
        println!("{order:>5}  {note}");
    }
}

/// Returns an absolute data directory.
///
/// Defaults to `{data_dir}/quillnote`, where `data_dir` is the platform data
/// directory (`~/.local/share` on Linux).
fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir,
        None => dirs::data_dir()
            .ok_or_else(|| anyhow!("Failed to determine data directory"))?
            .join(APP_DIR_NAME),
    };
    absolutize(&dir)
}

fn absolutize(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(cwd.join(dir))
}
