//! QuickNote command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the shared notes store.
//! - Translate subcommands into form submissions and delete clicks.
//! - Print the resulting list view.

use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use quicknote_core::db::{init_shared_store, with_shared_store};
use quicknote_core::{
    init_logging, init_stderr_logging, parse_note_id, ActionOutcome, AppConfig, ConfigOverrides,
    DeleteClickEvent, NoteFormController, NoteRepository, SqliteNoteRepository, SubmitEvent,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "quicknote")]
#[command(author, version, about = "Keep short notes in a local store")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database file (overrides QUICKNOTE_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files (overrides QUICKNOTE_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides QUICKNOTE_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Submit a new note
    Add {
        #[arg(short, long, default_value = "")]
        title: String,
        #[arg(short, long, default_value = "")]
        body: String,
    },
    /// Show all stored notes
    List {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Show one note
    Show { id: String },
    /// Delete one note
    Delete { id: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Html,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::resolve(ConfigOverrides {
        db_path: cli.db.clone(),
        log_dir: cli.log_dir.clone(),
        log_level: cli.log_level.clone(),
    });

    let logging = match config.log_dir.as_deref() {
        Some(log_dir) => init_logging(&config.log_level, log_dir),
        None => init_stderr_logging(&config.log_level),
    };
    if let Err(err) = logging {
        eprintln!("quicknote: logging disabled: {err}");
    }

    if let Err(err) = init_shared_store(&config.store) {
        eprintln!("quicknote: cannot open notes store: {err}");
        return ExitCode::FAILURE;
    }

    match with_shared_store(|conn| run(conn, &cli.command)) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(message)) => {
            eprintln!("quicknote: {message}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("quicknote: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(conn: &mut rusqlite::Connection, command: &Command) -> Result<(), String> {
    let repo = SqliteNoteRepository::try_new(conn).map_err(|err| err.to_string())?;

    match command {
        Command::Add { title, body } => {
            let mut controller = NoteFormController::new(repo);
            let form = controller.form_mut();
            form.title = title.clone();
            form.body = body.clone();
            match controller.on_submit(&mut SubmitEvent::new()) {
                ActionOutcome::Saved(id) => {
                    println!("Saved note {id}.");
                    print!("{}", controller.view().render_text());
                    Ok(())
                }
                _ => Err("note was not saved".to_string()),
            }
        }
        Command::List { format } => {
            match format {
                Format::Json => {
                    let notes = repo.list_all().map_err(|err| err.to_string())?;
                    let json =
                        serde_json::to_string_pretty(&notes).map_err(|err| err.to_string())?;
                    println!("{json}");
                }
                Format::Text => print!("{}", NoteFormController::new(repo).view().render_text()),
                Format::Html => print!("{}", NoteFormController::new(repo).view().render_html()),
            }
            Ok(())
        }
        Command::Show { id } => {
            let note_id = parse_note_id(id).map_err(|err| err.to_string())?;
            match repo.get_note(note_id).map_err(|err| err.to_string())? {
                Some(note) => {
                    println!("[{}] {}", note.id, note.title);
                    println!("{}", note.body);
                    Ok(())
                }
                None => Err(format!("note {note_id} not found")),
            }
        }
        Command::Delete { id } => {
            let mut controller = NoteFormController::new(repo);
            match controller.on_delete_click(&DeleteClickEvent::new(id.as_str())) {
                ActionOutcome::Deleted(_) => {
                    print!("{}", controller.view().render_text());
                    Ok(())
                }
                other => {
                    warn!("event=cli_delete module=cli status=dropped outcome={other:?}");
                    Err(format!("note `{id}` was not deleted"))
                }
            }
        }
    }
}
