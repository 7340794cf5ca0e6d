//! `apuntes` command-line front end over `apuntes_core`.
//!
//! # Responsibility
//! - Parse arguments, wire optional file logging, and run one note command.
//! - Own the store lifecycle for the duration of that command.

mod args;

use anyhow::{anyhow, Context, Result};
use apuntes_core::{
    default_log_level, init_logging, Note, NoteService, NoteStore, StoreLocation,
};
use args::{Args, Command};
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = match args.verbose {
            0 => default_log_level(),
            1 => "debug",
            _ => "trace",
        };
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    if let Command::Ping = args.command {
        println!("apuntes_core ping={}", apuntes_core::ping());
        println!("apuntes_core version={}", apuntes_core::core_version());
        return Ok(());
    }

    let mut store = NoteStore::new(StoreLocation::File(args.db.clone()));
    store
        .open()
        .with_context(|| format!("failed to open notes database {}", args.db.display()))?;
    let outcome = run(&store, args.command);
    let closed = store.close();
    outcome?;
    closed?;
    Ok(())
}

fn run(store: &NoteStore, command: Command) -> Result<()> {
    let mut service = NoteService::new(store);
    match command {
        Command::Ping => {}
        Command::List { json } => {
            service.refresh()?;
            if json {
                println!("{}", serde_json::to_string_pretty(service.notes())?);
            } else {
                for note in service.notes() {
                    println!("{}\t{}", note.id.unwrap_or_default(), note.title);
                }
            }
        }
        Command::Show { note_id } => {
            let note = service
                .get_note(note_id)?
                .ok_or_else(|| anyhow!("note not found: {note_id}"))?;
            print_note(&note);
        }
        Command::Add { title, content } => {
            let note = service.add_note(title, content)?;
            info!("event=cli_command module=cli status=ok command=add");
            println!("{}", note.id.unwrap_or_default());
        }
        Command::Edit {
            note_id,
            title,
            content,
        } => {
            let note = service.edit_note(note_id, title, content)?;
            print_note(&note);
        }
        Command::Delete { note_id } => {
            if service.remove_note(note_id)? {
                println!("deleted {note_id}");
            } else {
                println!("no note with id {note_id}");
            }
        }
    }
    Ok(())
}

fn print_note(note: &Note) {
    println!("# {}", note.title);
    println!();
    println!("{}", note.content);
}
