//! Command-line arguments for the `apuntes` binary.

use apuntes_core::db::DATABASE_FILE_NAME;
use apuntes_core::NoteId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage short text notes", long_about = None)]
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Notes database file (created on first use)
    #[arg(short, long, value_name = "DB", global = true, default_value = DATABASE_FILE_NAME)]
    pub db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print core linkage info without touching storage
    Ping,

    /// List every note as `id<TAB>title`
    List {
        /// Print the full list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one note
    Show {
        #[arg(value_name = "NOTE_ID")]
        note_id: NoteId,
    },

    /// Add a note; title and content must not be blank
    Add {
        #[arg(value_name = "TITLE")]
        title: String,
        #[arg(value_name = "CONTENT")]
        content: String,
    },

    /// Replace title and content of an existing note
    Edit {
        #[arg(value_name = "NOTE_ID")]
        note_id: NoteId,
        #[arg(value_name = "TITLE")]
        title: String,
        #[arg(value_name = "CONTENT")]
        content: String,
    },

    /// Delete a note; unknown ids are reported but not an error
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: NoteId,
    },
}
