//! History command implementation.

use ecocert_journal::{JournalReader, ReadMode};

use crate::error::CliError;
use crate::output;
use crate::path;
use crate::session::Session;

pub fn run(session: &Session, json: bool) -> Result<(), CliError> {
    let journal_path = path::validate_journal_path(session.journal(), true)?;
    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict)?;

    if !json {
        output::print_history_header();
    }
    while let Some(entry) = reader.read_entry()? {
        if json {
            println!("{}", serde_json::to_string(&entry)?);
        } else {
            println!("{}", output::format_history_row(&entry));
        }
    }
    Ok(())
}
