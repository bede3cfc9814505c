//! Verify command implementation.

use ecocert_journal::{verify_chain, ReadMode};
use serde_json::json;

use crate::error::CliError;
use crate::path;
use crate::session::Session;

/// Checks the hash chain, then replays it to confirm every entry still applies.
pub fn run(session: &Session, json_output: bool) -> Result<(), CliError> {
    let journal_path = path::validate_journal_path(session.journal(), true)?;
    let report = verify_chain(&journal_path, ReadMode::Strict)?;
    let (engine, summary) = session.load()?;
    let tip = report.last_entry_id.as_ref().map(|d| d.b64.as_str());

    if json_output {
        let value = json!({
            "entries": report.entries,
            "last_entry_id": &report.last_entry_id,
            "certifications": engine.get_cert_count(),
            "settlements": summary.settlements.len(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("ok: {} entries", report.entries);
        println!("tip: {}", tip.unwrap_or("-"));
        println!("certifications: {}", engine.get_cert_count());
    }
    Ok(())
}
