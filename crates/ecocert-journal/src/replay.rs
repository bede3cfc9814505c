//! Rebuilding registry state from a journal.

use std::path::Path;

use ecocert_canonical::Digest;
use ecocert_core::{RegistryConfig, RegistryEngine, SettlementInstruction};
use tracing::debug;

use crate::errors::JournalError;
use crate::reader::{JournalReader, ReadMode};
use crate::verify::ChainCursor;

/// What a replay observed besides the final state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Entries applied.
    pub entries: u64,
    /// Id of the final entry, if any.
    pub last_entry_id: Option<Digest>,
    /// Settlement instructions emitted, in order.
    pub settlements: Vec<SettlementInstruction>,
}

/// Re-applies every entry to a fresh engine built from `config`.
///
/// Each entry runs with its recorded caller and height. The chain is
/// verified as it is read, and an entry the engine rejects stops the replay
/// with [`JournalError::Diverged`].
pub fn replay<P: AsRef<Path>>(
    path: P,
    config: RegistryConfig,
) -> Result<(RegistryEngine, ReplaySummary), JournalError> {
    let mut reader = JournalReader::open(path, ReadMode::Strict)?;
    let mut cursor = ChainCursor::new();
    let mut engine = RegistryEngine::with_config(config);
    let mut settlements: Vec<SettlementInstruction> = Vec::new();

    while let Some(entry) = reader.read_entry()? {
        cursor.advance(&entry)?;
        engine
            .apply(&entry.context(), &entry.operation, &mut settlements)
            .map_err(|error| JournalError::Diverged {
                sequence: entry.sequence,
                error,
            })?;
    }

    debug!(
        entries = cursor.next_sequence(),
        settlements = settlements.len(),
        "journal replayed"
    );
    Ok((
        engine,
        ReplaySummary {
            entries: cursor.next_sequence(),
            last_entry_id: cursor.last_entry_id().cloned(),
            settlements,
        },
    ))
}
