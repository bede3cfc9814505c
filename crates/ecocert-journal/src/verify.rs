//! Chain verification: entry ids, predecessor links, dense sequence.

use std::path::Path;

use ecocert_canonical::{Canonicalizer, Digest};

use crate::entry::JournalEntry;
use crate::errors::JournalError;
use crate::reader::{JournalReader, ReadMode};

/// Tracks the chain tip while entries are read in order.
#[derive(Debug, Clone, Default)]
pub struct ChainCursor {
    canonicalizer: Canonicalizer,
    last_entry_id: Option<Digest>,
    next_sequence: u64,
}

impl ChainCursor {
    /// Cursor positioned before the first entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that `entry` is the valid successor of the current tip, then
    /// advances the tip to it.
    pub fn advance(&mut self, entry: &JournalEntry) -> Result<(), JournalError> {
        let broken = |reason: String| JournalError::ChainBroken {
            sequence: entry.sequence,
            reason,
        };

        if entry.sequence != self.next_sequence {
            return Err(broken(format!("expected sequence {}", self.next_sequence)));
        }
        if entry.prev_entry_id != self.last_entry_id {
            return Err(broken("prev_entry_id does not match previous entry".to_string()));
        }
        if !entry.verify_id(&self.canonicalizer)? {
            return Err(broken("entry_id does not match entry contents".to_string()));
        }

        self.last_entry_id = Some(entry.entry_id.clone());
        self.next_sequence += 1;
        Ok(())
    }

    /// Id of the last accepted entry.
    pub fn last_entry_id(&self) -> Option<&Digest> {
        self.last_entry_id.as_ref()
    }

    /// Sequence number the next entry must carry.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }
}

/// Result of a successful chain verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    /// Number of entries checked.
    pub entries: u64,
    /// Id of the final entry, if any.
    pub last_entry_id: Option<Digest>,
}

/// Verifies every entry id, predecessor link, and sequence number.
pub fn verify_chain<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<ChainReport, JournalError> {
    let mut reader = JournalReader::open(path, mode)?;
    let mut cursor = ChainCursor::new();
    while let Some(entry) = reader.read_entry()? {
        cursor.advance(&entry)?;
    }
    Ok(ChainReport {
        entries: cursor.next_sequence(),
        last_entry_id: cursor.last_entry_id().cloned(),
    })
}
