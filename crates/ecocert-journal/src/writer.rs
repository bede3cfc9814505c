//! Journal writer implementation.

use crate::entry::JournalEntry;
use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame, HEADER_SIZE};
use crate::reader::{JournalReader, ReadMode};
use crate::verify::ChainCursor;
use ecocert_canonical::{Canonicalizer, Digest, Timestamp};
use ecocert_core::{CallContext, Operation};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Options for journal writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each append (default: false).
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
        }
    }
}

/// Appends chained entries to a journal file.
///
/// Opening an existing journal verifies it and resumes from its last entry,
/// so new entries link onto the existing chain.
///
/// ```rust,no_run
/// use ecocert_canonical::{PrincipalId, Timestamp};
/// use ecocert_core::{CallContext, Operation};
/// use ecocert_journal::{JournalWriter, WriteOptions};
///
/// let mut writer = JournalWriter::open("registry.ecj", WriteOptions::default())?;
/// let entry = writer.append(
///     &CallContext::new("ST2TEST", 0),
///     Operation::SetAuthority { principal: PrincipalId::new("ST2TEST") },
///     Timestamp::new("2024-01-01T00:00:00Z"),
/// )?;
/// assert_eq!(entry.sequence, 0);
/// writer.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalWriter {
    file: File,
    sync: bool,
    canonicalizer: Canonicalizer,
    last_entry_id: Option<Digest>,
    next_sequence: u64,
}

impl JournalWriter {
    /// Opens or creates a journal for appending.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, is not a journal, or its existing
    /// entries do not form a valid chain.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .create(options.create)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        let len = file.metadata()?.len();
        let cursor = if len == 0 {
            file.write_all(&JournalHeader::new().to_bytes())?;
            file.flush()?;
            if options.sync {
                file.sync_all()?;
            }
            ChainCursor::new()
        } else if len < HEADER_SIZE as u64 {
            return Err(JournalError::FileNotEmpty);
        } else {
            let mut header_bytes = [0u8; HEADER_SIZE];
            file.read_exact(&mut header_bytes)?;
            JournalHeader::from_bytes(&header_bytes)?;

            let mut reader = JournalReader::open(path, ReadMode::Strict)?;
            let mut cursor = ChainCursor::new();
            while let Some(entry) = reader.read_entry()? {
                cursor.advance(&entry)?;
            }
            file.seek(io::SeekFrom::End(0))?;
            cursor
        };

        debug!(
            path = %path.display(),
            next_sequence = cursor.next_sequence(),
            "journal opened for append"
        );
        Ok(Self {
            file,
            sync: options.sync,
            canonicalizer: Canonicalizer::default(),
            last_entry_id: cursor.last_entry_id().cloned(),
            next_sequence: cursor.next_sequence(),
        })
    }

    /// Seals `operation` into the next entry and appends it.
    pub fn append(
        &mut self,
        ctx: &CallContext,
        operation: Operation,
        recorded_at: Timestamp,
    ) -> Result<JournalEntry, JournalError> {
        let entry = JournalEntry::seal(
            self.last_entry_id.clone(),
            self.next_sequence,
            recorded_at,
            ctx,
            operation,
            &self.canonicalizer,
        )?;
        let payload = serde_json::to_vec(&entry)?;
        self.append_raw(FrameKind::Entry, &payload)?;

        self.last_entry_id = Some(entry.entry_id.clone());
        self.next_sequence += 1;
        Ok(entry)
    }

    /// Appends a raw frame with the given kind and payload.
    pub fn append_raw(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), JournalError> {
        let frame = RecordFrame::new(kind, payload.len())?;
        self.file.write_all(&frame.to_bytes())?;
        self.file.write_all(payload)?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }

    /// Id of the last entry in the journal.
    pub fn last_entry_id(&self) -> Option<&Digest> {
        self.last_entry_id.as_ref()
    }

    /// Sequence number the next entry will receive.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Flushes and closes the file.
    pub fn finish(mut self) -> Result<(), JournalError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
        if self.sync {
            let _ = self.file.sync_all();
        }
    }
}
