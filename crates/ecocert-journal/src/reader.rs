//! Journal reader implementation.

use crate::entry::JournalEntry;
use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame, FRAME_HEADER_SIZE, HEADER_SIZE};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::warn;

/// How a truncated tail is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Truncated frames are errors.
    Strict,
    /// Truncation is treated as end-of-file.
    Permissive,
}

/// Sequential reader over a journal file.
///
/// ```rust,no_run
/// use ecocert_journal::{JournalReader, ReadMode};
///
/// let mut reader = JournalReader::open("registry.ecj", ReadMode::Strict)?;
/// while let Some(entry) = reader.read_entry()? {
///     println!("{} {}", entry.sequence, entry.operation.name());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalReader {
    file: BufReader<File>,
    mode: ReadMode,
    position: u64,
}

impl JournalReader {
    /// Opens a journal and validates its header.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, JournalError> {
        let mut file = BufReader::new(File::open(path)?);
        let mut header_bytes = [0u8; HEADER_SIZE];
        file.read_exact(&mut header_bytes).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                JournalError::InvalidHeader("file shorter than header".to_string())
            } else {
                e.into()
            }
        })?;
        JournalHeader::from_bytes(&header_bytes)?;

        Ok(Self {
            file,
            mode,
            position: HEADER_SIZE as u64,
        })
    }

    /// Byte offset of the next frame.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Reads the next frame of any kind.
    ///
    /// Returns `Ok(None)` at end-of-file, or at a truncated tail in
    /// permissive mode.
    pub fn read_frame(&mut self) -> Result<Option<(FrameKind, Vec<u8>)>, JournalError> {
        let mut frame_header = [0u8; FRAME_HEADER_SIZE];
        match read_full(&mut self.file, &mut frame_header)? {
            0 => return Ok(None),
            n if n < FRAME_HEADER_SIZE => return self.truncated(self.position),
            _ => {}
        }
        let frame = RecordFrame::from_bytes(&frame_header, self.position)?;
        let payload_offset = self.position + FRAME_HEADER_SIZE as u64;

        let mut payload = vec![0u8; frame.len as usize];
        if read_full(&mut self.file, &mut payload)? < payload.len() {
            return self.truncated(payload_offset);
        }

        self.position = payload_offset + u64::from(frame.len);
        Ok(Some((frame.kind, payload)))
    }

    /// Reads the next entry, skipping frames of unknown kind.
    pub fn read_entry(&mut self) -> Result<Option<JournalEntry>, JournalError> {
        loop {
            match self.read_frame()? {
                None => return Ok(None),
                Some((FrameKind::Entry, payload)) => {
                    let text = std::str::from_utf8(&payload)?;
                    return Ok(Some(serde_json::from_str(text)?));
                }
                Some((FrameKind::Unknown(_), _)) => continue,
            }
        }
    }

    /// Reads every remaining entry.
    pub fn read_all(&mut self) -> Result<Vec<JournalEntry>, JournalError> {
        let mut entries = Vec::new();
        while let Some(entry) = self.read_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }

    fn truncated<T>(&self, offset: u64) -> Result<Option<T>, JournalError> {
        match self.mode {
            ReadMode::Strict => Err(JournalError::TruncatedFrame { offset }),
            ReadMode::Permissive => {
                warn!(offset, "journal ends with a truncated frame; stopping");
                Ok(None)
            }
        }
    }
}

/// Reads until `buf` is full or EOF; returns the number of bytes read.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize, JournalError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
