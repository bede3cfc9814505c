use ecocert_core::RegistryError;
use thiserror::Error;

/// Errors that can occur during journal operations.
#[derive(Error, Debug)]
pub enum JournalError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid file header (magic, version, or flags).
    #[error("invalid journal header: {0}")]
    InvalidHeader(String),
    /// Invalid frame structure (reserved bytes or length).
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Reason for invalidity.
        reason: String,
    },
    /// Payload exceeds maximum size limit.
    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: usize,
        /// Maximum allowed size.
        max: u32,
    },
    /// Invalid UTF-8 in an entry payload.
    #[error("invalid UTF-8 in entry payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// Entry payload is not a well-formed journal entry.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    /// Existing file is shorter than a header.
    #[error("file is not empty; cannot initialize header")]
    FileNotEmpty,
    /// Truncated frame detected in strict mode.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Byte offset where truncation occurred.
        offset: u64,
    },
    /// Entry id could not be computed.
    #[error("entry id computation failed: {0}")]
    EntryId(#[from] ecocert_canonical::EntryIdError),
    /// Entry ids, links, or sequence numbers do not form a chain.
    #[error("chain broken at sequence {sequence}: {reason}")]
    ChainBroken {
        /// Sequence number of the offending entry.
        sequence: u64,
        /// What did not match.
        reason: String,
    },
    /// Replaying an entry was rejected by the registry.
    #[error("replay diverged at sequence {sequence}: error[{}] {}", .error.code(), .error.kind())]
    Diverged {
        /// Sequence number of the rejected entry.
        sequence: u64,
        /// Rejection reported by the engine.
        error: RegistryError,
    },
}
