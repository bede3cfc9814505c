//! Append-only, hash-chained operation journal for the Ecocert registry.
//!
//! Every successfully applied registry operation is stored as a JSON entry
//! carrying the caller and height it ran with, linked to its predecessor by
//! a domain-separated SHA-256 id. Replaying a journal rebuilds the registry.
//!
//! ## Format
//!
//! A 16-byte header (`"ECJ1"`, version `1` LE, zero flags, eight zero
//! bytes) followed by frames: kind byte, three zero bytes, payload length
//! (u32 LE), payload. Kind `0x01` is an entry; other kinds are skipped.
//!
//! ```rust,no_run
//! use ecocert_canonical::{PrincipalId, Timestamp};
//! use ecocert_core::{CallContext, Operation, RegistryConfig};
//! use ecocert_journal::{replay, JournalWriter, WriteOptions};
//!
//! let mut writer = JournalWriter::open("registry.ecj", WriteOptions::default())?;
//! writer.append(
//!     &CallContext::new("ST2TEST", 0),
//!     Operation::SetAuthority { principal: PrincipalId::new("ST2TEST") },
//!     Timestamp::new("2024-01-01T00:00:00Z"),
//! )?;
//! writer.finish()?;
//!
//! let (engine, summary) = replay("registry.ecj", RegistryConfig::default())?;
//! assert_eq!(summary.entries, 1);
//! assert!(engine.authority().is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Journal entries and their ids.
pub mod entry;
/// Error types for journal operations.
pub mod errors;
/// Header and frame codec.
pub mod frame;
/// Journal reader.
pub mod reader;
/// Rebuilding an engine from a journal.
pub mod replay;
/// Chain verification.
pub mod verify;
/// Journal writer.
pub mod writer;

pub use entry::JournalEntry;
pub use errors::JournalError;
pub use frame::{FrameKind, JournalHeader, RecordFrame};
pub use reader::{JournalReader, ReadMode};
pub use replay::{replay, ReplaySummary};
pub use verify::{verify_chain, ChainCursor, ChainReport};
pub use writer::{JournalWriter, WriteOptions};
