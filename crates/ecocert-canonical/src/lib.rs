//! Canonical data model primitives for the Ecocert registry.
//!
//! Identifiers, proof hashes, and the domain-separated digests that bind
//! journal entries together live here. Every value that participates in
//! hashing or authorization equality is defined in this crate.
//!
#![deny(missing_docs)]

/// Canonical JSON bytes for deterministic hashing.
pub mod canonicalizer;
/// Digest primitives.
pub mod digest;
/// Journal entry ID computation.
pub mod entry_id;
/// Identifier newtypes.
pub mod identifiers;
/// Fixed-width proof digests.
pub mod proof;
/// Validation errors used by canonical types.
pub mod validation;

pub use canonicalizer::{CanonicalizationError, Canonicalizer};
pub use digest::{Digest, DigestAlg};
pub use entry_id::{compute_entry_id, verify_entry_id, EntryIdError};
pub use identifiers::{BusinessId, PrincipalId, Timestamp};
pub use proof::{ProofHash, PROOF_HASH_LEN};
pub use validation::ValidationError;
