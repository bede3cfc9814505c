//! Entry ID computation with domain-separated hashing.
//!
//! Entry IDs are computed as `sha256(domain_separator || canonical_bytes(entry))`
//! where the `entry_id` field is excluded from the hash input.

use crate::{Canonicalizer, Digest};
use serde::Serialize;
use serde_json::Value;

/// Domain separator for journal entry IDs: `b"ecocert:entry:v1\0"`.
const ENTRY_DOMAIN_SEPARATOR: &[u8] = b"ecocert:entry:v1\0";

/// Error during entry ID computation.
#[derive(thiserror::Error, Debug)]
pub enum EntryIdError {
    /// Serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// The serialized entry is not a JSON object.
    #[error("entry must serialize to a JSON object")]
    NotAnObject,
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] crate::CanonicalizationError),
}

/// Computes the entry ID for a serializable journal entry.
///
/// # Example
///
/// ```rust
/// use ecocert_canonical::{compute_entry_id, Canonicalizer};
/// use serde_json::json;
///
/// let entry = json!({ "sequence": 0, "caller": "ST3AUDITOR", "height": 12 });
/// let id = compute_entry_id(&entry, &Canonicalizer::default())?;
/// assert_eq!(id.b64.len(), 43);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compute_entry_id<T: Serialize>(
    entry: &T,
    canonicalizer: &Canonicalizer,
) -> Result<Digest, EntryIdError> {
    let mut value: Value =
        serde_json::to_value(entry).map_err(|e| EntryIdError::Serialization(e.to_string()))?;

    match &mut value {
        Value::Object(map) => {
            map.remove("entry_id");
        }
        _ => return Err(EntryIdError::NotAnObject),
    }

    let bytes = canonicalizer.canonicalize(&value)?;
    Ok(Digest::sha256(&[ENTRY_DOMAIN_SEPARATOR, &bytes]))
}

/// Returns `true` if `claimed` matches the recomputed entry ID.
pub fn verify_entry_id<T: Serialize>(
    entry: &T,
    claimed: &Digest,
    canonicalizer: &Canonicalizer,
) -> Result<bool, EntryIdError> {
    Ok(compute_entry_id(entry, canonicalizer)? == *claimed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ignores_embedded_entry_id() {
        let canonicalizer = Canonicalizer::default();
        let bare = json!({"sequence": 3, "height": 10});
        let id = compute_entry_id(&bare, &canonicalizer).unwrap();

        let with_id = json!({"sequence": 3, "height": 10, "entry_id": id});
        assert!(verify_entry_id(&with_id, &id, &canonicalizer).unwrap());
    }

    #[test]
    fn changes_when_payload_changes() {
        let canonicalizer = Canonicalizer::default();
        let a = compute_entry_id(&json!({"height": 10}), &canonicalizer).unwrap();
        let b = compute_entry_id(&json!({"height": 11}), &canonicalizer).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_non_object_entries() {
        let err = compute_entry_id(&json!([1, 2]), &Canonicalizer::default()).unwrap_err();
        assert!(matches!(err, EntryIdError::NotAnObject));
    }
}
