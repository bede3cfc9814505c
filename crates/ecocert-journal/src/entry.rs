use ecocert_canonical::{compute_entry_id, verify_entry_id, Canonicalizer, Digest, PrincipalId, Timestamp};
use ecocert_core::{CallContext, Operation};
use serde::{Deserialize, Serialize};

use crate::errors::JournalError;

/// One successfully applied operation, linked to its predecessor.
///
/// `entry_id` is `sha256("ecocert:entry:v1\0" || canonical_json(entry))`
/// computed with the `entry_id` field removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Content-derived identity of this entry.
    pub entry_id: Digest,
    /// Identity of the previous entry; absent for the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_entry_id: Option<Digest>,
    /// Zero-based position in the journal.
    pub sequence: u64,
    /// Wall-clock time the entry was written. Not used by replay.
    pub recorded_at: Timestamp,
    /// Caller the operation was applied for.
    pub caller: PrincipalId,
    /// Height the operation was applied at.
    pub height: u64,
    /// The applied operation.
    pub operation: Operation,
}

/// Hash input: every entry field except `entry_id`.
#[derive(Serialize)]
struct EntryBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    prev_entry_id: Option<&'a Digest>,
    sequence: u64,
    recorded_at: &'a Timestamp,
    caller: &'a PrincipalId,
    height: u64,
    operation: &'a Operation,
}

impl JournalEntry {
    /// Builds an entry and computes its id.
    pub fn seal(
        prev_entry_id: Option<Digest>,
        sequence: u64,
        recorded_at: Timestamp,
        ctx: &CallContext,
        operation: Operation,
        canonicalizer: &Canonicalizer,
    ) -> Result<Self, JournalError> {
        let body = EntryBody {
            prev_entry_id: prev_entry_id.as_ref(),
            sequence,
            recorded_at: &recorded_at,
            caller: &ctx.caller,
            height: ctx.height,
            operation: &operation,
        };
        let entry_id = compute_entry_id(&body, canonicalizer)?;
        Ok(Self {
            entry_id,
            prev_entry_id,
            sequence,
            recorded_at,
            caller: ctx.caller.clone(),
            height: ctx.height,
            operation,
        })
    }

    /// Caller and height the operation was applied with.
    pub fn context(&self) -> CallContext {
        CallContext {
            caller: self.caller.clone(),
            height: self.height,
        }
    }

    /// Recomputes the id and compares it with `entry_id`.
    pub fn verify_id(&self, canonicalizer: &Canonicalizer) -> Result<bool, JournalError> {
        Ok(verify_entry_id(self, &self.entry_id, canonicalizer)?)
    }
}
