use ecocert_canonical::{BusinessId, PrincipalId};
use serde::{Deserialize, Serialize};

use crate::certification::IssueRequest;

/// A registry mutation in serializable form.
///
/// Journals store these so a registry can be rebuilt by replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Configure the authority principal.
    SetAuthority {
        /// New authority.
        principal: PrincipalId,
    },
    /// Change the issuance fee.
    SetIssuanceFee {
        /// New fee.
        fee: u64,
    },
    /// Issue a certification.
    Issue {
        /// Business receiving the certification.
        business_id: BusinessId,
        /// Issuance fields.
        request: IssueRequest,
    },
    /// Revoke a certification.
    Revoke {
        /// Business whose certification is revoked.
        business_id: BusinessId,
        /// Why it was revoked.
        reason: String,
    },
    /// Change score and expiry.
    Update {
        /// Business whose certification is updated.
        business_id: BusinessId,
        /// Replacement score.
        new_score: u32,
        /// Replacement expiry height.
        new_expiry: u64,
    },
}

impl Operation {
    /// Snake-case tag, as used in the `op` field.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SetAuthority { .. } => "set_authority",
            Operation::SetIssuanceFee { .. } => "set_issuance_fee",
            Operation::Issue { .. } => "issue",
            Operation::Revoke { .. } => "revoke",
            Operation::Update { .. } => "update",
        }
    }
}

/// Outcome of a successfully applied [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Applied {
    /// Authority or fee changed, or a revoke/update took effect.
    Done,
    /// A certification was issued with this id.
    Issued {
        /// Assigned id.
        cert_id: u64,
    },
}
