//! Field validation for issuance, update, and revocation.
//!
//! Issuance checks run in a fixed order and stop at the first failure; the
//! order is part of the public contract because callers branch on the
//! reported kind when several fields are wrong at once:
//!
//! 1. capacity, 2. issue date, 3. expiry, 4. score, 5. renewal period,
//! 6. certification type, 7. compliance level, 8. grace period,
//! 9. location, 10. category, 11. review rate, 12. proof hash,
//! 13. metrics, 14. duplicate business, 15. caller is auditor,
//! 16. authority configured.

use ecocert_canonical::{PrincipalId, ProofHash};

use crate::certification::{CertType, IssueRequest, Metrics};
use crate::context::CallContext;
use crate::errors::RegistryError;
use crate::gate;

/// Highest accepted score.
pub const MAX_SCORE: u32 = 100;
/// Accepted compliance levels.
pub const COMPLIANCE_LEVELS: std::ops::RangeInclusive<u32> = 1..=5;
/// Longest accepted grace period.
pub const MAX_GRACE_PERIOD: u32 = 90;
/// Longest accepted location, in characters.
pub const MAX_LOCATION_LEN: usize = 100;
/// Longest accepted category, in characters.
pub const MAX_CATEGORY_LEN: usize = 50;
/// Highest accepted review rate.
pub const MAX_REVIEW_RATE: u32 = 10;
/// Longest accepted revocation reason, in characters.
pub const MAX_REVOKE_REASON_LEN: usize = 200;

/// Registry state read by the issuance checks, captured once per call.
#[derive(Debug, Clone, Copy)]
pub struct IssuanceSnapshot<'a> {
    /// Id the next certification would receive.
    pub next_cert_id: u64,
    /// Registry capacity.
    pub max_certs: u64,
    /// Whether the target business already holds a certification.
    pub business_exists: bool,
    /// Configured authority, if any.
    pub authority: Option<&'a PrincipalId>,
}

/// Typed values produced by a successful issuance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedIssue<'a> {
    /// Parsed certification type.
    pub cert_type: CertType,
    /// Fixed-width proof digest.
    pub proof_hash: ProofHash,
    /// Authority that will receive the issuance fee.
    pub authority: &'a PrincipalId,
}

/// Runs all sixteen issuance checks in order.
pub fn check_issuance<'a>(
    request: &IssueRequest,
    ctx: &CallContext,
    snapshot: IssuanceSnapshot<'a>,
) -> Result<ValidatedIssue<'a>, RegistryError> {
    check_capacity(snapshot.next_cert_id, snapshot.max_certs)?;
    check_issue_date(request.issue_date, ctx.height)?;
    check_expiry(request.expiry_date, ctx.height)?;
    check_score(request.score)?;
    check_renewal_period(request.renewal_period)?;
    let cert_type = check_cert_type(&request.cert_type)?;
    check_compliance_level(request.compliance_level)?;
    check_grace_period(request.grace_period)?;
    check_text(&request.location, MAX_LOCATION_LEN, RegistryError::InvalidLocation)?;
    check_text(&request.category, MAX_CATEGORY_LEN, RegistryError::InvalidCategory)?;
    check_review_rate(request.review_rate)?;
    let proof_hash = check_proof_hash(&request.proof_hash)?;
    check_metrics(&request.metrics)?;
    if snapshot.business_exists {
        return Err(RegistryError::CertAlreadyExists);
    }
    gate::authorize_issuer(&ctx.caller, &request.auditor_id)?;
    let authority = gate::require_authority(snapshot.authority)?;

    Ok(ValidatedIssue {
        cert_type,
        proof_hash,
        authority,
    })
}

/// Field checks for an update; existence and auditor are checked by the gate.
pub fn check_update(new_score: u32, new_expiry: u64, height: u64) -> Result<(), RegistryError> {
    check_score(new_score)?;
    check_expiry(new_expiry, height)
}

/// A revocation reason must be non-empty and at most 200 characters.
pub fn check_revoke_reason(reason: &str) -> Result<(), RegistryError> {
    check_text(reason, MAX_REVOKE_REASON_LEN, RegistryError::InvalidRevokeReason)
}

fn check_capacity(next_cert_id: u64, max_certs: u64) -> Result<(), RegistryError> {
    if next_cert_id < max_certs {
        Ok(())
    } else {
        Err(RegistryError::MaxCertsExceeded)
    }
}

fn check_issue_date(issue_date: u64, height: u64) -> Result<(), RegistryError> {
    if issue_date <= height {
        Ok(())
    } else {
        Err(RegistryError::InvalidIssueDate)
    }
}

fn check_expiry(expiry_date: u64, height: u64) -> Result<(), RegistryError> {
    if expiry_date > height {
        Ok(())
    } else {
        Err(RegistryError::InvalidExpiryDate)
    }
}

fn check_score(score: u32) -> Result<(), RegistryError> {
    if score <= MAX_SCORE {
        Ok(())
    } else {
        Err(RegistryError::InvalidScore)
    }
}

fn check_renewal_period(renewal_period: u64) -> Result<(), RegistryError> {
    if renewal_period > 0 {
        Ok(())
    } else {
        Err(RegistryError::InvalidRenewalPeriod)
    }
}

fn check_cert_type(cert_type: &str) -> Result<CertType, RegistryError> {
    CertType::parse(cert_type).ok_or(RegistryError::InvalidCertType)
}

fn check_compliance_level(level: u32) -> Result<(), RegistryError> {
    if COMPLIANCE_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(RegistryError::InvalidComplianceLevel)
    }
}

fn check_grace_period(grace_period: u32) -> Result<(), RegistryError> {
    if grace_period <= MAX_GRACE_PERIOD {
        Ok(())
    } else {
        Err(RegistryError::InvalidGracePeriod)
    }
}

fn check_review_rate(review_rate: u32) -> Result<(), RegistryError> {
    if review_rate <= MAX_REVIEW_RATE {
        Ok(())
    } else {
        Err(RegistryError::InvalidReviewRate)
    }
}

fn check_proof_hash(bytes: &[u8]) -> Result<ProofHash, RegistryError> {
    ProofHash::from_slice(bytes).map_err(|_| RegistryError::InvalidProofHash)
}

fn check_metrics(metrics: &Metrics) -> Result<(), RegistryError> {
    if metrics.all_positive() {
        Ok(())
    } else {
        Err(RegistryError::InvalidMetrics)
    }
}

/// Non-empty and at most `max` characters.
fn check_text(value: &str, max: usize, error: RegistryError) -> Result<(), RegistryError> {
    if value.is_empty() || value.chars().count() > max {
        Err(error)
    } else {
        Ok(())
    }
}
