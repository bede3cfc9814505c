use ecocert_canonical::{PrincipalId, ProofHash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Certification programme a record was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertType {
    /// Eco certification.
    Eco,
    /// Green certification.
    Green,
    /// Sustainable certification.
    Sustainable,
}

impl CertType {
    /// Parses the lowercase wire name; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "eco" => Some(CertType::Eco),
            "green" => Some(CertType::Green),
            "sustainable" => Some(CertType::Sustainable),
            _ => None,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            CertType::Eco => "eco",
            CertType::Green => "green",
            CertType::Sustainable => "sustainable",
        }
    }
}

impl fmt::Display for CertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environmental impact magnitudes reported at issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Carbon magnitude.
    pub carbon: u64,
    /// Waste magnitude.
    pub waste: u64,
    /// Energy magnitude.
    pub energy: u64,
}

impl Metrics {
    /// True when every magnitude is strictly positive.
    pub fn all_positive(&self) -> bool {
        self.carbon > 0 && self.waste > 0 && self.energy > 0
    }
}

/// Unvalidated issuance input, exactly as a caller submits it.
///
/// `cert_type` and `proof_hash` stay raw here so the validation pipeline can
/// report `InvalidCertType` / `InvalidProofHash` in their fixed positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    /// Auditor the certification will be bound to.
    pub auditor_id: PrincipalId,
    /// Height at which the certification takes effect.
    pub issue_date: u64,
    /// Height at which the certification lapses.
    pub expiry_date: u64,
    /// Sustainability score.
    pub score: u32,
    /// Renewal period in blocks.
    pub renewal_period: u64,
    /// Certification type name.
    pub cert_type: String,
    /// Compliance level.
    pub compliance_level: u32,
    /// Grace period in blocks.
    pub grace_period: u32,
    /// Location of the business.
    pub location: String,
    /// Business category.
    pub category: String,
    /// Review rate.
    pub review_rate: u32,
    /// Digest of the audit evidence.
    #[serde(with = "raw_proof")]
    pub proof_hash: Vec<u8>,
    /// Impact metrics.
    pub metrics: Metrics,
}

/// A certification record; one per business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    /// Dense issuance sequence number.
    pub cert_id: u64,
    /// Issuing auditor; the only identity allowed to update or revoke.
    pub auditor_id: PrincipalId,
    /// Height the certification took effect.
    pub issue_date: u64,
    /// Height the certification lapses.
    pub expiry_date: u64,
    /// `true` while active; cleared by revocation and never set again.
    pub status: bool,
    /// Sustainability score (0..=100).
    pub score: u32,
    /// Renewal period in blocks.
    pub renewal_period: u64,
    /// Certification type.
    pub cert_type: CertType,
    /// Compliance level (1..=5).
    pub compliance_level: u32,
    /// Grace period in blocks.
    pub grace_period: u32,
    /// Location of the business.
    pub location: String,
    /// Business category.
    pub category: String,
    /// Review rate.
    pub review_rate: u32,
    /// Digest of the audit evidence.
    pub proof_hash: ProofHash,
    /// Impact metrics.
    pub metrics: Metrics,
}

impl Certification {
    /// Builds an active record from a request that passed validation.
    pub(crate) fn from_request(
        cert_id: u64,
        request: &IssueRequest,
        cert_type: CertType,
        proof_hash: ProofHash,
    ) -> Self {
        Self {
            cert_id,
            auditor_id: request.auditor_id.clone(),
            issue_date: request.issue_date,
            expiry_date: request.expiry_date,
            status: true,
            score: request.score,
            renewal_period: request.renewal_period,
            cert_type,
            compliance_level: request.compliance_level,
            grace_period: request.grace_period,
            location: request.location.clone(),
            category: request.category.clone(),
            review_rate: request.review_rate,
            proof_hash,
            metrics: request.metrics,
        }
    }

    /// Active and not yet expired at `height`.
    pub fn is_valid_at(&self, height: u64) -> bool {
        self.status && height < self.expiry_date
    }

    /// Copy of this record with `status` cleared.
    pub(crate) fn revoked(&self) -> Self {
        Self {
            status: false,
            ..self.clone()
        }
    }

    /// Copy of this record with new score and expiry.
    pub(crate) fn with_terms(&self, score: u32, expiry_date: u64) -> Self {
        Self {
            score,
            expiry_date,
            ..self.clone()
        }
    }
}

/// The most recent update applied to a certification.
///
/// Only the latest update is kept per business; a new update replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertUpdate {
    /// Score written by the update.
    pub update_score: u32,
    /// Expiry written by the update.
    pub update_expiry: u64,
    /// Height at which the update was applied.
    pub update_height: u64,
    /// Identity that applied it.
    pub updater: PrincipalId,
}

/// Serializes raw proof bytes as base64url so journals stay compact.
mod raw_proof {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, T: AsRef<[u8]>>(
        bytes: T,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
