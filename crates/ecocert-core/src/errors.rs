use thiserror::Error;

/// Failure kinds returned by registry operations.
///
/// Variants are stable identifiers; the declaration order of the issuance
/// kinds follows the order in which they are checked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryError {
    /// `next_cert_id` has reached `max_certs`.
    #[error("maximum number of certifications reached")]
    MaxCertsExceeded,
    /// Issue date lies in the future.
    #[error("issue date is after the current height")]
    InvalidIssueDate,
    /// Expiry is not strictly after the current height.
    #[error("expiry date must be after the current height")]
    InvalidExpiryDate,
    /// Score outside 0..=100.
    #[error("score must be between 0 and 100")]
    InvalidScore,
    /// Renewal period of zero.
    #[error("renewal period must be positive")]
    InvalidRenewalPeriod,
    /// Certification type outside the fixed set.
    #[error("certification type must be one of eco, green, sustainable")]
    InvalidCertType,
    /// Compliance level outside 1..=5.
    #[error("compliance level must be between 1 and 5")]
    InvalidComplianceLevel,
    /// Grace period above 90.
    #[error("grace period must not exceed 90")]
    InvalidGracePeriod,
    /// Location empty or longer than 100 characters.
    #[error("location must be 1 to 100 characters")]
    InvalidLocation,
    /// Category empty or longer than 50 characters.
    #[error("category must be 1 to 50 characters")]
    InvalidCategory,
    /// Review rate above 10.
    #[error("review rate must not exceed 10")]
    InvalidReviewRate,
    /// Proof digest is not 32 bytes.
    #[error("proof hash must be exactly 32 bytes")]
    InvalidProofHash,
    /// A metric magnitude is zero.
    #[error("carbon, waste and energy metrics must be positive")]
    InvalidMetrics,
    /// The business already holds a certification.
    #[error("certification already exists for this business")]
    CertAlreadyExists,
    /// Caller is not the auditor for this operation.
    #[error("caller is not authorized")]
    NotAuthorized,
    /// No authority principal has been configured.
    #[error("authority has not been set")]
    AuthorityNotSet,
    /// No certification exists for the business.
    #[error("certification not found")]
    CertNotFound,
    /// Revocation reason empty or longer than 200 characters.
    #[error("revocation reason must be 1 to 200 characters")]
    InvalidRevokeReason,
    /// Authority principal was already configured.
    #[error("authority is already set")]
    AlreadySet,
    /// The supplied principal is reserved.
    #[error("principal is reserved and cannot hold authority")]
    InvalidPrincipal,
}

impl RegistryError {
    /// Every kind, in declaration order.
    pub const ALL: [RegistryError; 20] = [
        RegistryError::MaxCertsExceeded,
        RegistryError::InvalidIssueDate,
        RegistryError::InvalidExpiryDate,
        RegistryError::InvalidScore,
        RegistryError::InvalidRenewalPeriod,
        RegistryError::InvalidCertType,
        RegistryError::InvalidComplianceLevel,
        RegistryError::InvalidGracePeriod,
        RegistryError::InvalidLocation,
        RegistryError::InvalidCategory,
        RegistryError::InvalidReviewRate,
        RegistryError::InvalidProofHash,
        RegistryError::InvalidMetrics,
        RegistryError::CertAlreadyExists,
        RegistryError::NotAuthorized,
        RegistryError::AuthorityNotSet,
        RegistryError::CertNotFound,
        RegistryError::InvalidRevokeReason,
        RegistryError::AlreadySet,
        RegistryError::InvalidPrincipal,
    ];

    /// Integer code used at external boundaries.
    pub fn code(self) -> u32 {
        match self {
            RegistryError::NotAuthorized => 100,
            RegistryError::InvalidIssueDate => 103,
            RegistryError::InvalidExpiryDate => 104,
            RegistryError::CertAlreadyExists => 106,
            RegistryError::CertNotFound => 107,
            RegistryError::InvalidScore => 110,
            RegistryError::InvalidRenewalPeriod => 111,
            RegistryError::MaxCertsExceeded => 114,
            RegistryError::InvalidCertType => 115,
            RegistryError::InvalidComplianceLevel => 116,
            RegistryError::InvalidGracePeriod => 117,
            RegistryError::InvalidLocation => 118,
            RegistryError::InvalidCategory => 119,
            RegistryError::InvalidReviewRate => 120,
            RegistryError::InvalidProofHash => 121,
            RegistryError::InvalidMetrics => 122,
            RegistryError::InvalidRevokeReason => 123,
            RegistryError::AuthorityNotSet => 124,
            RegistryError::AlreadySet => 125,
            RegistryError::InvalidPrincipal => 126,
        }
    }

    /// Inverse of [`RegistryError::code`].
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Stable snake_case identifier.
    pub fn kind(self) -> &'static str {
        match self {
            RegistryError::MaxCertsExceeded => "max_certs_exceeded",
            RegistryError::InvalidIssueDate => "invalid_issue_date",
            RegistryError::InvalidExpiryDate => "invalid_expiry_date",
            RegistryError::InvalidScore => "invalid_score",
            RegistryError::InvalidRenewalPeriod => "invalid_renewal_period",
            RegistryError::InvalidCertType => "invalid_cert_type",
            RegistryError::InvalidComplianceLevel => "invalid_compliance_level",
            RegistryError::InvalidGracePeriod => "invalid_grace_period",
            RegistryError::InvalidLocation => "invalid_location",
            RegistryError::InvalidCategory => "invalid_category",
            RegistryError::InvalidReviewRate => "invalid_review_rate",
            RegistryError::InvalidProofHash => "invalid_proof_hash",
            RegistryError::InvalidMetrics => "invalid_metrics",
            RegistryError::CertAlreadyExists => "cert_already_exists",
            RegistryError::NotAuthorized => "not_authorized",
            RegistryError::AuthorityNotSet => "authority_not_set",
            RegistryError::CertNotFound => "cert_not_found",
            RegistryError::InvalidRevokeReason => "invalid_revoke_reason",
            RegistryError::AlreadySet => "already_set",
            RegistryError::InvalidPrincipal => "invalid_principal",
        }
    }
}

/// Errors raised while loading a [`RegistryConfig`](crate::RegistryConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error while reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for the expected shape.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Burn principal is malformed.
    #[error("invalid burn principal: {0}")]
    Principal(#[from] ecocert_canonical::ValidationError),
    /// A field holds a value the registry cannot run with.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}
