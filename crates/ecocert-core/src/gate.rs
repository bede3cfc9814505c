//! Authorization checks for registry mutations.

use ecocert_canonical::PrincipalId;

use crate::certification::Certification;
use crate::errors::RegistryError;

/// Issuance is allowed only when the caller is issuing in its own name.
pub fn authorize_issuer(caller: &PrincipalId, auditor_id: &PrincipalId) -> Result<(), RegistryError> {
    if caller.is(auditor_id) {
        Ok(())
    } else {
        Err(RegistryError::NotAuthorized)
    }
}

/// Returns the authority principal, or `AuthorityNotSet`.
pub fn require_authority(authority: Option<&PrincipalId>) -> Result<&PrincipalId, RegistryError> {
    authority.ok_or(RegistryError::AuthorityNotSet)
}

/// Update and revoke: the record must exist and the caller must be its auditor.
pub fn authorize_auditor<'a>(
    record: Option<&'a Certification>,
    caller: &PrincipalId,
) -> Result<&'a Certification, RegistryError> {
    let record = record.ok_or(RegistryError::CertNotFound)?;
    if !caller.is(&record.auditor_id) {
        return Err(RegistryError::NotAuthorized);
    }
    Ok(record)
}
