use ecocert_canonical::PrincipalId;

use crate::errors::RegistryError;

/// The single authority principal and the fee charged per issuance.
///
/// The authority starts unset and can be set exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityConfig {
    authority: Option<PrincipalId>,
    issuance_fee: u64,
    burn_principal: PrincipalId,
}

impl AuthorityConfig {
    /// Unset authority with the given starting fee and reserved principal.
    pub fn new(issuance_fee: u64, burn_principal: PrincipalId) -> Self {
        Self {
            authority: None,
            issuance_fee,
            burn_principal,
        }
    }

    /// Sets the authority once. The reserved burn principal is refused.
    pub fn set_authority(&mut self, principal: PrincipalId) -> Result<(), RegistryError> {
        if self.authority.is_some() {
            return Err(RegistryError::AlreadySet);
        }
        if principal.is(&self.burn_principal) {
            return Err(RegistryError::InvalidPrincipal);
        }
        self.authority = Some(principal);
        Ok(())
    }

    /// Overwrites the issuance fee. Requires an authority to be configured.
    pub fn set_issuance_fee(&mut self, fee: u64) -> Result<(), RegistryError> {
        if self.authority.is_none() {
            return Err(RegistryError::AuthorityNotSet);
        }
        self.issuance_fee = fee;
        Ok(())
    }

    /// Configured authority, if any.
    pub fn authority(&self) -> Option<&PrincipalId> {
        self.authority.as_ref()
    }

    /// Current issuance fee.
    pub fn issuance_fee(&self) -> u64 {
        self.issuance_fee
    }

    /// Principal that may never hold authority.
    pub fn burn_principal(&self) -> &PrincipalId {
        &self.burn_principal
    }
}
