use std::fs;
use std::path::Path;

use ecocert_canonical::PrincipalId;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default registry capacity.
pub const DEFAULT_MAX_CERTS: u64 = 10_000;
/// Default fee charged per issuance.
pub const DEFAULT_ISSUANCE_FEE: u64 = 500;
/// Reserved principal that can never become the authority.
pub const DEFAULT_BURN_PRINCIPAL: &str = "SP000000000000000000002Q6VF78";

/// Registry parameters fixed at construction time.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Maximum number of certifications the registry will ever issue.
    pub max_certs: u64,
    /// Starting issuance fee.
    pub issuance_fee: u64,
    /// Principal refused by `set_authority`.
    pub burn_principal: PrincipalId,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_certs: DEFAULT_MAX_CERTS,
            issuance_fee: DEFAULT_ISSUANCE_FEE,
            burn_principal: PrincipalId::new(DEFAULT_BURN_PRINCIPAL),
        }
    }
}

impl RegistryConfig {
    /// Reads and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;
        let config: RegistryConfig = serde_json::from_slice(&bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the registry can run with these values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_certs == 0 {
            return Err(ConfigError::Invalid {
                field: "max_certs",
                reason: "must be greater than zero".to_string(),
            });
        }
        PrincipalId::parse(self.burn_principal.as_str())?;
        Ok(())
    }
}
