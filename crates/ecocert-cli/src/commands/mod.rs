pub mod authority;
pub mod history;
pub mod issue;
pub mod lifecycle;
pub mod query;
pub mod verify;

use clap::Args;
use ecocert_canonical::{BusinessId, PrincipalId};
use ecocert_core::CallContext;

use crate::error::CliError;

/// Who is acting, and at what block height.
#[derive(Args, Debug, Clone)]
pub struct Actor {
    /// Authenticated caller principal
    #[arg(long)]
    pub caller: String,
    /// Current block height
    #[arg(long, default_value_t = 0)]
    pub height: u64,
}

impl Actor {
    pub fn context(&self) -> Result<CallContext, CliError> {
        Ok(CallContext {
            caller: PrincipalId::parse(self.caller.as_str())?,
            height: self.height,
        })
    }
}

pub fn business(raw: &str) -> Result<BusinessId, CliError> {
    Ok(BusinessId::parse(raw)?)
}
