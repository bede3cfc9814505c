//! `set-authority` and `set-fee`.

use ecocert_canonical::PrincipalId;
use ecocert_core::Operation;

use super::Actor;
use crate::error::CliError;
use crate::session::Session;

pub fn set_authority(session: &Session, principal: String, actor: Actor) -> Result<(), CliError> {
    let principal = PrincipalId::parse(principal)?;
    session.commit(
        actor.context()?,
        Operation::SetAuthority {
            principal: principal.clone(),
        },
    )?;
    println!("authority set to {}", principal);
    Ok(())
}

pub fn set_fee(session: &Session, fee: u64, actor: Actor) -> Result<(), CliError> {
    session.commit(actor.context()?, Operation::SetIssuanceFee { fee })?;
    println!("issuance fee set to {}", fee);
    Ok(())
}
