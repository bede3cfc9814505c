//! `revoke` and `update`.

use ecocert_core::Operation;

use super::{business, Actor};
use crate::error::CliError;
use crate::session::Session;

pub fn revoke(session: &Session, business_raw: String, reason: String, actor: Actor) -> Result<(), CliError> {
    let business_id = business(&business_raw)?;
    session.commit(
        actor.context()?,
        Operation::Revoke {
            business_id: business_id.clone(),
            reason,
        },
    )?;
    println!("revoked {}", business_id);
    Ok(())
}

pub fn update(
    session: &Session,
    business_raw: String,
    new_score: u32,
    new_expiry: u64,
    actor: Actor,
) -> Result<(), CliError> {
    let business_id = business(&business_raw)?;
    session.commit(
        actor.context()?,
        Operation::Update {
            business_id: business_id.clone(),
            new_score,
            new_expiry,
        },
    )?;
    println!("updated {}: score={} expiry={}", business_id, new_score, new_expiry);
    Ok(())
}
