//! Read-only queries: `get`, `validity`, `count`, `is-certified`.

use serde_json::json;

use super::business;
use crate::error::CliError;
use crate::output;
use crate::session::Session;

pub fn get(session: &Session, business_raw: String, json_output: bool) -> Result<(), CliError> {
    let business_id = business(&business_raw)?;
    let (engine, _) = session.load()?;
    let cert = engine
        .get_certification(&business_id)
        .ok_or_else(|| CliError::NotFound(business_id.to_string()))?;
    let update = engine.get_last_update(&business_id);

    if json_output {
        let value = json!({
            "business_id": business_id,
            "certification": cert,
            "last_update": update,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", output::format_certification(business_id.as_str(), cert, update));
    }
    Ok(())
}

pub fn validity(session: &Session, business_raw: String, height: u64) -> Result<(), CliError> {
    let business_id = business(&business_raw)?;
    let (engine, _) = session.load()?;
    println!("{}", engine.check_cert_validity(&business_id, height));
    Ok(())
}

pub fn count(session: &Session) -> Result<(), CliError> {
    let (engine, _) = session.load()?;
    println!("{}", engine.get_cert_count());
    Ok(())
}

pub fn is_certified(session: &Session, business_raw: String) -> Result<(), CliError> {
    let business_id = business(&business_raw)?;
    let (engine, _) = session.load()?;
    println!("{}", engine.is_certified(&business_id));
    Ok(())
}
