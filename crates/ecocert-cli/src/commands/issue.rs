//! `issue`.

use clap::Args;
use ecocert_canonical::PrincipalId;
use ecocert_core::{Applied, IssueRequest, Metrics, Operation};

use super::{business, Actor};
use crate::error::CliError;
use crate::output;
use crate::session::Session;

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Business to certify
    pub business: String,
    /// Auditor of record (defaults to the caller)
    #[arg(long)]
    pub auditor: Option<String>,
    #[arg(long)]
    pub issue_date: u64,
    #[arg(long)]
    pub expiry_date: u64,
    #[arg(long)]
    pub score: u32,
    #[arg(long)]
    pub renewal_period: u64,
    /// eco, green, or sustainable
    #[arg(long)]
    pub cert_type: String,
    #[arg(long)]
    pub compliance_level: u32,
    #[arg(long)]
    pub grace_period: u32,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub review_rate: u32,
    /// Proof digest as hex (32 bytes = 64 hex chars)
    #[arg(long)]
    pub proof_hash: String,
    #[arg(long)]
    pub carbon: u64,
    #[arg(long)]
    pub waste: u64,
    #[arg(long)]
    pub energy: u64,
    #[command(flatten)]
    pub actor: Actor,
}

pub fn run(session: &Session, args: IssueArgs) -> Result<(), CliError> {
    let ctx = args.actor.context()?;
    let business_id = business(&args.business)?;
    let auditor_id = match args.auditor {
        Some(auditor) => PrincipalId::parse(auditor)?,
        None => ctx.caller.clone(),
    };
    // Length is left to the registry so a short digest reports invalid_proof_hash.
    let proof_hash = hex::decode(args.proof_hash.trim())
        .map_err(|e| CliError::Argument(format!("proof hash is not hex: {}", e)))?;

    let request = IssueRequest {
        auditor_id,
        issue_date: args.issue_date,
        expiry_date: args.expiry_date,
        score: args.score,
        renewal_period: args.renewal_period,
        cert_type: args.cert_type,
        compliance_level: args.compliance_level,
        grace_period: args.grace_period,
        location: args.location,
        category: args.category,
        review_rate: args.review_rate,
        proof_hash,
        metrics: Metrics {
            carbon: args.carbon,
            waste: args.waste,
            energy: args.energy,
        },
    };

    let committed = session.commit(
        ctx,
        Operation::Issue {
            business_id: business_id.clone(),
            request,
        },
    )?;
    if let Applied::Issued { cert_id } = committed.applied {
        println!("issued cert {} for {}", cert_id, business_id);
    }
    for instruction in &committed.settlements {
        println!("{}", output::format_settlement(instruction));
    }
    Ok(())
}
