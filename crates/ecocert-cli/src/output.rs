//! Output formatting utilities.

use ecocert_core::{CertUpdate, Certification, SettlementInstruction};
use ecocert_journal::JournalEntry;

/// One line per settlement: `settlement <amount> <from> -> <to>`.
pub fn format_settlement(instruction: &SettlementInstruction) -> String {
    format!(
        "settlement {} {} -> {}",
        instruction.amount, instruction.from, instruction.to
    )
}

/// Key/value listing of a certification and its latest update.
pub fn format_certification(
    business_id: &str,
    cert: &Certification,
    update: Option<&CertUpdate>,
) -> String {
    let mut lines = vec![
        format!("{:<18} {}", "business", business_id),
        format!("{:<18} {}", "cert_id", cert.cert_id),
        format!("{:<18} {}", "auditor", cert.auditor_id),
        format!("{:<18} {}", "status", if cert.status { "active" } else { "revoked" }),
        format!("{:<18} {}", "cert_type", cert.cert_type),
        format!("{:<18} {}", "score", cert.score),
        format!("{:<18} {}", "issue_date", cert.issue_date),
        format!("{:<18} {}", "expiry_date", cert.expiry_date),
        format!("{:<18} {}", "renewal_period", cert.renewal_period),
        format!("{:<18} {}", "compliance_level", cert.compliance_level),
        format!("{:<18} {}", "grace_period", cert.grace_period),
        format!("{:<18} {}", "review_rate", cert.review_rate),
        format!("{:<18} {}", "location", cert.location),
        format!("{:<18} {}", "category", cert.category),
        format!("{:<18} {}", "proof_hash", hex::encode(cert.proof_hash.as_bytes())),
        format!(
            "{:<18} carbon={} waste={} energy={}",
            "metrics", cert.metrics.carbon, cert.metrics.waste, cert.metrics.energy
        ),
    ];
    if let Some(update) = update {
        lines.push(format!(
            "{:<18} score={} expiry={} height={} by {}",
            "last_update",
            update.update_score,
            update.update_expiry,
            update.update_height,
            update.updater
        ));
    }
    lines.join("\n")
}

/// Prints the history table header.
#[allow(clippy::print_literal)]
pub fn print_history_header() {
    println!(
        "{:<6} {:<44} {:<18} {:<8} {}",
        "SEQ", "ENTRY_ID", "OPERATION", "HEIGHT", "CALLER"
    );
    println!("{}", "-".repeat(100));
}

/// Formats an entry as a history table row.
pub fn format_history_row(entry: &JournalEntry) -> String {
    format!(
        "{:<6} {:<44} {:<18} {:<8} {}",
        entry.sequence,
        truncate(&entry.entry_id.b64, 44),
        entry.operation.name(),
        entry.height,
        entry.caller
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
