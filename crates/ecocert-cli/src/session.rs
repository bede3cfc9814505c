//! Loading registry state from the journal and committing new operations.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use ecocert_canonical::Timestamp;
use ecocert_core::{Applied, CallContext, Operation, RegistryConfig, RegistryEngine, SettlementInstruction};
use ecocert_journal::{replay, JournalWriter, ReplaySummary, WriteOptions};
use tracing::info;

use crate::error::CliError;
use crate::path;

/// A journal plus the config used to interpret it.
pub struct Session {
    journal: PathBuf,
    config: RegistryConfig,
}

/// What a committed mutation produced.
pub struct Committed {
    pub applied: Applied,
    pub settlements: Vec<SettlementInstruction>,
}

impl Session {
    pub fn open(journal: &Path, config: Option<&Path>) -> Result<Self, CliError> {
        let journal = path::validate_journal_path(journal, false)?;
        let config = match config {
            Some(config_path) => RegistryConfig::from_json_file(config_path)?,
            None => RegistryConfig::default(),
        };
        Ok(Self { journal, config })
    }

    pub fn journal(&self) -> &Path {
        &self.journal
    }

    /// Replays the journal. A journal that does not exist yet is empty.
    pub fn load(&self) -> Result<(RegistryEngine, ReplaySummary), CliError> {
        if !self.journal.exists() {
            return Ok((
                RegistryEngine::with_config(self.config.clone()),
                ReplaySummary::default(),
            ));
        }
        Ok(replay(&self.journal, self.config.clone())?)
    }

    /// Applies `operation` to the replayed state and appends it on success.
    ///
    /// Rejected operations leave the journal untouched.
    pub fn commit(&self, ctx: CallContext, operation: Operation) -> Result<Committed, CliError> {
        let (mut engine, _) = self.load()?;
        let mut settlements: Vec<SettlementInstruction> = Vec::new();
        let applied = engine.apply(&ctx, &operation, &mut settlements)?;

        let mut writer = JournalWriter::open(&self.journal, WriteOptions::default())?;
        let entry = writer.append(&ctx, operation, now())?;
        writer.finish()?;

        info!(
            journal = %path::sanitize_path_for_error(&self.journal),
            sequence = entry.sequence,
            operation = entry.operation.name(),
            "operation committed"
        );
        Ok(Committed {
            applied,
            settlements,
        })
    }
}

fn now() -> Timestamp {
    Timestamp::new(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}
