use ecocert_canonical::ValidationError;
use ecocert_core::{ConfigError, RegistryError};
use ecocert_journal::JournalError;
use thiserror::Error;

/// Everything a command can fail with.
#[derive(Error, Debug)]
pub enum CliError {
    /// The registry refused the operation.
    #[error("error[{}] {}: {0}", .0.code(), .0.kind())]
    Registry(#[from] RegistryError),
    #[error("journal: {0}")]
    Journal(#[from] JournalError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid identifier: {0}")]
    Identifier(#[from] ValidationError),
    #[error("invalid argument: {0}")]
    Argument(String),
    #[error("no certification for {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

