//! Journal path checks.

use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Rejects paths that cannot name a journal file.
///
/// With `must_exist`, the file has to be present already; otherwise a
/// missing file is fine as long as its parent directory exists.
pub fn validate_journal_path(raw: &Path, must_exist: bool) -> Result<PathBuf, CliError> {
    if raw.as_os_str().is_empty() {
        return Err(CliError::Argument("journal path is empty".to_string()));
    }
    if raw.is_dir() {
        return Err(CliError::Argument(format!(
            "journal path is a directory: {}",
            sanitize_path_for_error(raw)
        )));
    }
    if must_exist && !raw.exists() {
        return Err(CliError::Argument(format!(
            "journal not found: {}",
            sanitize_path_for_error(raw)
        )));
    }
    if let Some(parent) = raw.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(CliError::Argument(format!(
                "journal directory does not exist: {}",
                sanitize_path_for_error(parent)
            )));
        }
    }
    Ok(raw.to_path_buf())
}

/// File name only, so error messages do not leak directory layout.
pub fn sanitize_path_for_error(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "<journal>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_allowed_unless_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.ecj");
        assert!(validate_journal_path(&path, false).is_ok());
        assert!(validate_journal_path(&path, true).is_err());
    }

    #[test]
    fn directories_and_missing_parents_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_journal_path(dir.path(), false).is_err());
        assert!(validate_journal_path(&dir.path().join("nope/registry.ecj"), false).is_err());
        assert!(validate_journal_path(Path::new(""), false).is_err());
    }

    #[test]
    fn sanitized_errors_show_file_name_only() {
        assert_eq!(
            sanitize_path_for_error(Path::new("/secret/place/registry.ecj")),
            "registry.ecj"
        );
    }
}
