use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a fixed-width byte value has the wrong length.
    #[error("{field} must be exactly {expected} bytes, got {actual}")]
    InvalidLength {
        /// Field name that failed validation.
        field: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}
