use canonical_json::to_string;
use serde_json::Value;
use std::fmt;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// A non-integer number was found; registry payloads carry heights,
    /// scores, and fees only.
    #[error("non-integer number at {0}")]
    NonIntegerNumber(String),
    /// Nesting exceeded the configured depth.
    #[error("nesting deeper than {max} at {path}")]
    TooDeep {
        /// Location of the offending value.
        path: String,
        /// Configured maximum depth.
        max: usize,
    },
    /// Generic failure from the RFC 8785 encoder.
    #[error("other error: {0}")]
    Other(String),
}

/// Location inside a JSON document, used for error reporting.
#[derive(Debug, Clone, Default)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn child(&self, segment: String) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits deterministic RFC 8785 bytes for registry payloads.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    max_depth: usize,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

impl Canonicalizer {
    /// Creates a canonicalizer that rejects documents nested deeper than `max_depth`.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Produces canonical bytes for `value`.
    pub fn canonicalize(&self, value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        self.check(value, &Path::default(), 0)?;
        let canonical =
            to_string(value).map_err(|err| CanonicalizationError::Other(err.to_string()))?;
        Ok(canonical.into_bytes())
    }

    fn check(&self, value: &Value, path: &Path, depth: usize) -> Result<(), CanonicalizationError> {
        if depth > self.max_depth {
            return Err(CanonicalizationError::TooDeep {
                path: path.to_string(),
                max: self.max_depth,
            });
        }
        match value {
            Value::Object(map) => map
                .iter()
                .try_for_each(|(key, child)| self.check(child, &path.child(key.clone()), depth + 1)),
            Value::Array(items) => items.iter().enumerate().try_for_each(|(idx, item)| {
                self.check(item, &path.child(format!("[{}]", idx)), depth + 1)
            }),
            Value::Number(num) if !(num.is_u64() || num.is_i64()) => {
                Err(CanonicalizationError::NonIntegerNumber(path.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn orders_keys_deterministically() {
        let bytes = Canonicalizer::default()
            .canonicalize(&json!({"b": 1, "a": {"z": 2, "y": 3}}))
            .unwrap();
        assert_eq!(bytes, br#"{"a":{"y":3,"z":2},"b":1}"#.to_vec());
    }

    #[test]
    fn rejects_fractional_numbers_with_path() {
        let err = Canonicalizer::default()
            .canonicalize(&json!({"metrics": [1, 2.5]}))
            .unwrap_err();
        assert_eq!(err.to_string(), "non-integer number at metrics.[1]");
    }

    #[test]
    fn rejects_excessive_nesting() {
        let err = Canonicalizer::new(1)
            .canonicalize(&json!({"a": {"b": {"c": 1}}}))
            .unwrap_err();
        assert!(matches!(err, CanonicalizationError::TooDeep { max: 1, .. }));
    }
}
