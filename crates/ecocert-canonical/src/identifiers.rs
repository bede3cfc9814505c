use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    PrincipalId,
    "Authenticated identity of a caller, auditor, or authority (`ST3AUDITOR`, `SP...`, optionally `.contract-name`).",
    r"^[A-Za-z0-9][A-Za-z0-9_-]{0,127}(\.[A-Za-z][A-Za-z0-9_-]{0,39})?$"
);
newtype!(
    BusinessId,
    "Identifier of a certified business; the registry's primary key.",
    r"^[A-Za-z0-9][A-Za-z0-9_-]{0,127}(\.[A-Za-z][A-Za-z0-9_-]{0,39})?$"
);
newtype!(
    Timestamp,
    "UTC RFC3339 timestamp with `Z` suffix.",
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$"
);

impl PrincipalId {
    /// Returns true when this principal names the same identity as `other`.
    pub fn is(&self, other: &PrincipalId) -> bool {
        self.0 == other.0
    }
}
