//! Proof types for validated content.
//!
//! Validation happens once, at construction. Holding a value means the
//! invariant holds, so downstream code never re-checks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("message content must not be empty")]
pub struct EmptyStringError;

/// A string that is never empty (or whitespace-only) after trimming.
///
/// # Serde
///
/// Serializes as a plain JSON string. Deserialization re-validates and fails
/// on empty or whitespace-only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::ops::Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::NonEmptyString;

    #[test]
    fn accepts_regular_content() {
        let s = NonEmptyString::new("hola").expect("non-empty");
        assert_eq!(s.as_str(), "hola");
    }

    #[test]
    fn rejects_empty() {
        assert!(NonEmptyString::new("").is_err());
    }

    #[test]
    fn rejects_whitespace_only() {
        assert!(NonEmptyString::new("   \n\t ").is_err());
    }

    #[test]
    fn preserves_surrounding_whitespace() {
        // Trimming is only used for the emptiness check, not applied.
        let s = NonEmptyString::new("  hola  ").expect("non-empty");
        assert_eq!(s.as_str(), "  hola  ");
    }

    #[test]
    fn serde_roundtrip() {
        let s = NonEmptyString::new("contenido").expect("non-empty");
        let json = serde_json::to_string(&s).expect("serialize");
        assert_eq!(json, "\"contenido\"");
        let back: NonEmptyString = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, s);
    }

    #[test]
    fn serde_rejects_empty() {
        let result: Result<NonEmptyString, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
