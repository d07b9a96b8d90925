// models/src/identifiers.rs

use core::{hash::Hash, ops::Deref};
use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use internment::Intern;

use crate::errors::{ValidationError, ValidationResult};

/// A record identifier such as `p1`, `d2` or `app3`. Identifiers are interned
/// strings (255 bytes max); equality is exact and case-sensitive.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(Intern<String>);

impl RecordId {
    /// Creates a new identifier.
    ///
    /// # Errors
    /// Returns a `ValidationError` if the `value` is not between 1 and 255
    /// bytes in length (inclusive).
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        if value.is_empty() || value.len() > u8::MAX as usize {
            return Err(ValidationError::InvalidIdentifierLength);
        }

        Ok(Self(Intern::new(value)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for RecordId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl FromStr for RecordId {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.as_str().to_string()
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::RecordId;
    use crate::errors::ValidationError;
    use core::str::FromStr;

    #[test]
    fn should_not_create_empty_identifier() {
        let identifier = RecordId::new("");
        assert_eq!(identifier.unwrap_err(), ValidationError::InvalidIdentifierLength);
    }

    #[test]
    fn should_not_create_too_long_identifier() {
        let identifier = RecordId::new("a".repeat(256));
        assert_eq!(identifier.unwrap_err(), ValidationError::InvalidIdentifierLength);
    }

    #[test]
    fn should_convert_identifier_from_str() {
        let identifier = RecordId::from_str("p1").unwrap();
        assert_eq!(identifier.as_str(), "p1");
        assert_eq!(identifier, "p1");
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        assert_ne!(RecordId::new("P1").unwrap(), RecordId::new("p1").unwrap());
    }

    #[test]
    fn should_reject_empty_identifier_on_deserialize() {
        assert!(serde_json::from_str::<RecordId>("\"\"").is_err());
        let id: RecordId = serde_json::from_str("\"app1\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"app1\"");
    }
}
