// models/src/medical/login.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CareError, CareResult};

/// Email/password pair submitted to the login flow.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String, // Plaintext password for the login attempt
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields must be non-blank before a lookup is attempted.
    pub fn validate(&self) -> CareResult<()> {
        if self.email.trim().is_empty() {
            return Err(CareError::InvalidInput("Email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(CareError::InvalidInput("Password is required".to_string()));
        }
        Ok(())
    }
}

// Never print the password, not even in debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_email() {
        let err = Credentials::new("  ", "secret").validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Email is required");
    }

    #[test]
    fn rejects_empty_password() {
        assert!(Credentials::new("john@example.com", "").validate().is_err());
        assert!(Credentials::new("john@example.com", "x").validate().is_ok());
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("a@b.c", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
