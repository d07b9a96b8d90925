// models/src/errors.rs

use std::io;
pub use thiserror::Error;

/// User-visible message for an email that matches no account.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
/// User-visible message for an account whose role record is missing.
pub const USER_DETAILS_NOT_FOUND_MESSAGE: &str = "User details not found";

#[derive(Debug, Error)]
pub enum CareError {
    /// No account matches the supplied credentials. Recoverable by retry.
    #[error("{0}")]
    Authentication(String),
    /// The account exists but its role-specific record does not.
    #[error("{0}")]
    Integrity(String),
    /// The persisted session record could not be decoded.
    #[error("Persisted session state is corrupt: {0}")]
    PersistedStateCorrupt(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[cfg(feature = "sled-errors")]
    #[error(transparent)]
    Sled(#[from] sled::Error),
}

impl CareError {
    /// The error raised when an email matches no known user.
    pub fn invalid_credentials() -> Self {
        CareError::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string())
    }

    /// The error raised when a user's role record cannot be resolved.
    pub fn user_details_not_found() -> Self {
        CareError::Integrity(USER_DETAILS_NOT_FOUND_MESSAGE.to_string())
    }
}

impl From<serde_json::Error> for CareError {
    fn from(err: serde_json::Error) -> Self {
        CareError::Serialization(format!("JSON processing error: {}", err))
    }
}

/// A validation error raised while constructing domain values.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    /// Record identifiers must be between 1 and 255 bytes.
    #[error("identifier has invalid length")]
    InvalidIdentifierLength,
    /// A value was not one of the accepted spellings.
    #[error("invalid value provided: {0}")]
    InvalidValue(String),
    /// Two entities in one collection share an identifier.
    #[error("duplicate identifier '{1}' in {0}")]
    DuplicateIdentifier(&'static str, String),
    #[error("invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// A type alias for a `Result` that returns a `CareError` on failure.
pub type CareResult<T> = Result<T, CareError>;

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
