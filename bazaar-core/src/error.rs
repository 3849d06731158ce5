//! Error types and result types for record store operations.
//!
//! Store backends fail with [`StoreError::NotFound`] or
//! [`StoreError::AlreadyExists`], and with [`StoreError::Exhausted`] only if a
//! collection runs out of identifiers. These are logical outcomes rather than
//! environmental faults, so callers should map them to their own outward-facing
//! codes and never retry them. Use [`StoreResult<T>`] as the return type for
//! fallible operations.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No live record matched the lookup.
    ///
    /// `resource` is the record kind (e.g. `"User"`), `key` is the identifier or
    /// email that was looked up.
    #[error("{resource} {key} not found")]
    NotFound {
        resource: &'static str,
        key: String,
    },
    /// A live user already owns this email.
    #[error("User with email {email} already exists")]
    AlreadyExists { email: String },
    /// The collection has handed out every identifier it can represent.
    #[error("{resource} identifiers exhausted")]
    Exhausted { resource: &'static str },
    /// A record was rejected by a marketplace rule before reaching the store.
    #[error("Invalid record: {0}")]
    Invalid(String),
    /// The email and password hash pair matched no user.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Serialization/deserialization error when converting records to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Builds a [`StoreError::NotFound`] for the given resource and lookup key.
    pub fn not_found(resource: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    /// Builds a [`StoreError::AlreadyExists`] for the given email.
    pub fn already_exists(email: impl Into<String>) -> Self {
        StoreError::AlreadyExists {
            email: email.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, StoreError::Invalid(_))
    }
}

/// A specialized `Result` type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_resource_and_key() {
        let err = StoreError::not_found("Listing", 7);
        assert_eq!(err.to_string(), "Listing 7 not found");
        assert!(err.is_not_found());
        assert!(!err.is_already_exists());
    }

    #[test]
    fn already_exists_message_names_email() {
        let err = StoreError::already_exists("a@x.com");
        assert_eq!(err.to_string(), "User with email a@x.com already exists");
        assert!(err.is_already_exists());
    }

    #[test]
    fn exhausted_and_credential_messages() {
        assert_eq!(
            StoreError::Exhausted { resource: "Order" }.to_string(),
            "Order identifiers exhausted"
        );
        assert_eq!(StoreError::InvalidCredentials.to_string(), "Invalid credentials");
        assert!(StoreError::Invalid("x".to_string()).is_invalid());
        assert!(!StoreError::InvalidCredentials.is_invalid());
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let err: StoreError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
