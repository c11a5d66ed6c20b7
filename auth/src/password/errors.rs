use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash is not a recognizable PHC string.
    ///
    /// This is a data integrity problem with the stored record, never a
    /// client input error.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
