use async_trait::async_trait;
use thiserror::Error;

/// Read access to a user's stored credentials.
pub trait Credentials {
    /// Stored PHC password hash.
    fn password_hash(&self) -> &str;
}

/// Failure of the backing user store, not an absent user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("User lookup failed: {0}")]
pub struct LookupError(pub String);

/// User lookup capability consumed by the authentication core.
///
/// Implemented by the owning service over its user store. A lookup must see
/// the most recent committed write for the identifier.
#[async_trait]
pub trait UserLookup<U>: Send + Sync + 'static {
    /// Find a user by case-folded identifier.
    ///
    /// # Returns
    /// `Ok(None)` when no user has this identifier
    ///
    /// # Errors
    /// * `LookupError` - The store could not be queried
    async fn lookup_user(&self, identifier: &str) -> Result<Option<U>, LookupError>;
}

/// Case-fold an identifier the way the user store keys it.
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.to_lowercase()
}
