use std::sync::Arc;

use crate::lookup::normalize_identifier;
use crate::lookup::Credentials;
use crate::lookup::LookupError;
use crate::lookup::UserLookup;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Argon2id hash of a random password nobody knows. Verified on the
/// unknown-identifier path so both rejections cost one hash computation.
const UNKNOWN_USER_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$\
    c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Verifies login attempts against the user store.
///
/// An unknown identifier and a wrong password are both a normal `Ok(None)`
/// outcome. Both run one password verification, so neither response nor
/// timing tells them apart.
pub struct Authenticator<U> {
    lookup: Arc<dyn UserLookup<U>>,
    password_hasher: PasswordHasher,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The stored hash for this user cannot be parsed. Treat the record as corrupted.
    #[error("Stored password hash is corrupted for {identifier}: {source}")]
    CorruptedHash {
        identifier: String,
        source: PasswordError,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl<U> Authenticator<U>
where
    U: Credentials + Send + Sync + 'static,
{
    pub fn new(lookup: Arc<dyn UserLookup<U>>) -> Self {
        Self {
            lookup,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Check an identifier and plaintext password.
    ///
    /// # Returns
    /// The user when it exists and the password matches, `None` otherwise
    ///
    /// # Errors
    /// * `CorruptedHash` - The user's stored hash is not a recognizable hash
    /// * `Lookup` - The user store failed
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Option<U>, AuthenticationError> {
        let identifier = normalize_identifier(identifier);

        let Some(user) = self.lookup.lookup_user(&identifier).await? else {
            let _ = self
                .password_hasher
                .verify(password, UNKNOWN_USER_PASSWORD_HASH);
            tracing::debug!(identifier = %identifier, "Login for unknown identifier");
            return Ok(None);
        };

        match self.password_hasher.verify(password, user.password_hash()) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => {
                tracing::debug!(identifier = %identifier, "Login with wrong password");
                Ok(None)
            }
            Err(source) => {
                tracing::error!(
                    identifier = %identifier,
                    error = %source,
                    "Stored password hash is corrupted"
                );
                Err(AuthenticationError::CorruptedHash { identifier, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::testing::MockLookup;
    use crate::testing::TestUser;

    fn stored_user(password: &str) -> TestUser {
        let hash = PasswordHasher::new().hash(password).unwrap();
        TestUser::new("ash@pallet.town", &hash)
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let user = stored_user("Pikachu123");
        let expected = user.clone();

        let mut lookup = MockLookup::new();
        lookup
            .expect_lookup_user()
            .with(eq("ash@pallet.town"))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = Authenticator::<TestUser>::new(Arc::new(lookup));
        let result = authenticator
            .authenticate("Ash@Pallet.Town", "Pikachu123")
            .await
            .expect("Authentication failed");

        assert_eq!(result, Some(expected));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_password() {
        let user = stored_user("Pikachu123");

        let mut lookup = MockLookup::new();
        lookup
            .expect_lookup_user()
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = Authenticator::<TestUser>::new(Arc::new(lookup));
        let result = authenticator
            .authenticate("ash@pallet.town", "wrong_password")
            .await;

        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut lookup = MockLookup::new();
        lookup.expect_lookup_user().returning(|_| Ok(None));

        let authenticator = Authenticator::<TestUser>::new(Arc::new(lookup));
        let result = authenticator.authenticate("misty@cerulean.city", "x").await;

        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_unknown_user_hash_is_verifiable() {
        let hasher = PasswordHasher::new();

        assert_eq!(hasher.verify("", UNKNOWN_USER_PASSWORD_HASH), Ok(false));
        assert_eq!(
            hasher.verify("Pikachu123", UNKNOWN_USER_PASSWORD_HASH),
            Ok(false)
        );
    }

    #[tokio::test]
    async fn test_authenticate_corrupted_hash() {
        let mut lookup = MockLookup::new();
        lookup
            .expect_lookup_user()
            .returning(|_| Ok(Some(TestUser::new("ash@pallet.town", "not-a-hash"))));

        let authenticator = Authenticator::<TestUser>::new(Arc::new(lookup));
        let result = authenticator.authenticate("ash@pallet.town", "x").await;

        assert!(matches!(
            result,
            Err(AuthenticationError::CorruptedHash { ref identifier, .. }) if identifier == "ash@pallet.town"
        ));
    }

    #[tokio::test]
    async fn test_authenticate_lookup_failure() {
        let mut lookup = MockLookup::new();
        lookup
            .expect_lookup_user()
            .returning(|_| Err(LookupError("connection refused".to_string())));

        let authenticator = Authenticator::<TestUser>::new(Arc::new(lookup));
        let result = authenticator.authenticate("ash@pallet.town", "x").await;

        assert!(matches!(result, Err(AuthenticationError::Lookup(_))));
    }
}
