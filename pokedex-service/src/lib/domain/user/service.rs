use std::sync::Arc;

use async_trait::async_trait;
use auth::LookupError;
use auth::UserLookup;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Also serves as the authentication core's user lookup collaborator.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId(0),
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash,
            scopes: command.scopes,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, email = %created_user.email, "User created");

        Ok(created_user)
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }
}

#[async_trait]
impl<UR> UserLookup<User> for UserService<UR>
where
    UR: UserRepository,
{
    async fn lookup_user(&self, identifier: &str) -> Result<Option<User>, LookupError> {
        // An identifier that is not an email cannot belong to any user.
        let Ok(email) = EmailAddress::new(identifier) else {
            return Ok(None);
        };

        self.repository
            .find_by_email(&email)
            .await
            .map_err(|e| LookupError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        }
    }

    fn stored_user(email: &str) -> User {
        User {
            id: UserId(7),
            email: EmailAddress::new(email).unwrap(),
            first_name: None,
            last_name: None,
            password_hash: "$argon2id$stored".to_string(),
            scopes: vec!["me".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "ash@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.scopes == vec!["me".to_string()]
            })
            .times(1)
            .returning(|mut user| {
                user.id = UserId(1);
                Ok(user)
            });

        let service = UserService::new(Arc::new(repository));
        let command = CreateUserCommand::new(EmailAddress::new("Ash@Example.com").unwrap(), "pikachu")
            .with_scopes(["me"]);

        let user = service.create_user(command).await.unwrap();

        assert_eq!(user.id, UserId(1));
        assert_ne!(user.password_hash, "pikachu");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.to_string())));

        let service = UserService::new(Arc::new(repository));
        let command = CreateUserCommand::new(EmailAddress::new("ash@example.com").unwrap(), "x");

        let result = service.create_user(command).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_user_by_email_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));
        let email = EmailAddress::new("misty@example.com").unwrap();

        let result = service.get_user_by_email(&email).await;

        assert!(matches!(result, Err(UserError::NotFoundByEmail(_))));
    }

    #[tokio::test]
    async fn test_lookup_user_case_folds_identifier() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .with(eq(EmailAddress::new("ash@example.com").unwrap()))
            .times(1)
            .returning(|email| Ok(Some(stored_user(email.as_str()))));

        let service = UserService::new(Arc::new(repository));

        let user = service.lookup_user("ASH@example.com").await.unwrap();

        assert_eq!(user.map(|u| u.id), Some(UserId(7)));
    }

    #[tokio::test]
    async fn test_lookup_user_with_non_email_skips_store() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);

        let service = UserService::new(Arc::new(repository));

        assert_eq!(service.lookup_user("not-an-email").await, Ok(None));
    }

    #[tokio::test]
    async fn test_lookup_user_maps_store_failure() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = UserService::new(Arc::new(repository));

        let result = service.lookup_user("ash@example.com").await;

        assert!(matches!(result, Err(LookupError(ref message)) if message.contains("connection reset")));
    }
}
