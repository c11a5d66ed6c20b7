use async_trait::async_trait;
use mockall::mock;

use crate::lookup::Credentials;
use crate::lookup::LookupError;
use crate::lookup::UserLookup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestUser {
    pub email: String,
    pub password_hash: String,
}

impl TestUser {
    pub fn new(email: &str, password_hash: &str) -> Self {
        Self {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        }
    }
}

impl Credentials for TestUser {
    fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

mock! {
    pub Lookup {}

    #[async_trait]
    impl UserLookup<TestUser> for Lookup {
        async fn lookup_user(&self, identifier: &str) -> Result<Option<TestUser>, LookupError>;
    }
}
