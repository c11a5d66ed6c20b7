use std::fmt;
use std::str::FromStr;

use crate::user::errors::EmailError;

/// Registered user.
///
/// The email is the login identifier and the token subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
    /// Scopes granted to every access token issued to this user
    pub scopes: Vec<String>,
}

impl auth::Credentials for User {
    fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser and stored lower-cased, so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, lower-cased email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = auth::lookup::normalize_identifier(email.as_ref());

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub scopes: Vec<String>,
}

impl CreateUserCommand {
    /// Construct a command for a user without profile names or scopes.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, password: impl Into<String>) -> Self {
        Self {
            email,
            password: password.into(),
            first_name: None,
            last_name: None,
            scopes: Vec::new(),
        }
    }

    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_case_folded() {
        let email = EmailAddress::new("John.Doe@Petal.com").unwrap();
        assert_eq!(email.as_str(), "john.doe@petal.com");
    }

    #[test]
    fn test_email_rejects_invalid_format() {
        assert!(matches!(
            EmailAddress::new("not-an-email"),
            Err(EmailError::InvalidFormat(_))
        ));
    }
}
