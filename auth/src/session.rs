use std::sync::Arc;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenType;

pub const DEFAULT_ACCESS_TOKEN_LIFETIME_MINUTES: i64 = 120;
pub const DEFAULT_REFRESH_TOKEN_LIFETIME_DAYS: i64 = 30;

/// Access and refresh token pair returned on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Builds access and refresh token claims and signs them.
#[derive(Debug)]
pub struct SessionIssuer {
    jwt_handler: Arc<JwtHandler>,
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
}

impl SessionIssuer {
    /// Create an issuer with the default lifetimes (120 minutes / 30 days).
    pub fn new(jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            jwt_handler,
            access_token_lifetime: Duration::minutes(DEFAULT_ACCESS_TOKEN_LIFETIME_MINUTES),
            refresh_token_lifetime: Duration::days(DEFAULT_REFRESH_TOKEN_LIFETIME_DAYS),
        }
    }

    pub fn with_access_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.access_token_lifetime = lifetime;
        self
    }

    pub fn with_refresh_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.refresh_token_lifetime = lifetime;
        self
    }

    pub fn jwt_handler(&self) -> &Arc<JwtHandler> {
        &self.jwt_handler
    }

    /// Issue an access token for `subject` carrying `scopes`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed, or the configured lifetime is not
    ///   positive or reaches past the representable time range
    pub fn issue_access_token<I, S>(&self, subject: &str, scopes: I) -> Result<String, JwtError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let claims =
            Claims::new(TokenType::Access, subject, self.access_token_lifetime)?.with_scopes(scopes);

        self.jwt_handler.encode(&claims)
    }

    /// Issue a refresh token for `subject`. Refresh tokens never carry scopes.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed, or the configured lifetime is not
    ///   positive or reaches past the representable time range
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::new(TokenType::Refresh, subject, self.refresh_token_lifetime)?;

        self.jwt_handler.encode(&claims)
    }

    /// Issue the login pair: a scoped access token and an unscoped refresh token.
    pub fn issue_pair<I, S>(&self, subject: &str, scopes: I) -> Result<TokenPair, JwtError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(TokenPair {
            access_token: self.issue_access_token(subject, scopes)?,
            refresh_token: self.issue_refresh_token(subject)?,
        })
    }

    /// Mint a new unscoped access token from a presented token.
    ///
    /// Any valid, unexpired token is accepted regardless of its type, so an
    /// access token can be exchanged for a fresh access token. The new token
    /// does not inherit the presented token's scopes.
    ///
    /// # Errors
    /// * Any `JwtError` from verifying `token`, or from signing the new one
    pub fn refresh(&self, token: &str) -> Result<String, JwtError> {
        let claims = self.jwt_handler.decode(token)?;

        if claims.token_type == TokenType::Access {
            tracing::debug!(subject = %claims.sub, "Refreshing from an access token");
        }

        self.issue_access_token(&claims.sub, std::iter::empty::<String>())
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
