use std::collections::BTreeSet;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Distinguishes access tokens from refresh tokens.
///
/// Serialized under the `type` key as `access_token` / `refresh_token`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenType {
    #[serde(rename = "access_token")]
    Access,
    #[serde(rename = "refresh_token")]
    Refresh,
}

/// Claims payload carried by every issued token.
///
/// Timestamps are Unix seconds. `scopes` is a set: order on the wire is
/// irrelevant and duplicates collapse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Subject (the user's identifier)
    pub sub: String,

    #[serde(default)]
    pub scopes: BTreeSet<String>,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims issued now and valid for `lifetime`.
    ///
    /// # Errors
    /// * `EncodingFailed` - The expiration falls outside the representable time range
    pub fn new(
        token_type: TokenType,
        subject: impl ToString,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        Self::issued_at(token_type, subject, Utc::now(), lifetime)
    }

    /// Create claims with an explicit issue time.
    ///
    /// # Errors
    /// * `EncodingFailed` - The expiration falls outside the representable time range
    pub fn issued_at(
        token_type: TokenType,
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::EncodingFailed("token lifetime is out of range".to_string())
        })?;

        Ok(Self {
            token_type,
            sub: subject.to_string(),
            scopes: BTreeSet::new(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Replace the scope set.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Required scopes this token does not carry, in the order given.
    pub fn missing_scopes<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .map(String::as_str)
            .filter(|scope| !self.has_scope(scope))
            .collect()
    }

    /// A token is expired from its `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
