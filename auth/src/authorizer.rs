use std::sync::Arc;

use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::lookup::LookupError;
use crate::lookup::UserLookup;

/// Authentication scheme accepted in the `Authorization` header. Case-sensitive.
pub const BEARER_SCHEME: &str = "Bearer";

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal<U> {
    pub user: U,
    pub claims: Claims,
}

/// Reasons a request is refused by [`RequestAuthorizer`].
///
/// Variants differ for logging. Clients only ever see a generic message per
/// HTTP status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Missing or malformed Authorization header")]
    MissingCredential,

    #[error("Invalid authentication scheme")]
    InvalidScheme,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),

    #[error("User not found for subject: {0}")]
    UserNotFound(String),

    #[error("Not enough permissions, missing scopes: {}", .missing.join(" "))]
    InsufficientScope { missing: Vec<String> },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl AuthorizationError {
    /// Short stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthorizationError::MissingCredential => "missing_credential",
            AuthorizationError::InvalidScheme => "invalid_scheme",
            AuthorizationError::InvalidToken(_) => "invalid_token",
            AuthorizationError::UserNotFound(_) => "user_not_found",
            AuthorizationError::InsufficientScope { .. } => "insufficient_scope",
            AuthorizationError::Lookup(_) => "lookup_failed",
        }
    }
}

/// Guard for protected routes.
///
/// Extracts the bearer token, verifies it, resolves its subject through the
/// lookup collaborator and checks the route's required scopes. The lookup is
/// only consulted once the token has verified.
pub struct RequestAuthorizer<U> {
    lookup: Arc<dyn UserLookup<U>>,
    jwt_handler: Arc<JwtHandler>,
}

impl<U> RequestAuthorizer<U>
where
    U: Send + Sync + 'static,
{
    pub fn new(lookup: Arc<dyn UserLookup<U>>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            lookup,
            jwt_handler,
        }
    }

    /// Authorize a request from its raw `Authorization` header value.
    ///
    /// # Arguments
    /// * `authorization` - Header value, `None` when absent or not valid UTF-8
    /// * `required_scopes` - Scopes the route demands, all of which must be granted
    ///
    /// # Errors
    /// * `MissingCredential` - No header, or no credential after the scheme
    /// * `InvalidScheme` - Scheme is not exactly `Bearer`
    /// * `InvalidToken` - Token failed verification
    /// * `UserNotFound` - Token subject has no user
    /// * `InsufficientScope` - A required scope is missing from the token
    /// * `Lookup` - The user store failed
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        required_scopes: &[String],
    ) -> Result<Principal<U>, AuthorizationError> {
        let result = self.resolve(authorization, required_scopes).await;

        if let Err(error) = &result {
            log_rejection(error);
        }

        result
    }

    async fn resolve(
        &self,
        authorization: Option<&str>,
        required_scopes: &[String],
    ) -> Result<Principal<U>, AuthorizationError> {
        let token = extract_bearer_token(authorization)?;
        let claims = self.jwt_handler.decode(token)?;

        let user = self
            .lookup
            .lookup_user(&claims.sub)
            .await?
            .ok_or_else(|| AuthorizationError::UserNotFound(claims.sub.clone()))?;

        let missing = claims.missing_scopes(required_scopes);
        if !missing.is_empty() {
            return Err(AuthorizationError::InsufficientScope {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }

        Ok(Principal { user, claims })
    }
}

fn log_rejection(error: &AuthorizationError) {
    match error {
        AuthorizationError::MissingCredential | AuthorizationError::InvalidScheme => {
            tracing::debug!(kind = error.kind(), "Request rejected: {}", error);
        }
        AuthorizationError::InvalidToken(jwt_error) => {
            tracing::warn!(
                kind = error.kind(),
                reason = jwt_error.reason(),
                "Token verification failed: {}",
                jwt_error
            );
        }
        AuthorizationError::UserNotFound(subject) => {
            tracing::warn!(kind = error.kind(), subject = %subject, "User not found for subject");
        }
        AuthorizationError::InsufficientScope { missing } => {
            tracing::warn!(kind = error.kind(), missing = ?missing, "Not enough permissions");
        }
        AuthorizationError::Lookup(lookup_error) => {
            tracing::error!(kind = error.kind(), error = %lookup_error, "User lookup failed");
        }
    }
}

/// Split an `Authorization` header value into its bearer credential.
///
/// # Errors
/// * `MissingCredential` - Header absent, empty, or without a credential part
/// * `InvalidScheme` - Scheme is anything other than `Bearer`
pub fn extract_bearer_token(authorization: Option<&str>) -> Result<&str, AuthorizationError> {
    let (scheme, credentials) = authorization
        .and_then(|value| value.split_once(' '))
        .ok_or(AuthorizationError::MissingCredential)?;

    let credentials = credentials.trim();
    if scheme.is_empty() || credentials.is_empty() {
        return Err(AuthorizationError::MissingCredential);
    }

    if scheme != BEARER_SCHEME {
        return Err(AuthorizationError::InvalidScheme);
    }

    Ok(credentials)
}

/// `WWW-Authenticate` challenge for a route's required scopes.
pub fn bearer_challenge(required_scopes: &[String]) -> String {
    if required_scopes.is_empty() {
        BEARER_SCHEME.to_string()
    } else {
        format!("{} scope=\"{}\"", BEARER_SCHEME, required_scopes.join(" "))
    }
}
