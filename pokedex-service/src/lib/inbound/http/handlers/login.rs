use auth::AuthenticationError;
use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::INTERNAL_ERROR_MESSAGE;
use crate::inbound::http::router::AppState;

/// `token_type` value returned with every token pair.
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .authenticator
        .authenticate(&form.username, &form.password)
        .await
        .map_err(|e| {
            // Corrupted hashes are already logged by the authenticator.
            if let AuthenticationError::Lookup(ref lookup_error) = e {
                tracing::error!(error = %lookup_error, "User lookup failed during login");
            }
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        })?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect username or password".to_string()))?;

    let pair = state
        .session_issuer
        .issue_pair(user.email.as_str(), user.scopes.iter().cloned())
        .map_err(|e| {
            tracing::error!(error = %e, "Token issuance failed");
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
    }))
}

/// OAuth2 password-flow form. Extra fields such as `grant_type` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}
