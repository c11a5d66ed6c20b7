use auth::JwtError;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::INTERNAL_ERROR_MESSAGE;
use crate::inbound::http::router::AppState;

/// Exchange a still-valid token for a fresh access token.
///
/// Accepts access tokens as well as refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<AccessTokenBody>,
) -> Result<Json<AccessTokenBody>, ApiError> {
    let access_token = state
        .session_issuer
        .refresh(&body.access_token)
        .map_err(|e| match e {
            JwtError::EncodingFailed(_) | JwtError::UnsupportedAlgorithm(_) => {
                tracing::error!(error = %e, "Token issuance failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
            _ => {
                tracing::warn!(reason = e.reason(), "Refresh rejected: {}", e);
                ApiError::Unauthorized("Could not validate client".to_string())
            }
        })?;

    Ok(Json(AccessTokenBody { access_token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenBody {
    pub access_token: String,
}
