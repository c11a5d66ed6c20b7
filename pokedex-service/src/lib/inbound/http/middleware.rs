use std::sync::Arc;

use auth::AuthorizationError;
use auth::Principal;
use auth::RequestAuthorizer;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiResponseBody;
use crate::inbound::http::handlers::INTERNAL_ERROR_MESSAGE;
use crate::inbound::http::router::AppState;

/// Authenticated user stored in request extensions by [`authorize`].
pub type CurrentUser = Principal<User>;

/// Middleware state: the shared authorizer plus the scopes one route group demands.
#[derive(Clone)]
pub struct Guard {
    authorizer: Arc<RequestAuthorizer<User>>,
    required_scopes: Arc<[String]>,
}

impl Guard {
    pub fn required_scopes(&self) -> &[String] {
        &self.required_scopes
    }
}

/// Guard requiring a valid bearer token that carries every scope in `scopes`.
pub fn require_scopes(state: &AppState, scopes: &[&str]) -> Guard {
    Guard {
        authorizer: Arc::clone(&state.authorizer),
        required_scopes: scopes.iter().map(|s| s.to_string()).collect(),
    }
}

/// Middleware that validates the bearer token and adds the user to request extensions
pub async fn authorize(
    State(guard): State<Guard>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let principal = guard
        .authorizer
        .authorize(authorization, guard.required_scopes())
        .await
        .map_err(|e| rejection(e, guard.required_scopes()))?;

    req.extensions_mut().insert::<CurrentUser>(principal);

    Ok(next.run(req).await)
}

/// Translate a refusal into its client-visible response.
///
/// Missing credentials answer 403, every token, subject or scope problem
/// answers the same 401, and a failing user store answers 500.
pub fn rejection(error: AuthorizationError, required_scopes: &[String]) -> Response {
    let (status, message) = match error {
        AuthorizationError::MissingCredential => (StatusCode::FORBIDDEN, "Not authenticated"),
        AuthorizationError::InvalidScheme => {
            (StatusCode::FORBIDDEN, "Invalid authentication scheme.")
        }
        AuthorizationError::InvalidToken(_) | AuthorizationError::UserNotFound(_) => {
            (StatusCode::UNAUTHORIZED, "Could not validate credentials")
        }
        AuthorizationError::InsufficientScope { .. } => {
            (StatusCode::UNAUTHORIZED, "Not enough permissions")
        }
        AuthorizationError::Lookup(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    };

    let body = Json(ApiResponseBody::new_error(status, message.to_string()));

    if status == StatusCode::UNAUTHORIZED {
        let challenge = auth::bearer_challenge(required_scopes);
        (status, [(header::WWW_AUTHENTICATE, challenge)], body).into_response()
    } else {
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtError;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_credential_is_forbidden_without_challenge() {
        let response = rejection(AuthorizationError::MissingCredential, &[]);

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[tokio::test]
    async fn test_token_failures_share_one_response() {
        let expired = rejection(AuthorizationError::InvalidToken(JwtError::Expired), &[]);
        let forged = rejection(
            AuthorizationError::InvalidToken(JwtError::InvalidSignature),
            &[],
        );

        assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            expired.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert_eq!(body_json(expired).await, body_json(forged).await);
    }

    #[tokio::test]
    async fn test_token_failure_on_scoped_route_lists_scopes() {
        let required = vec!["admin".to_string(), "pokemon:write".to_string()];
        let response = rejection(
            AuthorizationError::InvalidToken(JwtError::Expired),
            &required,
        );

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer scope=\"admin pokemon:write\""
        );
    }

    #[tokio::test]
    async fn test_insufficient_scope_challenge_lists_scopes() {
        let required = vec!["admin".to_string()];
        let response = rejection(
            AuthorizationError::InsufficientScope {
                missing: required.clone(),
            },
            &required,
        );

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer scope=\"admin\""
        );
        assert_eq!(
            body_json(response).await["data"]["message"],
            "Not enough permissions"
        );
    }
}
