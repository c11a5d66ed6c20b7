use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::pokemon::errors::PokemonError;
use crate::user::errors::UserError;

pub mod create_pokemon;
pub mod delete_pokemon;
pub mod get_pokemon;
pub mod get_user_by_email;
pub mod list_pokemon;
pub mod login;
pub mod me;
pub mod refresh;
pub mod update_pokemon;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    /// Answered with `WWW-Authenticate: Bearer`
    Unauthorized(String),
}

/// Message returned for any 500, so internals never reach the client.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, auth::authorizer::BEARER_SCHEME)],
                    Json(ApiResponseBody::new_error(StatusCode::UNAUTHORIZED, msg)),
                )
                    .into_response();
            }
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFoundByEmail(_) => ApiError::NotFound("No user found".to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidEmail(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) => {
                tracing::error!(error = %err, "User operation failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<PokemonError> for ApiError {
    fn from(err: PokemonError) -> Self {
        match err {
            PokemonError::NotFound(_) => ApiError::NotFound("No pokemon found".to_string()),
            PokemonError::InvalidPageRequest(_)
            | PokemonError::InvalidSortField(_)
            | PokemonError::InvalidSortOrder(_) => ApiError::UnprocessableEntity(err.to_string()),
            PokemonError::DatabaseError(_) => {
                tracing::error!(error = %err, "Pokemon operation failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Body of update/delete responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyData {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::models::PokemonId;
    use crate::user::errors::EmailError;

    fn status_of(error: ApiError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_user_errors_map_to_status() {
        let cases = [
            (
                UserError::InvalidEmail(EmailError::InvalidFormat("x".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                UserError::Password(auth::PasswordError::HashingFailed("x".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserError::NotFoundByEmail("a@b.com".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                UserError::EmailAlreadyExists("a@b.com".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                UserError::DatabaseError("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(status_of(error.into()), status);
        }
    }

    #[test]
    fn test_pokemon_errors_map_to_status() {
        let cases = [
            (PokemonError::NotFound(PokemonId(1)), StatusCode::NOT_FOUND),
            (
                PokemonError::InvalidPageRequest("x".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                PokemonError::InvalidSortField("x".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                PokemonError::InvalidSortOrder("x".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                PokemonError::DatabaseError("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(status_of(error.into()), status);
        }
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let response = ApiError::from(UserError::DatabaseError("password=hunter2".to_string()));

        assert_eq!(
            response,
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );
    }
}
