use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::EmptyData;
use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::PokemonId;
use crate::domain::pokemon::ports::PokemonServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_pokemon(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiSuccess<EmptyData>, ApiError> {
    state
        .pokemon_service
        .delete_pokemon(PokemonId(id))
        .await
        .map_err(|e| match e {
            PokemonError::NotFound(_) => ApiError::NotFound("No pokemon found to delete".to_string()),
            _ => ApiError::from(e),
        })
        .map(|_| ApiSuccess::new(StatusCode::OK, EmptyData {}))
}
