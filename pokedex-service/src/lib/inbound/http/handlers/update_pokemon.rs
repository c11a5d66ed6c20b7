use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::create_pokemon::PokemonRequestBody;
use super::ApiError;
use super::ApiSuccess;
use super::EmptyData;
use crate::domain::pokemon::models::PokemonId;
use crate::domain::pokemon::ports::PokemonServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_pokemon(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<PokemonRequestBody>,
) -> Result<ApiSuccess<EmptyData>, ApiError> {
    state
        .pokemon_service
        .update_pokemon(PokemonId(id), body.into())
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, EmptyData {}))
}
