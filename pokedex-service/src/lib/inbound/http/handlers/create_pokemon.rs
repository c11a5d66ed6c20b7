use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_pokemon::PokemonResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::pokemon::models::PokemonData;
use crate::domain::pokemon::ports::PokemonServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_pokemon(
    State(state): State<AppState>,
    Json(body): Json<PokemonRequestBody>,
) -> Result<ApiSuccess<PokemonResponseData>, ApiError> {
    state
        .pokemon_service
        .create_pokemon(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref pokemon| ApiSuccess::new(StatusCode::OK, pokemon.into()))
}

/// HTTP request body for creating or replacing a pokemon (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonRequestBody {
    name: String,
    #[serde(default)]
    type_1: Option<String>,
    #[serde(default)]
    type_2: Option<String>,
    total: i32,
    hp: i32,
    attack: i32,
    defense: i32,
    sp_atk: i32,
    sp_def: i32,
    speed: i32,
    generation: i32,
    #[serde(default)]
    legendary: bool,
}

impl From<PokemonRequestBody> for PokemonData {
    fn from(body: PokemonRequestBody) -> Self {
        Self {
            name: body.name,
            type_1: body.type_1,
            type_2: body.type_2,
            total: body.total,
            hp: body.hp,
            attack: body.attack,
            defense: body.defense,
            sp_atk: body.sp_atk,
            sp_def: body.sp_def,
            speed: body.speed,
            generation: body.generation,
            legendary: body.legendary,
        }
    }
}
