use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::pokemon::models::Pokemon;
use crate::domain::pokemon::models::PokemonId;
use crate::domain::pokemon::ports::PokemonServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiSuccess<PokemonResponseData>, ApiError> {
    state
        .pokemon_service
        .get_pokemon(PokemonId(id))
        .await
        .map_err(ApiError::from)
        .map(|ref pokemon| ApiSuccess::new(StatusCode::OK, pokemon.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonResponseData {
    pub id: i32,
    pub name: String,
    pub type_1: Option<String>,
    pub type_2: Option<String>,
    pub total: i32,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub sp_atk: i32,
    pub sp_def: i32,
    pub speed: i32,
    pub generation: i32,
    pub legendary: bool,
}

impl From<&Pokemon> for PokemonResponseData {
    fn from(pokemon: &Pokemon) -> Self {
        let data = &pokemon.data;
        Self {
            id: pokemon.id.0,
            name: data.name.clone(),
            type_1: data.type_1.clone(),
            type_2: data.type_2.clone(),
            total: data.total,
            hp: data.hp,
            attack: data.attack,
            defense: data.defense,
            sp_atk: data.sp_atk,
            sp_def: data.sp_def,
            speed: data.speed,
            generation: data.generation,
            legendary: data.legendary,
        }
    }
}
