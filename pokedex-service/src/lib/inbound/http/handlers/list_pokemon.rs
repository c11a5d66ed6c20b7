use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::get_pokemon::PokemonResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::Page;
use crate::domain::pokemon::models::PageRequest;
use crate::domain::pokemon::models::Pokemon;
use crate::domain::pokemon::models::PokemonSortField;
use crate::domain::pokemon::models::SortOrder;
use crate::domain::pokemon::ports::PokemonServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_pokemon(
    State(state): State<AppState>,
    Query(params): Query<ListPokemonParams>,
) -> Result<ApiSuccess<PokemonPageData>, ApiError> {
    let request = params.try_into_page_request()?;

    state
        .pokemon_service
        .list_pokemon(request)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Query string for listing pokemon (raw)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPokemonParams {
    page: Option<u32>,
    size: Option<u32>,
    sort: Option<String>,
    order: Option<String>,
}

impl ListPokemonParams {
    fn try_into_page_request(self) -> Result<PageRequest, PokemonError> {
        let sort: Option<PokemonSortField> = self.sort.as_deref().map(str::parse).transpose()?;
        let order: Option<SortOrder> = self.order.as_deref().map(str::parse).transpose()?;

        PageRequest::new(
            self.page.unwrap_or(PageRequest::DEFAULT_PAGE),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
            sort.unwrap_or_default(),
            order.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonPageData {
    pub items: Vec<PokemonResponseData>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl From<&Page<Pokemon>> for PokemonPageData {
    fn from(page: &Page<Pokemon>) -> Self {
        Self {
            items: page.items.iter().map(PokemonResponseData::from).collect(),
            page: page.page,
            size: page.size,
            total: page.total,
            total_pages: page.total_pages(),
        }
    }
}
