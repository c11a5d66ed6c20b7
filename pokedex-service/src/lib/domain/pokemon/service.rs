use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::Page;
use crate::domain::pokemon::models::PageRequest;
use crate::domain::pokemon::models::Pokemon;
use crate::domain::pokemon::models::PokemonData;
use crate::domain::pokemon::models::PokemonId;
use crate::domain::pokemon::ports::PokemonRepository;
use crate::domain::pokemon::ports::PokemonServicePort;

/// Domain service implementation for pokemon operations.
pub struct PokemonService<PR>
where
    PR: PokemonRepository,
{
    repository: Arc<PR>,
}

impl<PR> PokemonService<PR>
where
    PR: PokemonRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PokemonServicePort for PokemonService<PR>
where
    PR: PokemonRepository,
{
    async fn get_pokemon(&self, id: PokemonId) -> Result<Pokemon, PokemonError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PokemonError::NotFound(id))
    }

    async fn list_pokemon(&self, request: PageRequest) -> Result<Page<Pokemon>, PokemonError> {
        let items = self.repository.list(&request).await?;
        let total = self.repository.count().await?;

        Ok(Page {
            items,
            page: request.page(),
            size: request.size(),
            total,
        })
    }

    async fn create_pokemon(&self, data: PokemonData) -> Result<Pokemon, PokemonError> {
        let pokemon = self.repository.create(data).await?;
        tracing::info!(pokemon_id = %pokemon.id, name = %pokemon.data.name, "Pokemon created");

        Ok(pokemon)
    }

    async fn update_pokemon(
        &self,
        id: PokemonId,
        data: PokemonData,
    ) -> Result<Pokemon, PokemonError> {
        let pokemon = self
            .repository
            .update(id, data)
            .await?
            .ok_or(PokemonError::NotFound(id))?;
        tracing::info!(pokemon_id = %id, "Pokemon updated");

        Ok(pokemon)
    }

    async fn delete_pokemon(&self, id: PokemonId) -> Result<(), PokemonError> {
        if !self.repository.delete(id).await? {
            return Err(PokemonError::NotFound(id));
        }
        tracing::info!(pokemon_id = %id, "Pokemon deleted");

        Ok(())
    }
}
