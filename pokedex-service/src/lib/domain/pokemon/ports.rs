use async_trait::async_trait;

use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::Page;
use crate::domain::pokemon::models::PageRequest;
use crate::domain::pokemon::models::Pokemon;
use crate::domain::pokemon::models::PokemonData;
use crate::domain::pokemon::models::PokemonId;

/// Port for pokemon domain service operations.
#[async_trait]
pub trait PokemonServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `NotFound` - Pokemon does not exist
    async fn get_pokemon(&self, id: PokemonId) -> Result<Pokemon, PokemonError>;

    async fn list_pokemon(&self, request: PageRequest) -> Result<Page<Pokemon>, PokemonError>;

    async fn create_pokemon(&self, data: PokemonData) -> Result<Pokemon, PokemonError>;

    /// Replace every field of an existing pokemon.
    ///
    /// # Errors
    /// * `NotFound` - Pokemon does not exist
    async fn update_pokemon(
        &self,
        id: PokemonId,
        data: PokemonData,
    ) -> Result<Pokemon, PokemonError>;

    /// # Errors
    /// * `NotFound` - Pokemon does not exist
    async fn delete_pokemon(&self, id: PokemonId) -> Result<(), PokemonError>;
}

/// Persistence operations for pokemon.
#[async_trait]
pub trait PokemonRepository: Send + Sync + 'static {
    async fn find_by_id(&self, id: PokemonId) -> Result<Option<Pokemon>, PokemonError>;

    /// Fetch one sorted page.
    async fn list(&self, request: &PageRequest) -> Result<Vec<Pokemon>, PokemonError>;

    async fn count(&self) -> Result<u64, PokemonError>;

    async fn create(&self, data: PokemonData) -> Result<Pokemon, PokemonError>;

    /// # Returns
    /// Updated pokemon, or None if no row has this id
    async fn update(
        &self,
        id: PokemonId,
        data: PokemonData,
    ) -> Result<Option<Pokemon>, PokemonError>;

    /// # Returns
    /// Whether a row was deleted
    async fn delete(&self, id: PokemonId) -> Result<bool, PokemonError>;
}
