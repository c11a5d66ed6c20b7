use thiserror::Error;

use crate::domain::pokemon::models::PokemonId;

/// Top-level error for all pokemon operations
#[derive(Debug, Clone, Error)]
pub enum PokemonError {
    #[error("No pokemon found with id {0}")]
    NotFound(PokemonId),

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("Cannot sort by '{0}'")]
    InvalidSortField(String),

    #[error("Invalid sort order '{0}', expected 'asc' or 'desc'")]
    InvalidSortOrder(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
