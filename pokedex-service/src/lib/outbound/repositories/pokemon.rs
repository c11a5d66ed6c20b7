use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::PageRequest;
use crate::domain::pokemon::models::Pokemon;
use crate::domain::pokemon::models::PokemonData;
use crate::domain::pokemon::models::PokemonId;
use crate::domain::pokemon::ports::PokemonRepository;

const POKEMON_COLUMNS: &str = "id, name, type_1, type_2, total, hp, attack, defense, \
                               sp_atk, sp_def, speed, generation, legendary";

pub struct PostgresPokemonRepository {
    pool: PgPool,
}

impl PostgresPokemonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PokemonRow {
    id: i32,
    name: String,
    type_1: Option<String>,
    type_2: Option<String>,
    total: i32,
    hp: i32,
    attack: i32,
    defense: i32,
    sp_atk: i32,
    sp_def: i32,
    speed: i32,
    generation: i32,
    legendary: bool,
}

impl From<PokemonRow> for Pokemon {
    fn from(row: PokemonRow) -> Self {
        Pokemon {
            id: PokemonId(row.id),
            data: PokemonData {
                name: row.name,
                type_1: row.type_1,
                type_2: row.type_2,
                total: row.total,
                hp: row.hp,
                attack: row.attack,
                defense: row.defense,
                sp_atk: row.sp_atk,
                sp_def: row.sp_def,
                speed: row.speed,
                generation: row.generation,
                legendary: row.legendary,
            },
        }
    }
}

fn database_error(e: sqlx::Error) -> PokemonError {
    PokemonError::DatabaseError(e.to_string())
}

#[async_trait]
impl PokemonRepository for PostgresPokemonRepository {
    async fn find_by_id(&self, id: PokemonId) -> Result<Option<Pokemon>, PokemonError> {
        let query = format!("SELECT {} FROM pokemon WHERE id = $1", POKEMON_COLUMNS);

        sqlx::query_as::<_, PokemonRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Pokemon::from))
            .map_err(database_error)
    }

    async fn list(&self, request: &PageRequest) -> Result<Vec<Pokemon>, PokemonError> {
        // ORDER BY cannot be bound; column and keyword come from fixed enum tables.
        let query = format!(
            "SELECT {} FROM pokemon ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2",
            POKEMON_COLUMNS,
            request.sort.column(),
            request.order.keyword(),
        );

        let offset = i64::try_from(request.offset())
            .map_err(|_| PokemonError::InvalidPageRequest("page out of range".to_string()))?;

        let rows = sqlx::query_as::<_, PokemonRow>(&query)
            .bind(i64::from(request.size()))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(rows.into_iter().map(Pokemon::from).collect())
    }

    async fn count(&self) -> Result<u64, PokemonError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pokemon")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(count.max(0) as u64)
    }

    async fn create(&self, data: PokemonData) -> Result<Pokemon, PokemonError> {
        let query = format!(
            r#"
            INSERT INTO pokemon (name, type_1, type_2, total, hp, attack, defense,
                                 sp_atk, sp_def, speed, generation, legendary)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            POKEMON_COLUMNS
        );

        sqlx::query_as::<_, PokemonRow>(&query)
            .bind(&data.name)
            .bind(&data.type_1)
            .bind(&data.type_2)
            .bind(data.total)
            .bind(data.hp)
            .bind(data.attack)
            .bind(data.defense)
            .bind(data.sp_atk)
            .bind(data.sp_def)
            .bind(data.speed)
            .bind(data.generation)
            .bind(data.legendary)
            .fetch_one(&self.pool)
            .await
            .map(Pokemon::from)
            .map_err(database_error)
    }

    async fn update(
        &self,
        id: PokemonId,
        data: PokemonData,
    ) -> Result<Option<Pokemon>, PokemonError> {
        let query = format!(
            r#"
            UPDATE pokemon
            SET name = $2, type_1 = $3, type_2 = $4, total = $5, hp = $6, attack = $7,
                defense = $8, sp_atk = $9, sp_def = $10, speed = $11, generation = $12,
                legendary = $13
            WHERE id = $1
            RETURNING {}
            "#,
            POKEMON_COLUMNS
        );

        sqlx::query_as::<_, PokemonRow>(&query)
            .bind(id.0)
            .bind(&data.name)
            .bind(&data.type_1)
            .bind(&data.type_2)
            .bind(data.total)
            .bind(data.hp)
            .bind(data.attack)
            .bind(data.defense)
            .bind(data.sp_atk)
            .bind(data.sp_def)
            .bind(data.speed)
            .bind(data.generation)
            .bind(data.legendary)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Pokemon::from))
            .map_err(database_error)
    }

    async fn delete(&self, id: PokemonId) -> Result<bool, PokemonError> {
        let result = sqlx::query("DELETE FROM pokemon WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
