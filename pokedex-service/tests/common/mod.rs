#![allow(dead_code)]

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::atomic::AtomicI32;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use auth::JwtHandler;
use auth::SessionIssuer;
use axum::Router;
use pokedex_service::domain::pokemon::errors::PokemonError;
use pokedex_service::domain::pokemon::models::PageRequest;
use pokedex_service::domain::pokemon::models::Pokemon;
use pokedex_service::domain::pokemon::models::PokemonData;
use pokedex_service::domain::pokemon::models::PokemonId;
use pokedex_service::domain::pokemon::ports::PokemonRepository;
use pokedex_service::domain::pokemon::service::PokemonService;
use pokedex_service::domain::user::models::CreateUserCommand;
use pokedex_service::domain::user::models::EmailAddress;
use pokedex_service::domain::user::models::User;
use pokedex_service::domain::user::models::UserId;
use pokedex_service::domain::user::ports::UserRepository;
use pokedex_service::domain::user::ports::UserServicePort;
use pokedex_service::domain::user::service::UserService;
use pokedex_service::inbound::http::router::create_router;
use pokedex_service::inbound::http::router::AppState;
use pokedex_service::user::errors::UserError;
use tokio::sync::RwLock;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User store that counts lookups so tests can assert when none happen.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
    next_id: AtomicI32,
    email_lookups: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn email_lookups(&self) -> usize {
        self.email_lookups.load(Ordering::SeqCst)
    }

    /// Overwrite a stored hash, bypassing the service.
    pub async fn corrupt_password_hash(&self, email: &str) {
        if let Some(user) = self.users.write().await.get_mut(email) {
            user.password_hash = "not-a-phc-string".to_string();
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        user.id = UserId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        users.insert(user.email.to_string(), user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        self.email_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.read().await.get(email.as_str()).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPokemonRepository {
    pokemon: RwLock<BTreeMap<PokemonId, Pokemon>>,
    next_id: AtomicI32,
}

#[async_trait]
impl PokemonRepository for InMemoryPokemonRepository {
    async fn find_by_id(&self, id: PokemonId) -> Result<Option<Pokemon>, PokemonError> {
        Ok(self.pokemon.read().await.get(&id).cloned())
    }

    async fn list(&self, request: &PageRequest) -> Result<Vec<Pokemon>, PokemonError> {
        let mut items: Vec<Pokemon> = self.pokemon.read().await.values().cloned().collect();
        request.sort_items(&mut items);

        Ok(items
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size() as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64, PokemonError> {
        Ok(self.pokemon.read().await.len() as u64)
    }

    async fn create(&self, data: PokemonData) -> Result<Pokemon, PokemonError> {
        let id = PokemonId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let pokemon = Pokemon { id, data };
        self.pokemon.write().await.insert(id, pokemon.clone());

        Ok(pokemon)
    }

    async fn update(
        &self,
        id: PokemonId,
        data: PokemonData,
    ) -> Result<Option<Pokemon>, PokemonError> {
        let mut pokemon = self.pokemon.write().await;
        Ok(pokemon.get_mut(&id).map(|existing| {
            existing.data = data;
            existing.clone()
        }))
    }

    async fn delete(&self, id: PokemonId) -> Result<bool, PokemonError> {
        Ok(self.pokemon.write().await.remove(&id).is_some())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub user_service: Arc<UserService<InMemoryUserRepository>>,
    pub user_repository: Arc<InMemoryUserRepository>,
    pub session_issuer: Arc<SessionIssuer>,
}

impl TestApp {
    /// Spawn the application router in a background task
    pub async fn spawn() -> Self {
        Self::spawn_with(create_router).await
    }

    /// Spawn a custom router built over the application state
    pub async fn spawn_with<F>(build_router: F) -> Self
    where
        F: FnOnce(AppState) -> Router,
    {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let pokemon_service = Arc::new(PokemonService::new(Arc::new(
            InMemoryPokemonRepository::default(),
        )));
        let session_issuer = Arc::new(SessionIssuer::new(Arc::new(JwtHandler::new(JWT_SECRET))));

        let state = AppState::new(
            Arc::clone(&user_service),
            pokemon_service,
            Arc::clone(&session_issuer),
        );
        let router = build_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            user_service,
            user_repository,
            session_issuer,
        }
    }

    pub async fn seed_user(&self, email: &str, password: &str, scopes: &[&str]) -> User {
        let command = CreateUserCommand::new(EmailAddress::new(email).unwrap(), password)
            .with_names("John", "Doe")
            .with_scopes(scopes.iter().copied());

        self.user_service
            .create_user(command)
            .await
            .expect("Failed to seed user")
    }

    pub fn access_token(&self, subject: &str, scopes: &[&str]) -> String {
        self.session_issuer
            .issue_access_token(subject, scopes.iter().copied())
            .expect("Failed to issue token")
    }

    pub fn jwt_handler(&self) -> &JwtHandler {
        self.session_issuer.jwt_handler()
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn bulbasaur() -> serde_json::Value {
    serde_json::json!({
        "name": "Bulbasaur",
        "type_1": "Grass",
        "type_2": "Poison",
        "total": 318,
        "hp": 45,
        "attack": 49,
        "defense": 49,
        "sp_atk": 65,
        "sp_def": 65,
        "speed": 45,
        "generation": 1,
        "legendary": false
    })
}
