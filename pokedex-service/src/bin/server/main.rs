use std::sync::Arc;

use pokedex_service::config::Config;
use pokedex_service::domain::pokemon::service::PokemonService;
use pokedex_service::domain::user::service::UserService;
use pokedex_service::inbound::http::router::create_router;
use pokedex_service::inbound::http::router::AppState;
use pokedex_service::outbound::repositories::PostgresPokemonRepository;
use pokedex_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "pokedex-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt = ?config.jwt,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let session_issuer = Arc::new(config.jwt.session_issuer()?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let pokemon_repository = Arc::new(PostgresPokemonRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(user_repository));
    let pokemon_service = Arc::new(PokemonService::new(pokemon_repository));

    let state = AppState::new(user_service, pokemon_service, session_issuer);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
