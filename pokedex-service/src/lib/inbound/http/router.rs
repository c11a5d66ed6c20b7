use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::RequestAuthorizer;
use auth::SessionIssuer;
use auth::UserLookup;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_pokemon::create_pokemon;
use super::handlers::delete_pokemon::delete_pokemon;
use super::handlers::get_pokemon::get_pokemon;
use super::handlers::get_user_by_email::get_user_by_email;
use super::handlers::list_pokemon::list_pokemon;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::handlers::update_pokemon::update_pokemon;
use super::middleware::authorize;
use super::middleware::require_scopes;
use crate::domain::pokemon::ports::PokemonServicePort;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub pokemon_service: Arc<dyn PokemonServicePort>,
    pub authenticator: Arc<Authenticator<User>>,
    pub authorizer: Arc<RequestAuthorizer<User>>,
    pub session_issuer: Arc<SessionIssuer>,
}

impl AppState {
    /// Wire the auth core around the user service, which doubles as the user lookup.
    pub fn new<US, PS>(
        user_service: Arc<US>,
        pokemon_service: Arc<PS>,
        session_issuer: Arc<SessionIssuer>,
    ) -> Self
    where
        US: UserServicePort + UserLookup<User>,
        PS: PokemonServicePort,
    {
        let lookup: Arc<dyn UserLookup<User>> = user_service.clone();

        Self {
            user_service,
            pokemon_service,
            authenticator: Arc::new(Authenticator::new(Arc::clone(&lookup))),
            authorizer: Arc::new(RequestAuthorizer::new(
                lookup,
                Arc::clone(session_issuer.jwt_handler()),
            )),
            session_issuer,
        }
    }
}

async fn ping() -> &'static str {
    "pong"
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/ping", get(ping))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/users/email/:email", get(get_user_by_email));

    let protected_routes = Router::new()
        .route("/users/me", get(me))
        .route("/pokemon", get(list_pokemon).post(create_pokemon))
        .route(
            "/pokemon/:id",
            get(get_pokemon).put(update_pokemon).delete(delete_pokemon),
        )
        .route_layer(middleware::from_fn_with_state(
            require_scopes(&state, &[]),
            authorize,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
