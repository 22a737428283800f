//! Application assembly
//!
//! Wires stores, services and the GraphQL schema together and builds the
//! axum router. Shared by `main` and the integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::get,
    Extension, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::graphql::{build_schema, QuillpostSchema};
use crate::repositories::Stores;
use crate::routes::{graphql_router, health_router, HealthState};
use crate::services::{
    AccountService, AuthConfig, CredentialHasher, HealthService, PostService, TokenService,
};

/// Everything the router needs to serve requests
#[derive(Clone)]
pub struct AppState {
    pub schema: QuillpostSchema,
    pub tokens: TokenService,
    pub health: HealthService,
}

impl AppState {
    /// Build services and schema on top of the given stores
    pub fn new(
        stores: Stores,
        hasher: Arc<dyn CredentialHasher>,
        auth_config: AuthConfig,
        page_size: u32,
    ) -> Self {
        let tokens = TokenService::new(auth_config);

        let account_service =
            AccountService::new(stores.accounts.clone(), hasher, tokens.clone());
        let post_service = PostService::new(stores.accounts.clone(), stores.posts.clone());

        Self {
            schema: build_schema(account_service, post_service, page_size),
            tokens,
            health: HealthService::new(stores),
        }
    }

    /// Build the state described by `config`
    pub fn from_config(config: &Config, stores: Stores, hasher: Arc<dyn CredentialHasher>) -> Self {
        let auth_config =
            AuthConfig::new(config.jwt_secret.clone()).with_issuer(config.jwt_issuer.clone());
        Self::new(stores, hasher, auth_config, config.posts_page_size)
    }
}

/// Build the CORS layer based on configuration.
///
/// In production mode:
/// - If `CORS_ORIGINS` is set, only those origins are allowed
/// - If `CORS_ORIGINS` is not set, CORS requests are rejected (no origins allowed)
///
/// In development mode:
/// - If `CORS_ORIGINS` is set, those origins are used
/// - If `CORS_ORIGINS` is not set, permissive CORS is used for convenience
pub fn build_cors_layer(config: &Config) -> CorsLayer {
    let is_production = config.is_production();

    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                CorsLayer::new()
            } else {
                tracing::info!(
                    "CORS configured with {} allowed origin(s): {:?}",
                    allowed_origins.len(),
                    origins
                );
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([
                        header::AUTHORIZATION,
                        header::CONTENT_TYPE,
                        header::ACCEPT,
                        header::ORIGIN,
                    ])
                    .max_age(Duration::from_secs(3600))
            }
        }
        _ if is_production => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected. Set CORS_ORIGINS to allow cross-origin requests."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!(
                "Using permissive CORS in development mode. \
                 Set CORS_ORIGINS for production-like behavior."
            );
            CorsLayer::permissive()
        }
    }
}

/// Build the full HTTP router
pub fn build_router(state: AppState, config: &Config) -> Router {
    let playground = !config.is_production();

    Router::new()
        .route("/", get(root))
        // GraphQL endpoints: /graphql, /graphql/playground
        .nest("/graphql", graphql_router(state.schema, playground))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(HealthState::new(state.health)))
        // TokenService for the AuthContext extractor
        .layer(Extension(state.tokens))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}

async fn root() -> &'static str {
    "quillpost GraphQL API"
}
