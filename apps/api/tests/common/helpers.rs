//! Test helper functions for API integration tests
//!
//! Builds the full router on in-memory storage and sends GraphQL requests
//! through it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use quillpost_api::config::{Config, StorageBackend};
use quillpost_api::repositories::Stores;
use quillpost_api::services::Argon2Hasher;
use quillpost_api::{build_router, AppState};
use quillpost_shared_config::{CommonConfig, DatabaseConfig, Environment};

use super::fixtures::TEST_JWT_SECRET;

/// Configuration for router tests; no environment variables involved
pub fn test_config(environment: Environment) -> Config {
    Config {
        common: CommonConfig {
            database: DatabaseConfig::default(),
            environment,
            log_level: "debug".to_string(),
        },
        port: 0,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_issuer: "quillpost".to_string(),
        posts_page_size: 2,
        storage_backend: StorageBackend::Memory,
        cors_allowed_origins: None,
    }
}

/// Full router over the given stores
pub fn test_app_with(stores: Stores, environment: Environment) -> Router {
    let config = test_config(environment);
    let state = AppState::from_config(&config, stores, Arc::new(Argon2Hasher::new()));
    build_router(state, &config)
}

/// Full development router over fresh in-memory stores
pub fn test_app() -> Router {
    test_app_with(Stores::in_memory(), Environment::Development)
}

/// POST a GraphQL document and return the decoded response body
pub async fn graphql(
    app: &Router,
    query: &str,
    variables: Value,
    authorization: Option<&str>,
) -> Value {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let body = json!({ "query": query, "variables": variables });
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `extensions.code` of the first error, if any
pub fn error_code(response: &Value) -> Option<&str> {
    response["errors"][0]["extensions"]["code"].as_str()
}

/// `message` of the first error, if any
pub fn error_message(response: &Value) -> Option<&str> {
    response["errors"][0]["message"].as_str()
}
