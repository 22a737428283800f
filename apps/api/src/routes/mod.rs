//! HTTP route handlers for the quillpost API
//!
//! - GraphQL endpoint and playground
//! - Health check and status endpoints

pub mod graphql;
pub mod health;

pub use graphql::graphql_router;
pub use health::{health_router, HealthState};
