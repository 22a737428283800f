//! Middleware components for the quillpost API
//!
//! - `AuthContext`: per-request authentication state derived from the bearer
//!   token; also usable as an Axum extractor that never rejects

pub mod auth;

pub use auth::{extract_bearer_token, AuthContext, Principal};
