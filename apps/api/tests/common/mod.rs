//! Common test utilities for API integration tests
//!
//! This module provides shared test infrastructure for integration tests,
//! including in-memory service fixtures, failing store doubles, and HTTP
//! helpers for driving the GraphQL endpoint.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
