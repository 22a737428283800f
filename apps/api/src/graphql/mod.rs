//! GraphQL schema and resolvers for quillpost
//!
//! - Query resolvers for login and reading posts
//! - Mutation resolvers for registration and writing posts
//! - Wire view types projected from the storage models

pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

use async_graphql::Context;

use crate::middleware::AuthContext;

pub use crate::services::pagination::{PageRequest, DEFAULT_PAGE_SIZE};
pub use schema::{build_schema, QuillpostSchema, SchemaBuilder};

/// Auth context injected by the HTTP layer; anonymous when absent
pub(crate) fn auth_context(ctx: &Context<'_>) -> AuthContext {
    ctx.data_opt::<AuthContext>().cloned().unwrap_or_default()
}
