//! GraphQL queries for quillpost
//!
//! This module contains all query resolvers, organized by domain.

mod account;
mod post;

pub use account::AccountQuery;
pub use post::PostQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(AccountQuery, PostQuery);
