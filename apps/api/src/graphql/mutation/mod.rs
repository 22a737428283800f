//! GraphQL mutations for quillpost
//!
//! This module contains all mutation resolvers, organized by domain.

mod account;
mod post;

pub use account::AccountMutation;
pub use post::PostMutation;

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(AccountMutation, PostMutation);
