//! GraphQL schema builder for quillpost

use async_graphql::{EmptySubscription, Schema};

use crate::services::{AccountService, PostService};

use super::mutation::Mutation;
use crate::services::DEFAULT_PAGE_SIZE;
use super::query::Query;

/// The quillpost GraphQL schema type
pub type QuillpostSchema = Schema<Query, Mutation, EmptySubscription>;

/// Fixed `posts` page size, stored as schema data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(pub u32);

/// Builder for constructing the GraphQL schema with required services
pub struct SchemaBuilder {
    account_service: AccountService,
    post_service: PostService,
    page_size: u32,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new(account_service: AccountService, post_service: PostService) -> Self {
        Self {
            account_service,
            post_service,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the page size for `posts`
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Build the schema with all configured services
    pub fn build(self) -> QuillpostSchema {
        Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .data(self.account_service)
            .data(self.post_service)
            .data(PageSize(self.page_size))
            .finish()
    }
}

/// Create a new GraphQL schema with the provided services
pub fn build_schema(
    account_service: AccountService,
    post_service: PostService,
    page_size: u32,
) -> QuillpostSchema {
    SchemaBuilder::new(account_service, post_service)
        .page_size(page_size)
        .build()
}
