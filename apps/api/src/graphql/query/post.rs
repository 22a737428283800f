//! Post queries
//!
//! - posts: Newest-first page of posts with the overall count
//! - post: A single post by ID
//!
//! Both require authentication.

use async_graphql::{Context, Object, Result, ID};

use crate::graphql::auth_context;
use crate::graphql::schema::PageSize;
use crate::graphql::types::{Post, PostPage};
use crate::services::{PageRequest, PostService};

/// Post-related queries
#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// Page of posts, newest first
    ///
    /// `page` is 1-based; omitted or non-positive values select the first page.
    async fn posts(&self, ctx: &Context<'_>, page: Option<i32>) -> Result<PostPage> {
        let service = ctx.data::<PostService>()?;
        let PageSize(size) = *ctx.data::<PageSize>()?;
        let auth = auth_context(ctx);

        let page = service
            .posts(&auth, PageRequest::new(page, size))
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(PostPage::from(page))
    }

    /// Get a post by ID
    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<Post> {
        let service = ctx.data::<PostService>()?;
        let auth = auth_context(ctx);

        let post = service
            .post(&auth, &id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Post::from(post))
    }
}
