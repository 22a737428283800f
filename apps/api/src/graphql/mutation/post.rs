//! Post mutations
//!
//! - createPost: Publish a post as the authenticated caller
//! - updatePost: Edit a post the caller owns

use async_graphql::{Context, Object, Result, ID};

use crate::graphql::auth_context;
use crate::graphql::types::{Post, PostInputData};
use crate::services::PostService;

/// Post mutations
#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Create a post owned by the caller
    ///
    /// # Errors
    /// - `UNAUTHENTICATED` without a valid bearer token
    /// - `VALIDATION_FAILED` if title or content is empty
    async fn create_post(&self, ctx: &Context<'_>, post_input: PostInputData) -> Result<Post> {
        let service = ctx.data::<PostService>()?;
        let auth = auth_context(ctx);

        let post = service
            .create_post(&auth, post_input.into_draft())
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Post::from(post))
    }

    /// Overwrite a post's title and content, and its image URL when given
    ///
    /// # Errors
    /// - `UNAUTHENTICATED` without a valid bearer token
    /// - `NOT_FOUND` if the post does not exist
    /// - `FORBIDDEN` if the caller is not the creator
    /// - `VALIDATION_FAILED` if title or content is empty
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        post_input: PostInputData,
    ) -> Result<Post> {
        let service = ctx.data::<PostService>()?;
        let auth = auth_context(ctx);

        let post = service
            .update_post(&auth, &id, post_input.into_changes())
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Post::from(post))
    }
}
