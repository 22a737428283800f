//! Post resolvers
//!
//! Every operation runs the authentication check before anything else.
//! `update_post` then checks existence, ownership and field validity, in that
//! order, before writing.
//!
//! `create_post` writes twice (insert the post, then append the reference to
//! the creator's account) without a transaction. A failure between the two
//! leaves a post the account does not list.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::pagination::PageRequest;
use super::validation::validate_post_input;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthContext;
use crate::models::{NewPost, Post, PostChanges};
use crate::repositories::{AccountStore, PostStore};

/// Caller-supplied fields for a new post
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// One page of posts plus the overall count
#[derive(Debug, Clone)]
pub struct PostPage {
    pub items: Vec<Post>,
    pub total_count: i64,
}

/// Post creation, listing, lookup and update
#[derive(Clone)]
pub struct PostService {
    accounts: Arc<dyn AccountStore>,
    posts: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(accounts: Arc<dyn AccountStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { accounts, posts }
    }

    /// Create a post owned by the caller
    ///
    /// # Errors
    /// - `ApiError::Unauthenticated` without a valid token, or when the
    ///   token's account no longer exists
    /// - `ApiError::Validation` if title or content is empty
    pub async fn create_post(&self, auth: &AuthContext, draft: PostDraft) -> ApiResult<Post> {
        let principal = auth.require_authenticated()?;

        validate_post_input(&draft.title, &draft.content)?;

        let creator = self
            .accounts
            .find_by_id(principal.user_id)
            .await?
            .ok_or_else(|| ApiError::unauthenticated("Invalid user."))?;

        let post = self
            .posts
            .insert(NewPost {
                title: draft.title,
                content: draft.content,
                image_url: draft.image_url,
                creator_id: creator.id,
            })
            .await?;

        self.accounts.append_post(creator.id, post.id).await?;

        tracing::info!(post_id = %post.id, user_id = %creator.id, "Post created");

        Ok(post)
    }

    /// Newest-first page of posts
    ///
    /// # Errors
    /// - `ApiError::Unauthenticated` without a valid token
    pub async fn posts(&self, auth: &AuthContext, page: PageRequest) -> ApiResult<PostPage> {
        auth.require_authenticated()?;

        let total_count = self.posts.count_all().await?;
        let items = self.posts.find_page(page.offset(), page.limit()).await?;

        Ok(PostPage { items, total_count })
    }

    /// Single post by ID
    ///
    /// # Errors
    /// - `ApiError::Unauthenticated` without a valid token
    /// - `ApiError::NotFound` if the ID is unknown or malformed
    pub async fn post(&self, auth: &AuthContext, id: &str) -> ApiResult<Post> {
        auth.require_authenticated()?;
        self.load(id).await
    }

    /// Overwrite title and content, and the image URL when supplied
    ///
    /// # Errors
    /// - `ApiError::Unauthenticated` without a valid token
    /// - `ApiError::NotFound` if the ID is unknown or malformed
    /// - `ApiError::Forbidden` if the caller does not own the post
    /// - `ApiError::Validation` if title or content is empty
    pub async fn update_post(
        &self,
        auth: &AuthContext,
        id: &str,
        changes: PostChanges,
    ) -> ApiResult<Post> {
        auth.require_authenticated()?;

        let mut post = self.load(id).await?;

        let principal = auth.require_owner(post.creator_id)?;

        validate_post_input(&changes.title, &changes.content)?;

        post.apply(changes, Utc::now());
        let saved = self.posts.save(&post).await?;

        tracing::info!(post_id = %saved.id, user_id = %principal.user_id, "Post updated");

        Ok(saved)
    }

    async fn load(&self, id: &str) -> ApiResult<Post> {
        let post_id =
            Uuid::parse_str(id.trim()).map_err(|_| ApiError::not_found("post", id))?;

        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ApiError::not_found("post", id))
    }
}
