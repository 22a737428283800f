//! Test fixtures for API integration tests
//!
//! Provides services wired to counting in-memory stores, plus store doubles
//! whose every call fails.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use quillpost_api::error::{ApiError, ApiResult};
use quillpost_api::middleware::AuthContext;
use quillpost_api::models::{Account, NewPost, Post};
use quillpost_api::repositories::{MemoryAccountStore, MemoryPostStore, PostStore, Stores};
use quillpost_api::services::{
    AccountService, Argon2Hasher, AuthConfig, NewUserInput, PostDraft, PostService, TokenService,
};

/// Signing key shared by every fixture
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests-32chars";

pub const TEST_PASSWORD: &str = "secret-pass";

/// Services running against counting in-memory stores
pub struct TestContext {
    pub accounts: Arc<MemoryAccountStore>,
    pub posts: Arc<MemoryPostStore>,
    pub tokens: TokenService,
    pub account_service: AccountService,
    pub post_service: PostService,
}

impl TestContext {
    pub fn new() -> Self {
        let accounts = Arc::new(MemoryAccountStore::new());
        let posts = Arc::new(MemoryPostStore::new());
        let tokens = TokenService::new(AuthConfig::new(TEST_JWT_SECRET));

        Self {
            account_service: AccountService::new(
                accounts.clone(),
                Arc::new(Argon2Hasher::new()),
                tokens.clone(),
            ),
            post_service: PostService::new(accounts.clone(), posts.clone()),
            accounts,
            posts,
            tokens,
        }
    }

    /// Total calls made against both stores
    pub fn store_calls(&self) -> usize {
        self.accounts.calls() + self.posts.calls()
    }

    /// The stores as the application would see them
    pub fn stores(&self) -> Stores {
        Stores::from_parts(self.accounts.clone(), self.posts.clone())
    }

    /// Register an account with [`TEST_PASSWORD`]
    pub async fn register(&self, email: &str, name: &str) -> Account {
        self.account_service
            .create_user(user_input(email, TEST_PASSWORD, name))
            .await
            .expect("registration should succeed")
    }

    /// Register, log in, and verify the issued token into an auth context
    pub async fn signed_in(&self, email: &str, name: &str) -> (Account, AuthContext) {
        let account = self.register(email, name).await;
        let outcome = self
            .account_service
            .login(email, TEST_PASSWORD)
            .await
            .expect("login should succeed");
        let claims = self
            .tokens
            .verify(&outcome.token)
            .expect("issued token should verify");
        (account, AuthContext::from(claims))
    }

    /// Create a post as `auth`
    pub async fn publish(&self, auth: &AuthContext, title: &str) -> Post {
        self.post_service
            .create_post(auth, draft(title, "Some content", None))
            .await
            .expect("post creation should succeed")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn user_input(email: &str, password: &str, name: &str) -> NewUserInput {
    NewUserInput {
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
    }
}

pub fn draft(title: &str, content: &str, image_url: Option<&str>) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        content: content.to_string(),
        image_url: image_url.map(str::to_string),
    }
}

fn unavailable() -> ApiError {
    ApiError::Database(sqlx::Error::PoolTimedOut)
}

/// Post store whose every operation fails as if the database were down
#[derive(Debug, Default)]
pub struct FailingPostStore;

#[async_trait]
impl PostStore for FailingPostStore {
    async fn find_by_id(&self, _id: Uuid) -> ApiResult<Option<Post>> {
        Err(unavailable())
    }

    async fn insert(&self, _post: NewPost) -> ApiResult<Post> {
        Err(unavailable())
    }

    async fn save(&self, _post: &Post) -> ApiResult<Post> {
        Err(unavailable())
    }

    async fn count_all(&self) -> ApiResult<i64> {
        Err(unavailable())
    }

    async fn find_page(&self, _offset: i64, _limit: i64) -> ApiResult<Vec<Post>> {
        Err(unavailable())
    }
}
