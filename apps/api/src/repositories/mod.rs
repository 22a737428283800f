//! Persistence layer for quillpost
//!
//! The resolver logic only talks to the [`AccountStore`] and [`PostStore`]
//! traits. Two implementations exist: PostgreSQL repositories backed by sqlx
//! and in-memory stores used for development and tests.

pub mod account;
pub mod memory;
pub mod post;
pub mod utils;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{Account, NewAccount, NewPost, Post};

pub use account::AccountRepository;
pub use memory::{MemoryAccountStore, MemoryPostStore};
pub use post::PostRepository;

/// Account persistence contract
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find an account by exact email
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<Account>>;

    /// Find an account by ID
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Account>>;

    /// Insert a new account
    ///
    /// Fails with `CONFLICT` when the email is already taken.
    async fn insert(&self, account: NewAccount) -> ApiResult<Account>;

    /// Append a post reference to the account's ordered post list
    async fn append_post(&self, account_id: Uuid, post_id: Uuid) -> ApiResult<()>;
}

/// Post persistence contract
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Find a post by ID
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Post>>;

    /// Insert a new post, stamping both timestamps
    async fn insert(&self, post: NewPost) -> ApiResult<Post>;

    /// Persist the mutable fields of an existing post (last write wins)
    async fn save(&self, post: &Post) -> ApiResult<Post>;

    /// Total number of posts
    async fn count_all(&self) -> ApiResult<i64>;

    /// Page of posts ordered by `created_at` descending, insertion order on ties
    async fn find_page(&self, offset: i64, limit: i64) -> ApiResult<Vec<Post>>;
}

/// The pair of stores the resolvers run against
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub posts: Arc<dyn PostStore>,
    pool: Option<PgPool>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            accounts: Arc::new(AccountRepository::new(pool.clone())),
            posts: Arc::new(PostRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Fresh, empty in-memory stores
    pub fn in_memory() -> Self {
        Self::from_parts(
            Arc::new(MemoryAccountStore::new()),
            Arc::new(MemoryPostStore::new()),
        )
    }

    /// Assemble from arbitrary store implementations
    pub fn from_parts(accounts: Arc<dyn AccountStore>, posts: Arc<dyn PostStore>) -> Self {
        Self {
            accounts,
            posts,
            pool: None,
        }
    }

    /// Check that the backing storage is reachable
    pub async fn ping(&self) -> ApiResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }

    /// Name of the backing storage, for logs and health output
    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}
