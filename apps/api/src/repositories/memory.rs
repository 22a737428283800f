//! In-memory stores
//!
//! Used for `STORAGE_BACKEND=memory` development runs and as test doubles.
//! Every trait call is counted so tests can assert that rejected requests
//! never reached persistence.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccountStore, PostStore};
use crate::error::{ApiError, ApiResult};
use crate::models::{Account, NewAccount, NewPost, Post};

/// In-memory [`AccountStore`]
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
    calls: AtomicUsize,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations invoked so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<Account>> {
        self.record_call();
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Account>> {
        self.record_call();
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn insert(&self, account: NewAccount) -> ApiResult<Account> {
        self.record_call();
        let mut accounts = self.accounts.write().await;

        if accounts.iter().any(|a| a.email == account.email) {
            return Err(ApiError::conflict("user", account.email));
        }

        let now = Utc::now();
        let created = Account {
            id: Uuid::new_v4(),
            email: account.email,
            name: account.name,
            password_hash: account.password_hash,
            post_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        accounts.push(created.clone());

        Ok(created)
    }

    async fn append_post(&self, account_id: Uuid, post_id: Uuid) -> ApiResult<()> {
        self.record_call();
        let mut accounts = self.accounts.write().await;

        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| ApiError::not_found("user", account_id.to_string()))?;
        account.post_ids.push(post_id);
        account.updated_at = Utc::now();

        Ok(())
    }
}

/// In-memory [`PostStore`]
///
/// Posts are kept in insertion order, so a stable sort on `created_at`
/// breaks ties by insertion.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<Post>>,
    calls: AtomicUsize,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations invoked so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Post>> {
        self.record_call();
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: NewPost) -> ApiResult<Post> {
        self.record_call();
        let now = Utc::now();
        let created = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            creator_id: post.creator_id,
            created_at: now,
            updated_at: now,
        };
        self.posts.write().await.push(created.clone());
        Ok(created)
    }

    async fn save(&self, post: &Post) -> ApiResult<Post> {
        self.record_call();
        let mut posts = self.posts.write().await;

        let stored = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| ApiError::not_found("post", post.id.to_string()))?;
        stored.title = post.title.clone();
        stored.content = post.content.clone();
        stored.image_url = post.image_url.clone();
        stored.updated_at = post.updated_at;

        Ok(stored.clone())
    }

    async fn count_all(&self) -> ApiResult<i64> {
        self.record_call();
        let count = self.posts.read().await.len();
        i64::try_from(count).map_err(|e| ApiError::Internal(e.to_string()))
    }

    async fn find_page(&self, offset: i64, limit: i64) -> ApiResult<Vec<Post>> {
        self.record_call();
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }
}
