//! PostgreSQL post repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::utils::POST_COLUMNS;
use super::PostStore;
use crate::error::ApiResult;
use crate::models::{NewPost, Post};

/// Repository for post database operations
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new PostRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE id = $1",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn insert(&self, post: NewPost) -> ApiResult<Post> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (id, title, content, image_url, creator_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.creator_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn save(&self, post: &Post) -> ApiResult<Post> {
        // creator_id and created_at are immutable, updated_at uses the database clock like created_at
        let saved = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET title = $2,
                content = $3,
                image_url = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn count_all(&self) -> ApiResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> ApiResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {}
            FROM posts
            ORDER BY created_at DESC, seq ASC
            OFFSET $1
            LIMIT $2
            "#,
            POST_COLUMNS
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}
