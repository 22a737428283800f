//! PostgreSQL account repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::utils::{is_unique_violation, ACCOUNT_COLUMNS};
use super::AccountStore;
use crate::error::{ApiError, ApiResult};
use crate::models::{Account, NewAccount};

/// Repository for account database operations
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new AccountRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the ordered post references for an account
    async fn post_ids(&self, account_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT post_id
            FROM account_posts
            WHERE account_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn with_post_ids(&self, account: Option<Account>) -> ApiResult<Option<Account>> {
        match account {
            Some(mut account) => {
                account.post_ids = self.post_ids(account.id).await?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM accounts WHERE email = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        self.with_post_ids(account).await
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        self.with_post_ids(account).await
    }

    async fn insert(&self, account: NewAccount) -> ApiResult<Account> {
        sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&account.email)
        .bind(&account.name)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("user", account.email.clone())
            } else {
                ApiError::Database(e)
            }
        })
    }

    async fn append_post(&self, account_id: Uuid, post_id: Uuid) -> ApiResult<()> {
        sqlx::query("INSERT INTO account_posts (account_id, post_id) VALUES ($1, $2)")
            .bind(account_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        sqlx::query("UPDATE accounts SET updated_at = NOW() WHERE id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
