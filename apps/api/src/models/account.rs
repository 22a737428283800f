//! Account and token claim models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Registered account
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    /// Unique account identifier
    pub id: Uuid,

    /// Email address (unique, compared exactly as stored)
    pub email: String,

    /// Display name
    pub name: String,

    /// Argon2 password digest
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Owned posts, in the order they were created
    #[sqlx(skip)]
    pub post_ids: Vec<Uuid>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data required to register an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// JWT claims payload
///
/// Tokens are stateless bearer credentials: verification trusts these claims
/// without consulting the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Account ID
    pub user_id: Uuid,

    /// Account email at issue time
    pub email: String,

    /// Issued at timestamp (Unix epoch)
    pub iat: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Create claims for an account
    pub fn new(user_id: Uuid, email: impl Into<String>, issuer: &str) -> Self {
        Self {
            user_id,
            email: email.into(),
            iat: Utc::now().timestamp(),
            iss: issuer.to_string(),
            aud: issuer.to_string(),
        }
    }
}
