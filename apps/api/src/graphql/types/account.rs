//! Account GraphQL types

use async_graphql::{InputObject, SimpleObject, ID};

use crate::models::Account as DbAccount;
use crate::services::NewUserInput;

/// Public account view; the password digest is never part of it
#[derive(Debug, Clone, SimpleObject)]
pub struct Account {
    /// Unique account identifier
    pub id: ID,
    /// Email address as registered
    pub email: String,
    /// Display name
    pub name: String,
}

impl From<DbAccount> for Account {
    fn from(account: DbAccount) -> Self {
        Self {
            id: ID(account.id.to_string()),
            email: account.email,
            name: account.name,
        }
    }
}

/// Registration input
#[derive(Debug, InputObject)]
pub struct UserInputData {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl From<UserInputData> for NewUserInput {
    fn from(input: UserInputData) -> Self {
        Self {
            email: input.email,
            password: input.password,
            name: input.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_projection_uses_string_id() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let view = Account::from(DbAccount {
            id,
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            post_ids: vec![],
            created_at: now,
            updated_at: now,
        });

        assert_eq!(view.id.as_str(), id.to_string());
        assert_eq!(view.email, "ada@example.com");
        assert_eq!(view.name, "Ada");
    }
}
