//! Login payload

use async_graphql::{SimpleObject, ID};

use crate::services::LoginOutcome;

/// Token and account id returned by `login`
#[derive(Debug, Clone, SimpleObject)]
pub struct AuthData {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub user_id: ID,
}

impl From<LoginOutcome> for AuthData {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token,
            user_id: ID(outcome.user_id.to_string()),
        }
    }
}
