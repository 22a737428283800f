//! Account queries
//!
//! - login: Check credentials and obtain a bearer token

use async_graphql::{Context, Object, Result};

use crate::graphql::types::AuthData;
use crate::services::AccountService;

/// Account-related queries
#[derive(Default)]
pub struct AccountQuery;

#[Object]
impl AccountQuery {
    /// Authenticate with email and password
    ///
    /// # Errors
    /// - `NOT_FOUND` if no account has this email
    /// - `UNAUTHENTICATED` if the password is wrong
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthData> {
        let service = ctx.data::<AccountService>()?;

        let outcome = service
            .login(&email, &password)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(AuthData::from(outcome))
    }
}
