//! Account mutations
//!
//! - createUser: Register a new account

use async_graphql::{Context, Object, Result};

use crate::graphql::types::{Account, UserInputData};
use crate::services::AccountService;

/// Account mutations
#[derive(Default)]
pub struct AccountMutation;

#[Object]
impl AccountMutation {
    /// Register a new account
    ///
    /// # Errors
    /// - `CONFLICT` if the email is already registered
    /// - `VALIDATION_FAILED` with one `details` entry per invalid field
    async fn create_user(&self, ctx: &Context<'_>, user_input: UserInputData) -> Result<Account> {
        let service = ctx.data::<AccountService>()?;

        let account = service
            .create_user(user_input.into())
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(Account::from(account))
    }
}
