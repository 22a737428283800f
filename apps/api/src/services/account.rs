//! Account resolvers: registration and login

use std::sync::Arc;

use uuid::Uuid;

use super::auth::TokenService;
use super::password::CredentialHasher;
use super::validation::validate_user_input;
use crate::error::{ApiError, ApiResult};
use crate::models::{Account, NewAccount};
use crate::repositories::AccountStore;

/// Registration input
#[derive(Debug, Clone)]
pub struct NewUserInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user_id: Uuid,
}

/// Registration and login against the account store
#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: TokenService,
    ) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
        }
    }

    /// Register a new account
    ///
    /// The duplicate-email check runs first, so a reused email is reported as
    /// a conflict whatever the other fields contain.
    ///
    /// # Errors
    /// - `ApiError::Conflict` if the email is already registered
    /// - `ApiError::Validation` if any field fails its rules
    pub async fn create_user(&self, input: NewUserInput) -> ApiResult<Account> {
        if self.accounts.find_by_email(&input.email).await?.is_some() {
            tracing::debug!(email = %input.email, "Registration rejected: email taken");
            return Err(ApiError::conflict("user", input.email));
        }

        validate_user_input(&input.email, &input.password, &input.name)?;

        let password_hash = self.hasher.hash(&input.password).await?;

        let account = self
            .accounts
            .insert(NewAccount {
                email: input.email,
                name: input.name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %account.id, email = %account.email, "Account registered");

        Ok(account)
    }

    /// Check credentials and issue a token
    ///
    /// # Errors
    /// - `ApiError::NotFound` if no account has this email
    /// - `ApiError::Unauthenticated` if the password does not match
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginOutcome> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email = %email, "Login failed: account not found");
                ApiError::not_found("user", email)
            })?;

        if !self.hasher.verify(password, &account.password_hash).await? {
            tracing::warn!(user_id = %account.id, "Login failed: invalid password");
            return Err(ApiError::unauthenticated("Password is incorrect."));
        }

        let token = self.tokens.issue(account.id, &account.email)?;

        tracing::info!(user_id = %account.id, "Account logged in");

        Ok(LoginOutcome {
            token,
            user_id: account.id,
        })
    }
}
