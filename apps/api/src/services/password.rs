//! Credential hashing
//!
//! One-way password hashing with Argon2id. Hashing is CPU-bound, so both
//! operations run on the blocking thread pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};

/// Hash-and-compare contract consumed by the resolvers
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted digest of `secret`
    async fn hash(&self, secret: &str) -> ApiResult<String>;

    /// Check `secret` against `digest` in constant time
    async fn verify(&self, secret: &str, digest: &str) -> ApiResult<bool>;
}

/// Argon2id hasher with the crate's default (fixed) cost parameters
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, secret: &str) -> ApiResult<String> {
        let argon2 = self.argon2.clone();
        let secret = secret.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(secret.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| ApiError::PasswordHash(format!("hashing failed: {}", e)))
        })
        .await?
    }

    async fn verify(&self, secret: &str, digest: &str) -> ApiResult<bool> {
        let argon2 = self.argon2.clone();
        let secret = secret.to_owned();
        let digest = digest.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&digest)
                .map_err(|e| ApiError::PasswordHash(format!("invalid digest format: {}", e)))?;
            Ok(argon2.verify_password(secret.as_bytes(), &parsed).is_ok())
        })
        .await?
    }
}
