//! Token service for quillpost
//!
//! Issues and verifies signed, unencrypted bearer tokens carrying the
//! account ID and email. Tokens are stateless: there is no revocation list
//! and verification never consults persistence.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::Claims;

/// Default issuer/audience embedded in every token
pub const DEFAULT_ISSUER: &str = "quillpost";

/// Token service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret, injected from configuration at startup
    pub jwt_secret: String,
    /// JWT issuer (also used as audience)
    pub issuer: String,
}

impl AuthConfig {
    /// Create a new AuthConfig with the default issuer
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Override the issuer/audience
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }
}

/// Issues and verifies HS256 bearer tokens
#[derive(Clone)]
pub struct TokenService {
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a new TokenService instance
    pub fn new(config: AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No expiry: tokens carry no `exp` claim
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["iss", "aud"]);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.issuer]);

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer,
            validation,
        }
    }

    /// Issue a signed token for an account
    ///
    /// # Errors
    /// - `ApiError::Internal` if encoding fails
    pub fn issue(&self, user_id: Uuid, email: &str) -> ApiResult<String> {
        let claims = Claims::new(user_id, email, &self.issuer);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("token encoding failed: {}", e)))
    }

    /// Verify a token and return its claims
    ///
    /// Missing, malformed or wrongly signed tokens all yield `None`; the
    /// failure is logged but never surfaced to the caller.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "Token verification failed");
                None
            }
        }
    }
}
