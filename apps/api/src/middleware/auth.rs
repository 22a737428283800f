//! Authorization guard
//!
//! Derives an [`AuthContext`] once per request from the
//! `Authorization: Bearer <token>` header and enforces the two policies the
//! resolvers rely on:
//! - `require_authenticated`: fails with `UNAUTHENTICATED` when no valid token
//!   was presented
//! - `require_owner`: fails with `FORBIDDEN` when the caller does not own the
//!   resource
//!
//! Token problems never abort the request: an absent or invalid token simply
//! yields an anonymous context so public operations still resolve.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn handler(auth: AuthContext) -> impl IntoResponse {
//!     match auth.user_id() {
//!         Some(id) => format!("Hello, {}!", id),
//!         None => "Hello, guest!".to_string(),
//!     }
//! }
//! ```

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::Claims;
use crate::services::TokenService;

/// Verified identity of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
}

/// Per-request authentication state; never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    principal: Option<Principal>,
}

impl AuthContext {
    /// Context for a caller without a valid token
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a caller whose token verified
    pub fn authenticated(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            principal: Some(Principal {
                user_id,
                email: email.into(),
            }),
        }
    }

    /// Derive the context from request headers
    pub fn from_headers(headers: &HeaderMap, tokens: &TokenService) -> Self {
        let Some(token) = extract_bearer_token(headers) else {
            return Self::anonymous();
        };

        match tokens.verify(token) {
            Some(claims) => Self::from(claims),
            None => Self::anonymous(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.principal.as_ref().map(|p| p.user_id)
    }

    pub fn email(&self) -> Option<&str> {
        self.principal.as_ref().map(|p| p.email.as_str())
    }

    /// Authentication check
    ///
    /// # Errors
    /// - `ApiError::Unauthenticated` if no valid token was presented
    pub fn require_authenticated(&self) -> ApiResult<&Principal> {
        self.principal
            .as_ref()
            .ok_or_else(|| ApiError::unauthenticated("Not authenticated!"))
    }

    /// Ownership check; implies the authentication check
    ///
    /// # Errors
    /// - `ApiError::Unauthenticated` if no valid token was presented
    /// - `ApiError::Forbidden` if the caller is not `owner_id`
    pub fn require_owner(&self, owner_id: Uuid) -> ApiResult<&Principal> {
        let principal = self.require_authenticated()?;
        if principal.user_id != owner_id {
            tracing::warn!(
                user_id = %principal.user_id,
                owner_id = %owner_id,
                "Ownership check failed"
            );
            return Err(ApiError::forbidden("Not authorized!"));
        }
        Ok(principal)
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self::authenticated(claims.user_id, claims.email)
    }
}

/// Extract bearer token from Authorization header (case-insensitive scheme)
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    // Reject malformed values like "Bearer <token> <extra>"
    if parts.next().is_some() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<TokenService>() {
            Some(tokens) => Ok(Self::from_headers(&parts.headers, tokens)),
            None => {
                tracing::warn!("TokenService not in extensions, treating request as anonymous");
                Ok(Self::anonymous())
            }
        }
    }
}
