//! Error handling for the quillpost API
//!
//! Every failure a resolver can produce is an [`ApiError`]. Each variant maps
//! onto one of six machine-checkable kinds (`VALIDATION_FAILED`, `CONFLICT`,
//! `UNAUTHENTICATED`, `FORBIDDEN`, `NOT_FOUND`, `INTERNAL`) and is projected
//! into a GraphQL error carrying `code` and optional `details` extensions.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::services::validation::ValidationErrors;

/// Public message used for every `INTERNAL` failure
const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Client input ==========
    /// One or more input fields failed validation
    #[error("{}", .0.summary())]
    Validation(ValidationErrors),

    /// Unique key already taken (e.g. email already registered)
    #[error("{resource_type} already exists: {id}")]
    Conflict {
        resource_type: &'static str,
        id: String,
    },

    // ========== Authentication & Authorization ==========
    /// Missing/invalid token or failed credential check
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated caller does not own the resource
    #[error("{0}")]
    Forbidden(String),

    // ========== Resource Errors ==========
    /// Referenced entity does not exist
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ========== Collaborator failures ==========
    /// Database query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failed
    #[error("password hashing error: {0}")]
    PasswordHash(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error (catch-all for unexpected failures)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the error kind code for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Conflict { .. } => "CONFLICT",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Database(_)
            | Self::PasswordHash(_)
            | Self::Configuration(_)
            | Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether this error originates from a collaborator rather than the caller
    pub fn is_internal(&self) -> bool {
        self.error_code() == "INTERNAL"
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Create a conflict error for a specific resource
    pub fn conflict(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            resource_type,
            id: id.into(),
        }
    }

    /// Create an unauthenticated error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Message safe to return to the caller
    ///
    /// Collaborator details never leave the process; the first validation
    /// entry doubles as the summary for validation failures.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { resource_type, .. } => {
                format!("{} not found.", capitalize(resource_type))
            }
            Self::Conflict { resource_type, .. } => {
                format!("{} already exists.", capitalize(resource_type))
            }
            _ if self.is_internal() => INTERNAL_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }

    /// Log the error with a severity matching its kind
    pub fn log(&self) {
        let code = self.error_code();
        match self {
            _ if self.is_internal() => {
                tracing::error!(error = %self, code, "Internal error occurred");
            }
            Self::Unauthenticated(_) | Self::Forbidden(_) => {
                tracing::warn!(error = %self, code, "Authorization error");
            }
            _ => {
                tracing::debug!(error = %self, code, "Client error");
            }
        }
    }

    /// Convert into a GraphQL error with `code` and `details` extensions
    pub fn to_graphql_error(&self) -> async_graphql::Error {
        self.log();

        let code = self.error_code();
        let details = match self {
            Self::Validation(errors) => Some(errors.to_graphql_value()),
            _ => None,
        };

        async_graphql::Error::new(self.public_message()).extend_with(|_, e| {
            e.set("code", code);
            if let Some(details) = details {
                e.set("details", details);
            }
        })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("background task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validation::FieldError;
    use tracing_test::traced_test;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApiError::unauthenticated("no").error_code(),
            "UNAUTHENTICATED"
        );
        assert_eq!(ApiError::forbidden("no").error_code(), "FORBIDDEN");
        assert_eq!(ApiError::not_found("post", "1").error_code(), "NOT_FOUND");
        assert_eq!(ApiError::conflict("user", "a@b.c").error_code(), "CONFLICT");
        assert_eq!(
            ApiError::PasswordHash("bad salt".to_string()).error_code(),
            "INTERNAL"
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).error_code(),
            "INTERNAL"
        );
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = ApiError::Internal("connection refused on 10.0.0.3".to_string());
        assert_eq!(err.public_message(), "An unexpected error occurred");

        let gql = err.to_graphql_error();
        assert_eq!(gql.message, "An unexpected error occurred");
    }

    #[test]
    fn test_validation_error_uses_first_message() {
        let err = ApiError::Validation(ValidationErrors::from(vec![
            FieldError::new("email", "E-Mail is invalid."),
            FieldError::new("password", "Password too short!"),
        ]));
        assert_eq!(err.public_message(), "E-Mail is invalid.");

        let gql = err.to_graphql_error();
        let extensions = gql.extensions.expect("extensions");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("VALIDATION_FAILED"))
        );
        assert!(extensions.get("details").is_some());
    }

    #[test]
    fn test_not_found_display() {
        let err = ApiError::not_found("post", "abc123");
        assert_eq!(err.to_string(), "post not found: abc123");
        assert_eq!(err.public_message(), "Post not found.");
        assert_eq!(
            ApiError::not_found("user", "a@b.c").public_message(),
            "User not found."
        );
        assert_eq!(
            ApiError::conflict("user", "a@b.c").public_message(),
            "User already exists."
        );
    }

    #[test]
    #[traced_test]
    fn test_internal_error_is_logged_with_details() {
        let err = ApiError::Internal("connection reset by peer".to_string());
        let gql = err.to_graphql_error();

        assert_eq!(gql.message, "An unexpected error occurred");
        assert!(logs_contain("Internal error occurred"));
        assert!(logs_contain("connection reset by peer"));
    }

    #[test]
    #[traced_test]
    fn test_forbidden_is_logged_as_authorization_error() {
        ApiError::forbidden("Not authorized!").to_graphql_error();

        assert!(logs_contain("Authorization error"));
        assert!(logs_contain("FORBIDDEN"));
    }
}
