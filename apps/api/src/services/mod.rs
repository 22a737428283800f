//! Business logic services for quillpost
//!
//! - Token issuing and verification
//! - Credential hashing
//! - Field validation
//! - Offset pagination
//! - Account and post resolvers
//! - Health checks

pub mod account;
pub mod auth;
pub mod health;
pub mod pagination;
pub mod password;
pub mod post;
pub mod validation;

pub use account::{AccountService, LoginOutcome, NewUserInput};
pub use auth::{AuthConfig, TokenService};
pub use health::HealthService;
pub use pagination::{PageRequest, DEFAULT_PAGE_SIZE};
pub use password::{Argon2Hasher, CredentialHasher};
pub use post::{PostDraft, PostPage, PostService};
