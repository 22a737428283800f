//! API server configuration

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use quillpost_shared_config::{
    get_required_env, parse_env, CommonConfig, DatabaseConfig, Environment,
};
use tracing_subscriber::EnvFilter;

use crate::services::DEFAULT_PAGE_SIZE;
use crate::services::auth::DEFAULT_ISSUER;

/// Minimum required length for JWT_SECRET to be considered secure
const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Signing key used when JWT_SECRET is unset outside production
const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-in-production";

/// Where accounts and posts are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local storage, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => bail!("unknown storage backend '{}' (expected postgres or memory)", other),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// Token signing key
    pub jwt_secret: String,

    /// Token issuer, also used as audience (default: quillpost)
    pub jwt_issuer: String,

    /// Fixed page size of the `posts` query (default: 2)
    pub posts_page_size: u32,

    /// Storage backend (default: postgres)
    pub storage_backend: StorageBackend,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode, this function requires:
    /// - `JWT_SECRET`: Must be set and at least 32 characters long
    /// - `DATABASE_URL`: Must be explicitly set (no insecure defaults)
    /// - `STORAGE_BACKEND`: Must not be `memory`
    ///
    /// In development/staging mode, sensible defaults are used for convenience.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_env();
        let is_production = environment.is_production();

        let jwt_secret = Self::load_jwt_secret(is_production)?;
        let storage_backend = Self::load_storage_backend(is_production)?;

        if is_production && storage_backend == StorageBackend::Postgres {
            Self::validate_database_url()?;
        }

        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            jwt_secret,

            jwt_issuer: env::var("JWT_ISSUER")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_ISSUER.to_string()),

            posts_page_size: Self::load_page_size()?,

            storage_backend,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// Load and validate JWT_SECRET
    ///
    /// In production:
    /// - JWT_SECRET must be explicitly set
    /// - Must be at least MIN_JWT_SECRET_LENGTH characters
    ///
    /// In development: uses a default value with a warning
    fn load_jwt_secret(is_production: bool) -> Result<String> {
        match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => {
                if is_production && secret.len() < MIN_JWT_SECRET_LENGTH {
                    bail!(
                        "JWT_SECRET must be at least {} characters in production (got {})",
                        MIN_JWT_SECRET_LENGTH,
                        secret.len()
                    );
                }
                Ok(secret)
            }
            _ if is_production => {
                bail!(
                    "JWT_SECRET environment variable is required in production. \
                     Please set a secure secret of at least {} characters.",
                    MIN_JWT_SECRET_LENGTH
                );
            }
            _ => {
                tracing::warn!(
                    "JWT_SECRET not set, using insecure default. \
                     This is only acceptable in development mode."
                );
                Ok(DEVELOPMENT_JWT_SECRET.to_string())
            }
        }
    }

    /// Load STORAGE_BACKEND; the memory backend is refused in production
    fn load_storage_backend(is_production: bool) -> Result<StorageBackend> {
        let backend = match env::var("STORAGE_BACKEND") {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => StorageBackend::default(),
        };

        if is_production && backend == StorageBackend::Memory {
            bail!("STORAGE_BACKEND=memory is not allowed in production");
        }

        Ok(backend)
    }

    /// Load POSTS_PAGE_SIZE, which must be at least 1
    fn load_page_size() -> Result<u32> {
        let size: u32 = parse_env("POSTS_PAGE_SIZE", DEFAULT_PAGE_SIZE)
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        if size == 0 {
            bail!("POSTS_PAGE_SIZE must be at least 1");
        }
        Ok(size)
    }

    /// Validate that DATABASE_URL is explicitly set in production
    fn validate_database_url() -> Result<()> {
        if get_required_env("DATABASE_URL").is_err() {
            bail!(
                "DATABASE_URL environment variable is required in production. \
                 Please set your PostgreSQL connection string."
            );
        }
        Ok(())
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.common.database
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }
}

/// Build the tracing filter from `RUST_LOG`/`LOG_LEVEL` directives
///
/// Unparsable directives fall back to `info`.
pub fn build_log_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}
