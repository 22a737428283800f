//! Shared SQL fragments for repositories

/// SQL columns for account queries
pub const ACCOUNT_COLUMNS: &str = r#"
    id, email, name, password_hash,
    created_at, updated_at
"#;

/// SQL columns for post queries
pub const POST_COLUMNS: &str = r#"
    id, title, content, image_url, creator_id,
    created_at, updated_at
"#;

/// Whether a database error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
