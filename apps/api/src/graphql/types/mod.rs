//! GraphQL object types exposed through the API
//!
//! Each view is an explicit projection of a storage model: ids become strings
//! and timestamps become RFC 3339 text with millisecond precision.

mod account;
mod auth;
mod post;

pub use account::{Account, UserInputData};
pub use auth::AuthData;
pub use post::{Post, PostInputData, PostPage};

use chrono::{DateTime, SecondsFormat, Utc};

/// `2024-01-02T03:04:05.678Z`
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
