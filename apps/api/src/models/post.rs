//! Post models

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Blog post
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Post {
    /// Unique post identifier
    pub id: Uuid,

    pub title: String,

    pub content: String,

    /// Optional image URL
    pub image_url: Option<String>,

    /// Owning account; fixed at creation
    pub creator_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Data required to create a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub creator_id: Uuid,
}

/// What to do with a post's image URL on update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageUpdate {
    /// Field omitted: keep the stored value
    #[default]
    Keep,
    /// Field explicitly null: remove the stored value
    Clear,
    /// Replace with the given URL
    Set(String),
}

impl ImageUpdate {
    /// Resolve against the current value
    pub fn apply(self, current: Option<String>) -> Option<String> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(url) => Some(url),
        }
    }
}

impl From<async_graphql::MaybeUndefined<String>> for ImageUpdate {
    fn from(value: async_graphql::MaybeUndefined<String>) -> Self {
        match value {
            async_graphql::MaybeUndefined::Undefined => Self::Keep,
            async_graphql::MaybeUndefined::Null => Self::Clear,
            async_graphql::MaybeUndefined::Value(url) => Self::Set(url),
        }
    }
}

/// Caller-supplied changes for an update
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub image_url: ImageUpdate,
}

impl Post {
    /// Apply changes in place, refreshing `updated_at`
    ///
    /// `creator_id` and `created_at` are never touched.
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        self.title = changes.title;
        self.content = changes.content;
        self.image_url = changes.image_url.apply(self.image_url.take());
        self.updated_at = now;
    }
}
