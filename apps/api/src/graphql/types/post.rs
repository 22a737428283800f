//! Post GraphQL types

use async_graphql::{InputObject, MaybeUndefined, SimpleObject, ID};

use super::format_timestamp;
use crate::models::{Post as DbPost, PostChanges};
use crate::services::{PostDraft, PostPage as DbPostPage};

/// Post view
#[derive(Debug, Clone, SimpleObject)]
pub struct Post {
    pub id: ID,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    /// Owning account
    pub creator_id: ID,
    /// RFC 3339, UTC, millisecond precision
    pub created_at: String,
    /// RFC 3339, UTC, millisecond precision
    pub updated_at: String,
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self {
            id: ID(post.id.to_string()),
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            creator_id: ID(post.creator_id.to_string()),
            created_at: format_timestamp(post.created_at),
            updated_at: format_timestamp(post.updated_at),
        }
    }
}

/// One page of posts
#[derive(Debug, Clone, SimpleObject)]
pub struct PostPage {
    pub items: Vec<Post>,
    /// Number of posts across all pages
    pub total_count: i64,
}

impl From<DbPostPage> for PostPage {
    fn from(page: DbPostPage) -> Self {
        Self {
            items: page.items.into_iter().map(Post::from).collect(),
            total_count: page.total_count,
        }
    }
}

/// Post input for `createPost` and `updatePost`
///
/// On update, an omitted `imageUrl` keeps the stored value, `null` clears it
/// and a string replaces it.
#[derive(Debug, InputObject)]
pub struct PostInputData {
    pub title: String,
    pub content: String,
    pub image_url: MaybeUndefined<String>,
}

impl PostInputData {
    pub fn into_draft(self) -> PostDraft {
        PostDraft {
            title: self.title,
            content: self.content,
            image_url: match self.image_url {
                MaybeUndefined::Value(url) => Some(url),
                MaybeUndefined::Null | MaybeUndefined::Undefined => None,
            },
        }
    }

    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            title: self.title,
            content: self.content,
            image_url: self.image_url.into(),
        }
    }
}
