//! Storage-side models for quillpost
//!
//! These types mirror what the stores persist. Wire shapes live in
//! `graphql::types` and are produced by explicit projections.

pub mod account;
pub mod post;

pub use account::{Account, Claims, NewAccount};
pub use post::{ImageUpdate, NewPost, Post, PostChanges};
