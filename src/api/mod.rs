//! Access to user-specific content: bookmarks and comments.
//!
//! The remote service is reached through [`UserContentSource`] so pages
//! (and tests) can swap the GraphQL client for an in-memory source.
//! A failed fetch is returned as an error; callers render the error state
//! and skip bookmark reconciliation for that render.

pub mod client;
pub mod session;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use crate::bookmarks::{Bookmark, BookmarkSet};

pub use client::ApiClient;
pub use session::Session;
pub use types::{Comment, NewComment};

/// Failure talking to the user-content service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service returned errors: {0}")]
    GraphQl(String),

    #[error("response to {0} carried no data")]
    MissingData(&'static str),

    #[error("not signed in")]
    Unauthenticated,
}

/// Source of the signed-in user's bookmarks and of content comments
#[async_trait]
pub trait UserContentSource: Send + Sync {
    /// Fetch the user's bookmarks
    async fn list_bookmarks(&self) -> Result<BookmarkSet, ApiError>;

    /// Bookmark a piece of content
    async fn add_bookmark(&self, bookmark: &Bookmark) -> Result<(), ApiError>;

    /// Remove a bookmark
    async fn remove_bookmark(&self, bookmark: &Bookmark) -> Result<(), ApiError>;

    /// Comments on a piece of content, in service order
    async fn list_comments(&self, slug: &str) -> Result<Vec<Comment>, ApiError>;

    /// Publish a comment
    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, ApiError>;
}
