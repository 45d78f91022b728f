//! GraphQL client for the user-content service.
//!
//! Bookmarks ("liked contents") require a signed-in session; comments can
//! be read and written anonymously, but the session is forwarded when set.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::session::Session;
use super::types::{Comment, Items, LikedContentItem, NewComment};
use super::{ApiError, UserContentSource};
use crate::bookmarks::{Bookmark, BookmarkSet};

const LIST_LIKED_CONTENTS: &str = r#"query ListLikedContents {
  listLikedContents(limit: 1000) {
    items { slug type }
  }
}"#;

const CREATE_LIKED_CONTENT: &str = r#"mutation CreateLikedContent($input: CreateLikedContentInput!) {
  createLikedContent(input: $input) { slug type }
}"#;

const DELETE_LIKED_CONTENT: &str = r#"mutation DeleteLikedContent($input: DeleteLikedContentInput!) {
  deleteLikedContent(input: $input) { slug type }
}"#;

const LIST_COMMENTS: &str = r#"query ListComments($slug: String!) {
  listComments(filter: { slug: { eq: $slug } }, limit: 1000) {
    items { id slug type firstName lastName comment createdAt }
  }
}"#;

const CREATE_COMMENT: &str = r#"mutation CreateComment($input: CreateCommentInput!) {
  createComment(input: $input) { id slug type firstName lastName comment createdAt }
}"#;

/// Response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListLikedContentsData {
    list_liked_contents: Items<LikedContentItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListCommentsData {
    list_comments: Items<Comment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCommentData {
    create_comment: Comment,
}

/// Client for the user-content GraphQL endpoint
pub struct ApiClient {
    /// GraphQL endpoint URL
    endpoint: String,
    /// Signed-in user, if any
    session: Option<Session>,
    /// HTTP client
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client with a request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            session: None,
            client,
        })
    }

    /// Attach the signed-in user's session
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn require_session(&self) -> Result<&Session, ApiError> {
        self.session.as_ref().ok_or(ApiError::Unauthenticated)
    }

    /// Run a query and decode its `data`
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Result<T, ApiError> {
        let mut request = self.client.post(&self.endpoint).json(&json!({
            "query": query,
            "variables": variables,
        }));
        if let Some(session) = &self.session {
            request = request.header(reqwest::header::AUTHORIZATION, session.authorization());
        }

        debug!(operation, endpoint = %self.endpoint, "Sending GraphQL request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> = response.json().await?;
        if !envelope.errors.is_empty() {
            let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::GraphQl(messages.join("; ")));
        }

        envelope.data.ok_or(ApiError::MissingData(operation))
    }

    async fn mutate_bookmark(
        &self,
        operation: &'static str,
        mutation: &str,
        bookmark: &Bookmark,
    ) -> Result<(), ApiError> {
        self.require_session()?;
        let _: Value = self
            .execute(operation, mutation, json!({ "input": bookmark }))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserContentSource for ApiClient {
    async fn list_bookmarks(&self) -> Result<BookmarkSet, ApiError> {
        self.require_session()?;
        let data: ListLikedContentsData = self
            .execute("listLikedContents", LIST_LIKED_CONTENTS, json!({}))
            .await?;

        let total = data.list_liked_contents.items.len();
        let bookmarks: BookmarkSet = data
            .list_liked_contents
            .items
            .into_iter()
            .filter_map(LikedContentItem::into_bookmark)
            .collect();

        if bookmarks.len() < total {
            debug!(
                dropped = total - bookmarks.len(),
                "Ignored liked contents without a known type"
            );
        }

        Ok(bookmarks)
    }

    async fn add_bookmark(&self, bookmark: &Bookmark) -> Result<(), ApiError> {
        self.mutate_bookmark("createLikedContent", CREATE_LIKED_CONTENT, bookmark)
            .await
    }

    async fn remove_bookmark(&self, bookmark: &Bookmark) -> Result<(), ApiError> {
        self.mutate_bookmark("deleteLikedContent", DELETE_LIKED_CONTENT, bookmark)
            .await
    }

    async fn list_comments(&self, slug: &str) -> Result<Vec<Comment>, ApiError> {
        let data: ListCommentsData = self
            .execute("listComments", LIST_COMMENTS, json!({ "slug": slug }))
            .await?;
        Ok(data.list_comments.items)
    }

    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        let data: CreateCommentData = self
            .execute("createComment", CREATE_COMMENT, json!({ "input": comment }))
            .await?;
        Ok(data.create_comment)
    }
}
