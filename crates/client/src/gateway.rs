//! Outbound ports to the remote services.
//!
//! Implemented by [`crate::HttpGateway`]; tests substitute in-memory fakes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use vetforum_core::{CategoryId, PostId};
use vetforum_forum::{AnswerSubmission, Category, CategoryDraft, PostDetail, PostSummary};
use vetforum_registration::ValidatedForm;

/// A remote collaborator failed or refused the call. Never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteCallFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    /// The request could not be built; nothing was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Acknowledgement of a write (registration, answer, category change).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReply {
    /// Server-provided message, when the body carries one.
    pub message: Option<String>,
    /// Raw response body.
    pub data: Value,
}

impl RemoteReply {
    pub fn from_body(data: Value) -> Self {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { message, data }
    }
}

/// Registration service.
#[async_trait::async_trait]
pub trait RegistrationGateway: Send + Sync {
    /// Submit a validated, role-coded form.
    async fn register(&self, form: &ValidatedForm) -> Result<RemoteReply, RemoteCallFailure>;
}

/// Forum post service.
#[async_trait::async_trait]
pub trait ForumGateway: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<PostSummary>, RemoteCallFailure>;

    async fn get_post(&self, id: &PostId) -> Result<PostDetail, RemoteCallFailure>;

    /// Post an answer keyed by `answer.post_id`.
    async fn add_answer(&self, answer: &AnswerSubmission) -> Result<RemoteReply, RemoteCallFailure>;
}

/// Forum category service.
#[async_trait::async_trait]
pub trait CategoryGateway: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, RemoteCallFailure>;

    async fn create_category(&self, draft: &CategoryDraft) -> Result<RemoteReply, RemoteCallFailure>;

    async fn update_category(
        &self,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> Result<RemoteReply, RemoteCallFailure>;

    async fn delete_category(&self, id: &CategoryId) -> Result<RemoteReply, RemoteCallFailure>;
}
