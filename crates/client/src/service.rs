//! Use cases invoked by the UI handlers.
//!
//! Each use case does its local work (validation, identity resolution)
//! synchronously and only then awaits the gateway. Nothing is sent when the
//! local step fails.

use std::sync::Arc;

use vetforum_auth::SessionIdentityResolver;
use vetforum_core::{CategoryId, PostId};
use vetforum_forum::{AnswerSubmission, Category, CategoryDraft, PostDetail, PostSummary};
use vetforum_registration::{RegistrationForm, validate_submission};

use crate::error::ClientError;
use crate::gateway::{CategoryGateway, ForumGateway, RegistrationGateway, RemoteReply};

pub struct RegistrationService {
    gateway: Arc<dyn RegistrationGateway>,
}

impl RegistrationService {
    pub fn new(gateway: Arc<dyn RegistrationGateway>) -> Self {
        Self { gateway }
    }

    /// Validate `form` against `confirmation`, then submit it.
    pub async fn register(
        &self,
        form: &RegistrationForm,
        confirmation: &str,
    ) -> Result<RemoteReply, ClientError> {
        let validated = validate_submission(form, confirmation)?;
        let reply = self.gateway.register(&validated).await?;
        tracing::info!(kind = %validated.profile_kind, "registration accepted");
        Ok(reply)
    }
}

pub struct ForumService {
    gateway: Arc<dyn ForumGateway>,
    resolver: Arc<SessionIdentityResolver>,
}

impl ForumService {
    pub fn new(gateway: Arc<dyn ForumGateway>, resolver: Arc<SessionIdentityResolver>) -> Self {
        Self { gateway, resolver }
    }

    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, ClientError> {
        Ok(self.gateway.list_posts().await?)
    }

    pub async fn post_detail(&self, id: &PostId) -> Result<PostDetail, ClientError> {
        Ok(self.gateway.get_post(id).await?)
    }

    /// Answer `post_id` as the principal of the stored session.
    pub async fn submit_answer(
        &self,
        post_id: PostId,
        body: impl Into<String>,
    ) -> Result<RemoteReply, ClientError> {
        let answer = AnswerSubmission::compose(post_id, &self.resolver, body)?;
        let reply = self.gateway.add_answer(&answer).await?;
        tracing::info!(post_id = %answer.post_id, "answer accepted");
        Ok(reply)
    }
}

pub struct CategoryService {
    gateway: Arc<dyn CategoryGateway>,
}

impl CategoryService {
    pub fn new(gateway: Arc<dyn CategoryGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ClientError> {
        Ok(self.gateway.list_categories().await?)
    }

    pub async fn create(&self, name: &str) -> Result<RemoteReply, ClientError> {
        let draft = CategoryDraft::new(name)?;
        Ok(self.gateway.create_category(&draft).await?)
    }

    pub async fn rename(&self, id: &CategoryId, name: &str) -> Result<RemoteReply, ClientError> {
        let draft = CategoryDraft::new(name)?;
        Ok(self.gateway.update_category(id, &draft).await?)
    }

    pub async fn delete(&self, id: &CategoryId) -> Result<RemoteReply, ClientError> {
        Ok(self.gateway.delete_category(id).await?)
    }
}
