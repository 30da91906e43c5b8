//! Feedback service.
//!
//! Anyone logged in can submit; only developers triage. Submissions
//! start OPEN unless a developer sets an initial status.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{FeedbackResponse, FeedbackStatus};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::NewFeedback;
use crate::infra::Persistence;

/// Input for submitting feedback.
pub struct CreateFeedback {
    pub kind: String,
    pub title: String,
    pub description: String,
    pub status: FeedbackStatus,
    pub user_id: Option<i32>,
}

/// Feedback service trait for dependency injection.
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// All feedback, newest first (developer only, enforced by routing)
    async fn list_feedback(&self) -> AppResult<Vec<FeedbackResponse>>;

    /// Submit a feedback entry
    async fn create_feedback(&self, input: CreateFeedback) -> AppResult<FeedbackResponse>;

    /// Move an entry to a new workflow state
    async fn update_status(&self, id: i32, status: FeedbackStatus) -> AppResult<FeedbackResponse>;

    /// Remove a feedback entry
    async fn delete_feedback(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of FeedbackService.
pub struct FeedbackManager {
    persistence: Arc<Persistence>,
}

impl FeedbackManager {
    pub fn new(persistence: Arc<Persistence>) -> Self {
        Self { persistence }
    }

    async fn get_detailed(&self, id: i32) -> AppResult<FeedbackResponse> {
        let feedback = self
            .persistence
            .feedback()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        let user_name = match feedback.user_id {
            Some(user_id) => self
                .persistence
                .users()
                .find_by_id_any(user_id)
                .await?
                .map(|u| u.name),
            None => None,
        };

        Ok(FeedbackResponse::from_parts(feedback, user_name))
    }
}

#[async_trait]
impl FeedbackService for FeedbackManager {
    async fn list_feedback(&self) -> AppResult<Vec<FeedbackResponse>> {
        self.persistence.feedback().list().await
    }

    async fn create_feedback(&self, input: CreateFeedback) -> AppResult<FeedbackResponse> {
        let feedback = self
            .persistence
            .feedback()
            .insert(NewFeedback {
                kind: input.kind,
                title: input.title,
                description: input.description,
                status: input.status,
                user_id: input.user_id,
            })
            .await?;

        tracing::info!(feedback_id = feedback.id, "Feedback submitted");
        self.get_detailed(feedback.id).await
    }

    async fn update_status(&self, id: i32, status: FeedbackStatus) -> AppResult<FeedbackResponse> {
        self.persistence.feedback().update_status(id, status).await?;
        self.get_detailed(id).await
    }

    async fn delete_feedback(&self, id: i32) -> AppResult<()> {
        self.persistence.feedback().delete(id).await?;
        tracing::info!(feedback_id = id, "Feedback deleted");
        Ok(())
    }
}
