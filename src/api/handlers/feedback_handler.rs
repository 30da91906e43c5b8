//! Feedback handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_developer, CurrentUser};
use crate::api::AppState;
use crate::domain::{FeedbackResponse, FeedbackStatus};
use crate::errors::AppResult;
use crate::services::CreateFeedback;
use crate::types::{Created, NoContent};

/// Feedback submission request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFeedbackRequest {
    /// Free-form category (bug, suggestion, ...)
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    #[schema(example = "bug")]
    pub kind: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Initial status; only honored for developers
    pub status: Option<FeedbackStatus>,
    /// Submitter override; defaults to the session user
    pub user_id: Option<i32>,
}

/// Feedback triage request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFeedbackStatusRequest {
    #[schema(example = "IN_PROGRESS")]
    pub status: FeedbackStatus,
}

/// Create feedback routes
pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_feedback).post(create_feedback))
        .route(
            "/:id",
            axum::routing::patch(update_feedback_status).delete(delete_feedback),
        )
}

/// List all feedback (developer only)
#[utoipa::path(
    get,
    path = "/api/feedback",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All feedback entries", body = [FeedbackResponse]),
        (status = 403, description = "Developer role required")
    )
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<FeedbackResponse>>> {
    require_developer(&current_user)?;
    let entries = state.feedback_service.list_feedback().await?;
    Ok(Json(entries))
}

/// Submit feedback
///
/// Entries start OPEN unless a developer supplies an initial status;
/// the submitter defaults to the session user.
#[utoipa::path(
    post,
    path = "/api/feedback",
    tag = "Feedback",
    request_body = CreateFeedbackRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Feedback submitted", body = FeedbackResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateFeedbackRequest>,
) -> AppResult<Created<FeedbackResponse>> {
    let status = match payload.status {
        Some(status) if current_user.role.is_system_admin() => status,
        _ => FeedbackStatus::Open,
    };

    let feedback = state
        .feedback_service
        .create_feedback(CreateFeedback {
            kind: payload.kind,
            title: payload.title,
            description: payload.description,
            status,
            user_id: payload.user_id.or(Some(current_user.id)),
        })
        .await?;

    Ok(Created(feedback))
}

/// Triage a feedback entry (developer only)
#[utoipa::path(
    patch,
    path = "/api/feedback/{id}",
    tag = "Feedback",
    params(("id" = i32, Path, description = "Feedback ID")),
    request_body = UpdateFeedbackStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status updated", body = FeedbackResponse),
        (status = 403, description = "Developer role required"),
        (status = 404, description = "Feedback not found")
    )
)]
pub async fn update_feedback_status(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFeedbackStatusRequest>,
) -> AppResult<Json<FeedbackResponse>> {
    require_developer(&current_user)?;
    let feedback = state
        .feedback_service
        .update_status(id, payload.status)
        .await?;
    Ok(Json(feedback))
}

/// Delete a feedback entry (developer only)
#[utoipa::path(
    delete,
    path = "/api/feedback/{id}",
    tag = "Feedback",
    params(("id" = i32, Path, description = "Feedback ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Feedback deleted"),
        (status = 403, description = "Developer role required"),
        (status = 404, description = "Feedback not found")
    )
)]
pub async fn delete_feedback(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    require_developer(&current_user)?;
    state.feedback_service.delete_feedback(id).await?;
    Ok(NoContent)
}
