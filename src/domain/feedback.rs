//! User feedback entries: bug reports, suggestions and the like.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Feedback workflow state. Only developers move entries past OPEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Open => "OPEN",
            FeedbackStatus::InProgress => "IN_PROGRESS",
            FeedbackStatus::Resolved => "RESOLVED",
            FeedbackStatus::Closed => "CLOSED",
        }
    }
}

impl FromStr for FeedbackStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(FeedbackStatus::Open),
            "IN_PROGRESS" => Ok(FeedbackStatus::InProgress),
            "RESOLVED" => Ok(FeedbackStatus::Resolved),
            "CLOSED" => Ok(FeedbackStatus::Closed),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Feedback {
    pub id: i32,
    /// Free-form category supplied by the submitter (bug, suggestion, ...).
    pub kind: String,
    pub title: String,
    pub description: String,
    pub status: FeedbackStatus,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub status: FeedbackStatus,
    pub user_id: Option<i32>,
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FeedbackResponse {
    pub fn from_parts(feedback: Feedback, user_name: Option<String>) -> Self {
        Self {
            id: feedback.id,
            kind: feedback.kind,
            title: feedback.title,
            description: feedback.description,
            status: feedback.status,
            user_id: feedback.user_id,
            user_name,
            created_at: feedback.created_at,
        }
    }
}
