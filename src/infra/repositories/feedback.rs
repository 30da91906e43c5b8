//! Feedback repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set,
};

use super::entities::feedback;
use crate::domain::{Feedback, FeedbackResponse, FeedbackStatus};
use crate::errors::{AppError, AppResult, OptionExt};

pub struct NewFeedback {
    pub kind: String,
    pub title: String,
    pub description: String,
    pub status: FeedbackStatus,
    pub user_id: Option<i32>,
}

pub struct FeedbackRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> FeedbackRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// All feedback, newest first, with the submitter's name joined in.
    pub async fn list(&self) -> AppResult<Vec<FeedbackResponse>> {
        let rows = feedback::Entity::find()
            .find_also_related(super::entities::user::Entity)
            .order_by_desc(feedback::Column::CreatedAt)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, submitter)| {
                FeedbackResponse::from_parts(Feedback::from(model), submitter.map(|u| u.name))
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Feedback>> {
        let model = feedback::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(Feedback::from))
    }

    pub async fn insert(&self, new_feedback: NewFeedback) -> AppResult<Feedback> {
        let now = Utc::now();
        let active = feedback::ActiveModel {
            kind: Set(new_feedback.kind),
            title: Set(new_feedback.title),
            description: Set(new_feedback.description),
            status: Set(new_feedback.status.as_str().to_string()),
            user_id: Set(new_feedback.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(self.conn).await?;
        Ok(Feedback::from(model))
    }

    pub async fn update_status(&self, id: i32, status: FeedbackStatus) -> AppResult<Feedback> {
        let model = feedback::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: feedback::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(self.conn).await?;
        Ok(Feedback::from(model))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = feedback::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
