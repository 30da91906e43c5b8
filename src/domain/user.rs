//! User domain entity.
//!
//! There is a single canonical identity model: every person at the armory
//! is a `User` carrying a [`Role`]. Accounts are soft-deleted only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::Role;

/// User domain entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub color: Option<String>,
    /// Commission override in percent; the role table supplies the rate
    /// actually applied when this is zero.
    pub commission: i32,
    pub contract_url: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// User shape returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[schema(example = "EMPLOYEE")]
    pub role: String,
    pub color: Option<String>,
    pub commission: i32,
    pub contract_url: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            username: user.username,
            role: user.role.to_string(),
            color: user.color,
            commission: user.commission,
            contract_url: user.contract_url,
            last_login: user.last_login,
            created_at: user.created_at,
            deleted: user.deleted,
        }
    }
}
