//! User entity: one row per armory account.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{Role, User};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: Option<String>,
    pub password_hash: String,
    /// Role tier stored as its uppercase name (EMPLOYEE, CO_PATRON, ...).
    pub role: String,
    pub color: Option<String>,
    pub commission: i32,
    pub contract_url: Option<String>,
    pub last_login: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft-delete marker; rows are never removed.
    pub deleted: bool,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::weapon::Entity")]
    Weapons,
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::weapon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weapons.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        // A malformed role in the database is treated as the lowest tier;
        // permission checks on raw strings stay fail-closed regardless.
        let role = model.role.parse::<Role>().unwrap_or(Role::Employee);
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            username: model.username,
            password_hash: model.password_hash,
            role,
            color: model.color,
            commission: model.commission,
            contract_url: model.contract_url,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted: model.deleted,
            deleted_at: model.deleted_at,
        }
    }
}
