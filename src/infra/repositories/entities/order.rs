//! Order entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{Order, OrderStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    /// Frozen order total in cents.
    pub total_price: i32,
    /// PENDING, COMPLETED or CANCELLED.
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(model: Model) -> Self {
        let status = model.status.parse::<OrderStatus>().unwrap_or(OrderStatus::Pending);
        Order {
            id: model.id,
            user_id: model.user_id,
            total_price: model.total_price,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
