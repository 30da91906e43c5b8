//! Order item entity: quantity plus a price/cost snapshot frozen at
//! order creation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::OrderItem;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub base_weapon_id: i32,
    pub quantity: i32,
    /// Unit price in cents at the time the order was created.
    pub unit_price: i32,
    /// Unit production cost in cents at the time the order was created.
    pub unit_cost: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::base_weapon::Entity",
        from = "Column::BaseWeaponId",
        to = "super::base_weapon::Column::Id"
    )]
    BaseWeapon,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::base_weapon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseWeapon.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OrderItem {
    fn from(model: Model) -> Self {
        OrderItem {
            id: model.id,
            order_id: model.order_id,
            base_weapon_id: model.base_weapon_id,
            quantity: model.quantity,
            unit_price: model.unit_price,
            unit_cost: model.unit_cost,
        }
    }
}
