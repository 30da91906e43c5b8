//! Base weapon entity: catalog template with default pricing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::BaseWeapon;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "base_weapons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    /// Default sale price in cents.
    pub default_price: i32,
    /// Default production cost in cents.
    pub default_production_cost: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::weapon::Entity")]
    Weapons,
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::weapon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weapons.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BaseWeapon {
    fn from(model: Model) -> Self {
        BaseWeapon {
            id: model.id,
            name: model.name,
            default_price: model.default_price,
            default_production_cost: model.default_production_cost,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
