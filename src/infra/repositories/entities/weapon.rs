//! Weapon entity: inventory rows, hard-deleted by admins.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Weapon;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weapons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Sale entry timestamp, distinct from row bookkeeping times.
    pub timestamp: DateTimeUtc,
    pub user_id: i32,
    pub base_weapon_id: i32,
    pub holder: String,
    pub serial_number: String,
    pub price: i32,
    pub production_cost: i32,
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
    #[sea_orm(
        belongs_to = "super::base_weapon::Entity",
        from = "Column::BaseWeaponId",
        to = "super::base_weapon::Column::Id"
    )]
    BaseWeapon,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::base_weapon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseWeapon.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Weapon {
    fn from(model: Model) -> Self {
        Weapon {
            id: model.id,
            timestamp: model.timestamp,
            user_id: model.user_id,
            base_weapon_id: model.base_weapon_id,
            holder: model.holder,
            serial_number: model.serial_number,
            price: model.price,
            production_cost: model.production_cost,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
