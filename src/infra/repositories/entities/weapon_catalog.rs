//! Weapon catalog entity: read-only reference pricing list.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::CatalogEntry;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weapon_catalog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub sale_price: i32,
    pub production_cost: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CatalogEntry {
    fn from(model: Model) -> Self {
        CatalogEntry {
            id: model.id,
            name: model.name,
            sale_price: model.sale_price,
            production_cost: model.production_cost,
        }
    }
}
