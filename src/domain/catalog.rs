//! Base weapon templates and the read-only weapon catalog.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Catalog template defining defaults for a weapon model.
///
/// Weapons and order items reference a base weapon; its default price and
/// production cost (both in cents) fill in whatever the caller omits.
#[derive(Debug, Clone, Serialize)]
pub struct BaseWeapon {
    pub id: i32,
    pub name: String,
    pub default_price: i32,
    pub default_production_cost: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BaseWeaponResponse {
    pub id: i32,
    pub name: String,
    /// Default sale price in cents.
    pub default_price: i32,
    /// Default production cost in cents.
    pub default_production_cost: i32,
}

impl From<BaseWeapon> for BaseWeaponResponse {
    fn from(base: BaseWeapon) -> Self {
        Self {
            id: base.id,
            name: base.name,
            default_price: base.default_price,
            default_production_cost: base.default_production_cost,
        }
    }
}

/// Read-only reference entry seeding base weapons on demand.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: i32,
    pub name: String,
    pub sale_price: i32,
    pub production_cost: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogEntryResponse {
    pub id: i32,
    pub name: String,
    pub sale_price: i32,
    pub production_cost: i32,
}

impl From<CatalogEntry> for CatalogEntryResponse {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            sale_price: entry.sale_price,
            production_cost: entry.production_cost,
        }
    }
}
