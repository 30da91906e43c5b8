//! Base weapon and weapon catalog repositories.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::{base_weapon, weapon_catalog};
use crate::domain::{BaseWeapon, CatalogEntry};
use crate::errors::{AppError, AppResult, OptionExt};

#[derive(Default)]
pub struct BaseWeaponChanges {
    pub name: Option<String>,
    pub default_price: Option<i32>,
    pub default_production_cost: Option<i32>,
}

pub struct BaseWeaponRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> BaseWeaponRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> AppResult<Vec<BaseWeapon>> {
        let models = base_weapon::Entity::find()
            .order_by_asc(base_weapon::Column::Name)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(BaseWeapon::from).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<BaseWeapon>> {
        let model = base_weapon::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(BaseWeapon::from))
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<BaseWeapon>> {
        let model = base_weapon::Entity::find()
            .filter(base_weapon::Column::Name.eq(name))
            .one(self.conn)
            .await?;
        Ok(model.map(BaseWeapon::from))
    }

    pub async fn insert(
        &self,
        name: String,
        default_price: i32,
        default_production_cost: i32,
    ) -> AppResult<BaseWeapon> {
        if self.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict("Base weapon"));
        }

        let now = Utc::now();
        let active = base_weapon::ActiveModel {
            name: Set(name),
            default_price: Set(default_price),
            default_production_cost: Set(default_production_cost),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(self.conn).await?;
        Ok(BaseWeapon::from(model))
    }

    /// Resolve a base weapon by name, creating it from the given defaults
    /// when absent. Idempotent by unique name.
    pub async fn get_or_create(
        &self,
        name: &str,
        default_price: i32,
        default_production_cost: i32,
    ) -> AppResult<BaseWeapon> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }

        let now = Utc::now();
        let active = base_weapon::ActiveModel {
            name: Set(name.to_string()),
            default_price: Set(default_price),
            default_production_cost: Set(default_production_cost),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(self.conn).await?;
        Ok(BaseWeapon::from(model))
    }

    pub async fn update(&self, id: i32, changes: BaseWeaponChanges) -> AppResult<BaseWeapon> {
        let model = base_weapon::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: base_weapon::ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(price) = changes.default_price {
            active.default_price = Set(price);
        }
        if let Some(cost) = changes.default_production_cost {
            active.default_production_cost = Set(cost);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(self.conn).await?;
        Ok(BaseWeapon::from(model))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = base_weapon::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Seed data shape for the read-only catalog.
pub struct NewCatalogEntry {
    pub name: &'static str,
    pub sale_price: i32,
    pub production_cost: i32,
}

pub struct CatalogRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CatalogRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> AppResult<Vec<CatalogEntry>> {
        let models = weapon_catalog::Entity::find()
            .order_by_asc(weapon_catalog::Column::Name)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(CatalogEntry::from).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<CatalogEntry>> {
        let model = weapon_catalog::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(CatalogEntry::from))
    }

    pub async fn count(&self) -> AppResult<u64> {
        let count = weapon_catalog::Entity::find().count(self.conn).await?;
        Ok(count)
    }

    /// Bulk insert the reference list (seed step only).
    pub async fn insert_many(&self, entries: &[NewCatalogEntry]) -> AppResult<()> {
        let models: Vec<weapon_catalog::ActiveModel> = entries
            .iter()
            .map(|entry| weapon_catalog::ActiveModel {
                name: Set(entry.name.to_string()),
                sale_price: Set(entry.sale_price),
                production_cost: Set(entry.production_cost),
                ..Default::default()
            })
            .collect();

        weapon_catalog::Entity::insert_many(models)
            .exec(self.conn)
            .await?;
        Ok(())
    }
}
