//! Base-weapon models and the read-only reference catalog.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{BaseWeapon, CatalogEntry};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::BaseWeaponChanges;
use crate::infra::Persistence;

/// Input for creating a base-weapon model.
pub struct CreateBaseWeapon {
    pub name: String,
    pub default_price: i32,
    pub default_production_cost: i32,
}

/// Partial base-weapon update.
#[derive(Default)]
pub struct UpdateBaseWeapon {
    pub name: Option<String>,
    pub default_price: Option<i32>,
    pub default_production_cost: Option<i32>,
}

/// Base-weapon service trait for dependency injection.
#[async_trait]
pub trait BaseWeaponService: Send + Sync {
    /// All base-weapon models, by name
    async fn list_base_weapons(&self) -> AppResult<Vec<BaseWeapon>>;

    /// Get a base-weapon model
    async fn get_base_weapon(&self, id: i32) -> AppResult<BaseWeapon>;

    /// Create a base-weapon model (duplicate names are rejected)
    async fn create_base_weapon(&self, input: CreateBaseWeapon) -> AppResult<BaseWeapon>;

    /// Update a base-weapon model. Defaults only apply to future
    /// weapons and orders; existing snapshots keep their prices.
    async fn update_base_weapon(&self, id: i32, changes: UpdateBaseWeapon)
        -> AppResult<BaseWeapon>;

    /// Delete a base-weapon model
    async fn delete_base_weapon(&self, id: i32) -> AppResult<()>;

    /// The seeded reference catalog, by name
    async fn list_catalog(&self) -> AppResult<Vec<CatalogEntry>>;
}

/// Concrete implementation of BaseWeaponService.
pub struct BaseWeaponManager {
    persistence: Arc<Persistence>,
}

impl BaseWeaponManager {
    pub fn new(persistence: Arc<Persistence>) -> Self {
        Self { persistence }
    }
}

#[async_trait]
impl BaseWeaponService for BaseWeaponManager {
    async fn list_base_weapons(&self) -> AppResult<Vec<BaseWeapon>> {
        self.persistence.base_weapons().list().await
    }

    async fn get_base_weapon(&self, id: i32) -> AppResult<BaseWeapon> {
        self.persistence
            .base_weapons()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn create_base_weapon(&self, input: CreateBaseWeapon) -> AppResult<BaseWeapon> {
        let base = self
            .persistence
            .base_weapons()
            .insert(input.name, input.default_price, input.default_production_cost)
            .await?;

        tracing::info!(base_weapon_id = base.id, name = %base.name, "Base weapon created");
        Ok(base)
    }

    async fn update_base_weapon(
        &self,
        id: i32,
        changes: UpdateBaseWeapon,
    ) -> AppResult<BaseWeapon> {
        if let Some(name) = &changes.name {
            // Renaming onto an existing model would break the unique name.
            if let Some(existing) = self.persistence.base_weapons().find_by_name(name).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Base weapon"));
                }
            }
        }

        self.persistence
            .base_weapons()
            .update(
                id,
                BaseWeaponChanges {
                    name: changes.name,
                    default_price: changes.default_price,
                    default_production_cost: changes.default_production_cost,
                },
            )
            .await
    }

    async fn delete_base_weapon(&self, id: i32) -> AppResult<()> {
        self.persistence.base_weapons().delete(id).await?;
        tracing::info!(base_weapon_id = id, "Base weapon deleted");
        Ok(())
    }

    async fn list_catalog(&self) -> AppResult<Vec<CatalogEntry>> {
        self.persistence.catalog().list().await
    }
}
