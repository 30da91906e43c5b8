//! Weapon inventory service.
//!
//! Creation and updates validate the referenced employee and base model,
//! fall back to the base model's default pricing when none is given, and
//! mirror every change to the Discord audit channel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{resolve_pricing, WeaponResponse};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::{NewWeapon, WeaponChanges};
use crate::infra::{DiscordNotifier, Persistence, WeaponAction};
use crate::types::{Paginated, PaginationParams};

/// Input for registering a weapon.
pub struct CreateWeapon {
    /// Sale timestamp; defaults to now.
    pub timestamp: Option<DateTime<Utc>>,
    pub user_id: i32,
    pub base_weapon_id: i32,
    pub holder: String,
    pub serial_number: String,
    /// Sale price in cents; defaults to the base model's price.
    pub price: Option<i32>,
    /// Production cost in cents; defaults to the base model's cost.
    pub production_cost: Option<i32>,
}

/// Partial weapon update.
#[derive(Default)]
pub struct UpdateWeapon {
    pub timestamp: Option<DateTime<Utc>>,
    pub user_id: Option<i32>,
    pub base_weapon_id: Option<i32>,
    pub holder: Option<String>,
    pub serial_number: Option<String>,
    pub price: Option<i32>,
    pub production_cost: Option<i32>,
}

/// Weapon service trait for dependency injection.
#[async_trait]
pub trait WeaponService: Send + Sync {
    /// Paginated weapons, newest first
    async fn list_weapons(&self, params: PaginationParams) -> AppResult<Paginated<WeaponResponse>>;

    /// Get a weapon with joined owner and base-model names
    async fn get_weapon(&self, id: i32) -> AppResult<WeaponResponse>;

    /// Register a weapon; `actor_name` is credited in the audit log
    async fn create_weapon(&self, actor_name: &str, input: CreateWeapon)
        -> AppResult<WeaponResponse>;

    /// Update a weapon
    async fn update_weapon(
        &self,
        actor_name: &str,
        id: i32,
        changes: UpdateWeapon,
    ) -> AppResult<WeaponResponse>;

    /// Remove a weapon permanently
    async fn delete_weapon(&self, actor_name: &str, id: i32) -> AppResult<()>;
}

/// Concrete implementation of WeaponService.
pub struct WeaponManager {
    persistence: Arc<Persistence>,
    discord: DiscordNotifier,
}

impl WeaponManager {
    pub fn new(persistence: Arc<Persistence>, discord: DiscordNotifier) -> Self {
        Self {
            persistence,
            discord,
        }
    }

    async fn require_user(&self, user_id: i32) -> AppResult<()> {
        self.persistence
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found()?;
        Ok(())
    }
}

#[async_trait]
impl WeaponService for WeaponManager {
    async fn list_weapons(&self, params: PaginationParams) -> AppResult<Paginated<WeaponResponse>> {
        let (weapons, total) = self.persistence.weapons().list(&params).await?;
        Ok(Paginated::new(weapons, params.page, params.limit(), total))
    }

    async fn get_weapon(&self, id: i32) -> AppResult<WeaponResponse> {
        self.persistence
            .weapons()
            .get_detailed(id)
            .await?
            .ok_or_not_found()
    }

    async fn create_weapon(
        &self,
        actor_name: &str,
        input: CreateWeapon,
    ) -> AppResult<WeaponResponse> {
        self.require_user(input.user_id).await?;

        let base = self
            .persistence
            .base_weapons()
            .find_by_id(input.base_weapon_id)
            .await?
            .ok_or_not_found()?;

        let (price, production_cost) =
            resolve_pricing(input.price, input.production_cost, &base);

        let weapon = self
            .persistence
            .weapons()
            .insert(NewWeapon {
                timestamp: input.timestamp.unwrap_or_else(Utc::now),
                user_id: input.user_id,
                base_weapon_id: input.base_weapon_id,
                holder: input.holder,
                serial_number: input.serial_number,
                price,
                production_cost,
            })
            .await?;

        self.discord
            .log_weapon_event(WeaponAction::Created, actor_name, &base.name, price, production_cost)
            .await;

        tracing::info!(weapon_id = weapon.id, user_id = weapon.user_id, "Weapon registered");
        self.get_weapon(weapon.id).await
    }

    async fn update_weapon(
        &self,
        actor_name: &str,
        id: i32,
        changes: UpdateWeapon,
    ) -> AppResult<WeaponResponse> {
        if let Some(user_id) = changes.user_id {
            self.require_user(user_id).await?;
        }
        if let Some(base_weapon_id) = changes.base_weapon_id {
            self.persistence
                .base_weapons()
                .find_by_id(base_weapon_id)
                .await?
                .ok_or_not_found()?;
        }

        let weapon = self
            .persistence
            .weapons()
            .update(
                id,
                WeaponChanges {
                    timestamp: changes.timestamp,
                    user_id: changes.user_id,
                    base_weapon_id: changes.base_weapon_id,
                    holder: changes.holder,
                    serial_number: changes.serial_number,
                    price: changes.price,
                    production_cost: changes.production_cost,
                },
            )
            .await?;

        let detailed = self.get_weapon(weapon.id).await?;
        let name = detailed
            .base_weapon_name
            .clone()
            .unwrap_or_else(|| detailed.serial_number.clone());

        self.discord
            .log_weapon_event(
                WeaponAction::Updated,
                actor_name,
                &name,
                detailed.price,
                detailed.production_cost,
            )
            .await;

        Ok(detailed)
    }

    async fn delete_weapon(&self, actor_name: &str, id: i32) -> AppResult<()> {
        let detailed = self.get_weapon(id).await?;
        self.persistence.weapons().delete(id).await?;

        let name = detailed
            .base_weapon_name
            .unwrap_or_else(|| detailed.serial_number.clone());

        self.discord
            .log_weapon_event(
                WeaponAction::Deleted,
                actor_name,
                &name,
                detailed.price,
                detailed.production_cost,
            )
            .await;

        tracing::info!(weapon_id = id, "Weapon removed");
        Ok(())
    }
}
