//! Weapon repository.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::{base_weapon, user, weapon};
use crate::domain::{Weapon, WeaponResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

pub struct NewWeapon {
    pub timestamp: DateTime<Utc>,
    pub user_id: i32,
    pub base_weapon_id: i32,
    pub holder: String,
    pub serial_number: String,
    pub price: i32,
    pub production_cost: i32,
}

#[derive(Default)]
pub struct WeaponChanges {
    pub timestamp: Option<DateTime<Utc>>,
    pub user_id: Option<i32>,
    pub base_weapon_id: Option<i32>,
    pub holder: Option<String>,
    pub serial_number: Option<String>,
    pub price: Option<i32>,
    pub production_cost: Option<i32>,
}

pub struct WeaponRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> WeaponRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Weapon>> {
        let model = weapon::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(Weapon::from))
    }

    /// Paginated weapons, newest first, with owner and base-weapon names
    /// joined in (two lookup queries instead of per-row fetches).
    pub async fn list(
        &self,
        params: &PaginationParams,
    ) -> AppResult<(Vec<WeaponResponse>, u64)> {
        let paginator = weapon::Entity::find()
            .order_by_desc(weapon::Column::Timestamp)
            .paginate(self.conn, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        let responses = self.hydrate(models).await?;
        Ok((responses, total))
    }

    /// Single weapon with joined names.
    pub async fn get_detailed(&self, id: i32) -> AppResult<Option<WeaponResponse>> {
        let Some(model) = weapon::Entity::find_by_id(id).one(self.conn).await? else {
            return Ok(None);
        };

        let mut hydrated = self.hydrate(vec![model]).await?;
        Ok(hydrated.pop())
    }

    pub async fn insert(&self, new_weapon: NewWeapon) -> AppResult<Weapon> {
        let now = Utc::now();
        let active = weapon::ActiveModel {
            timestamp: Set(new_weapon.timestamp),
            user_id: Set(new_weapon.user_id),
            base_weapon_id: Set(new_weapon.base_weapon_id),
            holder: Set(new_weapon.holder),
            serial_number: Set(new_weapon.serial_number),
            price: Set(new_weapon.price),
            production_cost: Set(new_weapon.production_cost),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(self.conn).await?;
        Ok(Weapon::from(model))
    }

    pub async fn update(&self, id: i32, changes: WeaponChanges) -> AppResult<Weapon> {
        let model = weapon::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: weapon::ActiveModel = model.into();

        if let Some(timestamp) = changes.timestamp {
            active.timestamp = Set(timestamp);
        }
        if let Some(user_id) = changes.user_id {
            active.user_id = Set(user_id);
        }
        if let Some(base_weapon_id) = changes.base_weapon_id {
            active.base_weapon_id = Set(base_weapon_id);
        }
        if let Some(holder) = changes.holder {
            active.holder = Set(holder);
        }
        if let Some(serial_number) = changes.serial_number {
            active.serial_number = Set(serial_number);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(production_cost) = changes.production_cost {
            active.production_cost = Set(production_cost);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(self.conn).await?;
        Ok(Weapon::from(model))
    }

    /// Hard delete (weapons are the one entity admins may remove).
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = weapon::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Move every weapon owned by `from_user_id` to `to_user_id`.
    /// Returns the number of rows moved.
    pub async fn reassign_owner(&self, from_user_id: i32, to_user_id: i32) -> AppResult<u64> {
        let result = weapon::Entity::update_many()
            .col_expr(weapon::Column::UserId, Expr::value(to_user_id))
            .col_expr(weapon::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(weapon::Column::UserId.eq(from_user_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Number of weapons owned by a user (blocks user deletion).
    pub async fn count_by_user(&self, user_id: i32) -> AppResult<u64> {
        let count = weapon::Entity::find()
            .filter(weapon::Column::UserId.eq(user_id))
            .count(self.conn)
            .await?;
        Ok(count)
    }

    async fn hydrate(&self, models: Vec<weapon::Model>) -> AppResult<Vec<WeaponResponse>> {
        let user_ids: Vec<i32> = models.iter().map(|w| w.user_id).collect();
        let base_ids: Vec<i32> = models.iter().map(|w| w.base_weapon_id).collect();

        let users: HashMap<i32, String> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let base_weapons: HashMap<i32, String> = base_weapon::Entity::find()
            .filter(base_weapon::Column::Id.is_in(base_ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect();

        Ok(models
            .into_iter()
            .map(|model| {
                let user_name = users.get(&model.user_id).cloned();
                let base_name = base_weapons.get(&model.base_weapon_id).cloned();
                WeaponResponse::from_parts(Weapon::from(model), user_name, base_name)
            })
            .collect())
    }
}
