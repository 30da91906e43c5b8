//! Weapon inventory entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::catalog::BaseWeapon;

/// A sold or held weapon, recorded against an employee and a base model.
#[derive(Debug, Clone, Serialize)]
pub struct Weapon {
    pub id: i32,
    /// Sale entry timestamp (separate from row creation time).
    pub timestamp: DateTime<Utc>,
    pub user_id: i32,
    pub base_weapon_id: i32,
    /// Name of the in-game holder of the weapon.
    pub holder: String,
    /// Engraved serial / serigraphy text.
    pub serial_number: String,
    pub price: i32,
    pub production_cost: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Weapon shape returned to clients, with joined names.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeaponResponse {
    pub id: i32,
    pub timestamp: DateTime<Utc>,
    pub user_id: i32,
    pub user_name: Option<String>,
    pub base_weapon_id: i32,
    pub base_weapon_name: Option<String>,
    pub holder: String,
    pub serial_number: String,
    /// Sale price in cents.
    pub price: i32,
    /// Production cost in cents.
    pub production_cost: i32,
}

impl WeaponResponse {
    pub fn from_parts(
        weapon: Weapon,
        user_name: Option<String>,
        base_weapon_name: Option<String>,
    ) -> Self {
        Self {
            id: weapon.id,
            timestamp: weapon.timestamp,
            user_id: weapon.user_id,
            user_name,
            base_weapon_id: weapon.base_weapon_id,
            base_weapon_name,
            holder: weapon.holder,
            serial_number: weapon.serial_number,
            price: weapon.price,
            production_cost: weapon.production_cost,
        }
    }
}

/// Resolve the price/cost pair for a new weapon.
///
/// Explicit values win; the referenced base weapon's defaults fill the gaps.
pub fn resolve_pricing(
    price: Option<i32>,
    production_cost: Option<i32>,
    base: &BaseWeapon,
) -> (i32, i32) {
    (
        price.unwrap_or(base.default_price),
        production_cost.unwrap_or(base.default_production_cost),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn base() -> BaseWeapon {
        BaseWeapon {
            id: 1,
            name: "Colt 1911".to_string(),
            default_price: 55_000,
            default_production_cost: 21_000,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn falls_back_to_base_weapon_defaults() {
        assert_eq!(resolve_pricing(None, None, &base()), (55_000, 21_000));
    }

    #[test]
    fn explicit_values_win() {
        assert_eq!(
            resolve_pricing(Some(60_000), Some(20_000), &base()),
            (60_000, 20_000)
        );
    }

    #[test]
    fn partial_override() {
        assert_eq!(resolve_pricing(Some(60_000), None, &base()), (60_000, 21_000));
        assert_eq!(resolve_pricing(None, Some(19_000), &base()), (55_000, 19_000));
    }
}
