//! Orders and their price-frozen items.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Order lifecycle. New orders start PENDING; the only legal transitions
/// are PENDING -> COMPLETED and PENDING -> CANCELLED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order aggregate root.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub total_price: i32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order line with unit price/cost frozen at creation time.
///
/// The snapshot never changes, even when the referenced base weapon's
/// defaults are edited later.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub base_weapon_id: i32,
    pub quantity: i32,
    pub unit_price: i32,
    pub unit_cost: i32,
}

impl OrderItem {
    /// Widened so large quantities cannot wrap the line amount.
    pub fn line_total(&self) -> i64 {
        i64::from(self.unit_price) * i64::from(self.quantity)
    }
}

/// Sum of line totals for an order, or `None` when the total does not
/// fit the stored cent amount.
pub(crate) fn total_price(items: &[(i32, i32)]) -> Option<i32> {
    // (unit_price, quantity) pairs
    let total: i64 = items
        .iter()
        .map(|&(price, qty)| i64::from(price) * i64::from(qty))
        .sum();
    i32::try_from(total).ok()
}

/// Minimal submitter info embedded in order responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderUserInfo {
    pub id: i32,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i32,
    pub base_weapon_id: i32,
    pub base_weapon_name: Option<String>,
    pub quantity: i32,
    pub unit_price: i32,
    pub unit_cost: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub user: Option<OrderUserInfo>,
    pub total_price: i32,
    pub status: OrderStatus,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_complete_or_cancel() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn terminal_states_are_frozen() {
        for from in [OrderStatus::Completed, OrderStatus::Cancelled] {
            for to in [
                OrderStatus::Pending,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ] {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn self_transition_is_rejected() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn unknown_status_string_rejected() {
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
        assert_eq!("PENDING".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
    }

    #[test]
    fn total_is_sum_of_lines() {
        assert_eq!(total_price(&[(55_000, 2), (30_000, 1)]), Some(140_000));
        assert_eq!(total_price(&[]), Some(0));
    }

    #[test]
    fn total_over_the_cent_limit_is_rejected() {
        // 210_000 * 20_000 = 4.2e9, past i32::MAX.
        assert_eq!(total_price(&[(210_000, 20_000)]), None);
        assert_eq!(total_price(&[(i32::MAX, 1), (1, 1)]), None);
        assert_eq!(total_price(&[(i32::MAX, 1)]), Some(i32::MAX));
    }

    #[test]
    fn line_totals_do_not_wrap() {
        let item = OrderItem {
            id: 1,
            order_id: 1,
            base_weapon_id: 1,
            quantity: 20_000,
            unit_price: 210_000,
            unit_cost: 150_000,
        };
        assert_eq!(item.line_total(), 4_200_000_000);
    }
}
