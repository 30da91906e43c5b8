//! Order repository.
//!
//! Order creation inserts the order row plus its price-frozen items;
//! callers run it inside a transaction so a failed item insert leaves
//! no partial order behind.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::{base_weapon, order, order_item, user};
use crate::domain::{
    Order, OrderItemResponse, OrderResponse, OrderStatus, OrderUserInfo,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

/// Item line ready for insertion, snapshot already resolved.
pub struct NewOrderItem {
    pub base_weapon_id: i32,
    pub quantity: i32,
    pub unit_price: i32,
    pub unit_cost: i32,
}

pub struct OrderRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Order>> {
        let model = order::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(Order::from))
    }

    /// Paginated orders, newest first. `user_filter` restricts the list
    /// to one submitter (non-admin callers).
    pub async fn list(
        &self,
        user_filter: Option<i32>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<OrderResponse>, u64)> {
        let mut condition = Condition::all();
        if let Some(user_id) = user_filter {
            condition = condition.add(order::Column::UserId.eq(user_id));
        }

        let paginator = order::Entity::find()
            .filter(condition)
            .order_by_desc(order::Column::CreatedAt)
            .paginate(self.conn, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        let responses = self.hydrate(models).await?;
        Ok((responses, total))
    }

    /// Single order with submitter and items joined in.
    pub async fn get_detailed(&self, id: i32) -> AppResult<Option<OrderResponse>> {
        let Some(model) = order::Entity::find_by_id(id).one(self.conn).await? else {
            return Ok(None);
        };

        let mut hydrated = self.hydrate(vec![model]).await?;
        Ok(hydrated.pop())
    }

    /// Insert an order and all of its items.
    pub async fn insert(
        &self,
        user_id: i32,
        total_price: i32,
        items: Vec<NewOrderItem>,
    ) -> AppResult<Order> {
        let now = Utc::now();
        let active = order::ActiveModel {
            user_id: Set(user_id),
            total_price: Set(total_price),
            status: Set(OrderStatus::Pending.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(self.conn).await?;

        for item in items {
            let active_item = order_item::ActiveModel {
                order_id: Set(model.id),
                base_weapon_id: Set(item.base_weapon_id),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                unit_cost: Set(item.unit_cost),
                ..Default::default()
            };
            active_item.insert(self.conn).await?;
        }

        Ok(Order::from(model))
    }

    pub async fn update_status(&self, id: i32, status: OrderStatus) -> AppResult<Order> {
        let model = order::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: order::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(self.conn).await?;
        Ok(Order::from(model))
    }

    /// Hard delete; items go with the order via the cascade constraint.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = order::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn hydrate(&self, models: Vec<order::Model>) -> AppResult<Vec<OrderResponse>> {
        let order_ids: Vec<i32> = models.iter().map(|o| o.id).collect();
        let user_ids: Vec<i32> = models.iter().map(|o| o.user_id).collect();

        let users: HashMap<i32, OrderUserInfo> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    OrderUserInfo {
                        id: u.id,
                        name: u.name,
                        role: u.role,
                    },
                )
            })
            .collect();

        let items = order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .all(self.conn)
            .await?;

        let base_ids: Vec<i32> = items.iter().map(|i| i.base_weapon_id).collect();
        let base_names: HashMap<i32, String> = base_weapon::Entity::find()
            .filter(base_weapon::Column::Id.is_in(base_ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect();

        let mut items_by_order: HashMap<i32, Vec<OrderItemResponse>> = HashMap::new();
        for item in items {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderItemResponse {
                    id: item.id,
                    base_weapon_id: item.base_weapon_id,
                    base_weapon_name: base_names.get(&item.base_weapon_id).cloned(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    unit_cost: item.unit_cost,
                });
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let order = Order::from(model);
                OrderResponse {
                    id: order.id,
                    user: users.get(&order.user_id).cloned(),
                    total_price: order.total_price,
                    status: order.status,
                    items: items_by_order.remove(&order.id).unwrap_or_default(),
                    created_at: order.created_at,
                }
            })
            .collect())
    }
}
