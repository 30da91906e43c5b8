//! Order workflow.
//!
//! Creation resolves every line against the base-weapon table or the
//! reference catalog, freezes unit prices into the order items, and
//! writes everything in one transaction. Status changes follow the
//! PENDING -> COMPLETED | CANCELLED machine; completions are announced
//! on Discord.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{total_price, OrderResponse, OrderStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::NewOrderItem;
use crate::infra::{DiscordNotifier, OrderLine, Persistence};
use crate::types::{Paginated, PaginationParams};

/// One requested order line. Exactly one of `base_weapon_id` and
/// `catalog_entry_id` must be set.
pub struct CreateOrderItem {
    pub base_weapon_id: Option<i32>,
    pub catalog_entry_id: Option<i32>,
    pub quantity: i32,
}

/// Who is looking at the order list; non-admins only see their own.
#[derive(Debug, Clone, Copy)]
pub struct OrderViewer {
    pub user_id: i32,
    pub is_admin: bool,
}

/// Order service trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create a pending order with price snapshots frozen at creation
    async fn create_order(
        &self,
        user_id: i32,
        items: Vec<CreateOrderItem>,
    ) -> AppResult<OrderResponse>;

    /// Paginated orders, newest first, scoped to the viewer
    async fn list_orders(
        &self,
        viewer: OrderViewer,
        params: PaginationParams,
    ) -> AppResult<Paginated<OrderResponse>>;

    /// Get one order; non-admins may only read their own
    async fn get_order(&self, viewer: OrderViewer, id: i32) -> AppResult<OrderResponse>;

    /// Move an order through the status machine
    async fn update_status(
        &self,
        actor_name: &str,
        id: i32,
        new_status: OrderStatus,
    ) -> AppResult<OrderResponse>;

    /// Remove an order and its items
    async fn delete_order(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of OrderService.
pub struct OrderManager {
    persistence: Arc<Persistence>,
    discord: DiscordNotifier,
}

impl OrderManager {
    pub fn new(persistence: Arc<Persistence>, discord: DiscordNotifier) -> Self {
        Self {
            persistence,
            discord,
        }
    }
}

#[async_trait]
impl OrderService for OrderManager {
    async fn create_order(
        &self,
        user_id: i32,
        items: Vec<CreateOrderItem>,
    ) -> AppResult<OrderResponse> {
        if items.is_empty() {
            return Err(AppError::validation("An order needs at least one item"));
        }

        let order = self
            .persistence
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut resolved: Vec<NewOrderItem> = Vec::with_capacity(items.len());

                    for item in items {
                        if item.quantity < 1 {
                            return Err(AppError::validation("Quantity must be at least 1"));
                        }

                        let (base_weapon_id, unit_price, unit_cost) =
                            match (item.base_weapon_id, item.catalog_entry_id) {
                                (Some(base_id), None) => {
                                    let base = ctx
                                        .base_weapons()
                                        .find_by_id(base_id)
                                        .await?
                                        .ok_or_not_found()?;
                                    (base.id, base.default_price, base.default_production_cost)
                                }
                                (None, Some(catalog_id)) => {
                                    let entry = ctx
                                        .catalog()
                                        .find_by_id(catalog_id)
                                        .await?
                                        .ok_or_not_found()?;
                                    // Catalog lines are backed by a base
                                    // weapon of the same name, created on
                                    // first use.
                                    let base = ctx
                                        .base_weapons()
                                        .get_or_create(
                                            &entry.name,
                                            entry.sale_price,
                                            entry.production_cost,
                                        )
                                        .await?;
                                    (base.id, entry.sale_price, entry.production_cost)
                                }
                                _ => {
                                    return Err(AppError::validation(
                                        "Each item needs exactly one of base_weapon_id or catalog_entry_id",
                                    ));
                                }
                            };

                        resolved.push(NewOrderItem {
                            base_weapon_id,
                            quantity: item.quantity,
                            unit_price,
                            unit_cost,
                        });
                    }

                    let total = total_price(
                        &resolved
                            .iter()
                            .map(|i| (i.unit_price, i.quantity))
                            .collect::<Vec<_>>(),
                    )
                    .ok_or_else(|| {
                        AppError::validation("Order total exceeds the maximum supported amount")
                    })?;

                    ctx.orders().insert(user_id, total, resolved).await
                })
            })
            .await?;

        tracing::info!(order_id = order.id, user_id, total = order.total_price, "Order created");
        self.persistence
            .orders()
            .get_detailed(order.id)
            .await?
            .ok_or_not_found()
    }

    async fn list_orders(
        &self,
        viewer: OrderViewer,
        params: PaginationParams,
    ) -> AppResult<Paginated<OrderResponse>> {
        let user_filter = if viewer.is_admin {
            None
        } else {
            Some(viewer.user_id)
        };

        // Count and page read the same snapshot.
        let query_params = params.clone();
        let (orders, total) = self
            .persistence
            .transaction(move |ctx| {
                Box::pin(async move { ctx.orders().list(user_filter, &query_params).await })
            })
            .await?;
        Ok(Paginated::new(orders, params.page, params.limit(), total))
    }

    async fn get_order(&self, viewer: OrderViewer, id: i32) -> AppResult<OrderResponse> {
        let order = self
            .persistence
            .orders()
            .get_detailed(id)
            .await?
            .ok_or_not_found()?;

        let owner_id = order.user.as_ref().map(|u| u.id);
        if !viewer.is_admin && owner_id != Some(viewer.user_id) {
            return Err(AppError::Forbidden);
        }

        Ok(order)
    }

    async fn update_status(
        &self,
        actor_name: &str,
        id: i32,
        new_status: OrderStatus,
    ) -> AppResult<OrderResponse> {
        let order = self
            .persistence
            .orders()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        if !order.status.can_transition_to(new_status) {
            return Err(AppError::bad_request(format!(
                "Cannot move order from {} to {}",
                order.status, new_status
            )));
        }

        self.persistence.orders().update_status(id, new_status).await?;
        let detailed = self
            .persistence
            .orders()
            .get_detailed(id)
            .await?
            .ok_or_not_found()?;

        tracing::info!(order_id = id, status = %new_status, "Order status updated");

        if new_status == OrderStatus::Completed {
            let lines: Vec<OrderLine> = detailed
                .items
                .iter()
                .map(|item| OrderLine {
                    name: item
                        .base_weapon_name
                        .clone()
                        .unwrap_or_else(|| format!("#{}", item.base_weapon_id)),
                    quantity: item.quantity,
                })
                .collect();

            let profit: i64 = detailed
                .items
                .iter()
                .map(|item| i64::from(item.unit_price - item.unit_cost) * i64::from(item.quantity))
                .sum();

            self.discord
                .notify_order_completed(actor_name, &lines, i64::from(detailed.total_price), profit)
                .await;
        }

        Ok(detailed)
    }

    async fn delete_order(&self, id: i32) -> AppResult<()> {
        self.persistence.orders().delete(id).await?;
        tracing::info!(order_id = id, "Order deleted");
        Ok(())
    }
}
