//! Order handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{OrderResponse, OrderStatus};
use crate::errors::AppResult;
use crate::services::{CreateOrderItem, OrderViewer};
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// One requested order line
#[derive(Debug, serde::Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemRequest {
    /// Existing base-weapon model
    pub base_weapon_id: Option<i32>,
    /// Reference catalog entry (alternative to base_weapon_id)
    pub catalog_entry_id: Option<i32>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 2, minimum = 1)]
    pub quantity: i32,
}

/// Order creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "An order needs at least one item"))]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
}

/// Order status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[schema(example = "COMPLETED")]
    pub status: OrderStatus,
}

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).delete(delete_order))
        .route("/:id/status", axum::routing::patch(update_order_status))
}

fn viewer_from(user: &CurrentUser) -> OrderViewer {
    OrderViewer {
        user_id: user.id,
        is_admin: user.is_admin(),
    }
}

/// List orders (paginated, newest first)
///
/// Admins see every order; employees only their own.
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(PaginationParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated order list", body = [OrderResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<OrderResponse>>> {
    let page = state
        .order_service
        .list_orders(viewer_from(&current_user), params)
        .await?;
    Ok(Json(page))
}

/// Get an order by ID
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 403, description = "Not the submitter and not an admin"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderResponse>> {
    let order = state
        .order_service
        .get_order(viewer_from(&current_user), id)
        .await?;
    Ok(Json(order))
}

/// Create a pending order
///
/// Unit prices are frozen into the order at creation; later base-weapon
/// edits do not change them.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Base weapon or catalog entry not found")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<Created<OrderResponse>> {
    let items = payload
        .items
        .into_iter()
        .map(|item| CreateOrderItem {
            base_weapon_id: item.base_weapon_id,
            catalog_entry_id: item.catalog_entry_id,
            quantity: item.quantity,
        })
        .collect();

    let order = state
        .order_service
        .create_order(current_user.id, items)
        .await?;

    Ok(Created(order))
}

/// Change an order's status (admin only)
///
/// Only PENDING orders can move, to COMPLETED or CANCELLED.
#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Illegal status transition"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<OrderResponse>> {
    require_admin(&current_user)?;

    let order = state
        .order_service
        .update_status(&current_user.name, id, payload.status)
        .await?;

    Ok(Json(order))
}

/// Delete an order (admin only)
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.order_service.delete_order(id).await?;
    Ok(NoContent)
}
