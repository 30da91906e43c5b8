//! Weapon inventory handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_permission, CurrentUser};
use crate::api::AppState;
use crate::domain::{CatalogEntryResponse, Permission, WeaponResponse};
use crate::errors::AppResult;
use crate::services::{CreateWeapon, UpdateWeapon};
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Weapon registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWeaponRequest {
    /// Sale timestamp; defaults to now
    pub timestamp: Option<DateTime<Utc>>,
    /// Selling employee
    pub user_id: i32,
    /// Base weapon model
    pub base_weapon_id: i32,
    /// In-game holder of the weapon
    #[validate(length(min = 1, message = "Holder is required"))]
    #[schema(example = "John Smith")]
    pub holder: String,
    /// Engraved serial / serigraphy text
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    /// Sale price in cents; defaults to the model's price
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i32>,
    /// Production cost in cents; defaults to the model's cost
    #[validate(range(min = 0, message = "Production cost cannot be negative"))]
    pub production_cost: Option<i32>,
}

/// Weapon update request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateWeaponRequest {
    pub timestamp: Option<DateTime<Utc>>,
    pub user_id: Option<i32>,
    pub base_weapon_id: Option<i32>,
    #[validate(length(min = 1, message = "Holder cannot be empty"))]
    pub holder: Option<String>,
    #[validate(length(min = 1, message = "Serial number cannot be empty"))]
    pub serial_number: Option<String>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i32>,
    #[validate(range(min = 0, message = "Production cost cannot be negative"))]
    pub production_cost: Option<i32>,
}

/// Create weapon routes
pub fn weapon_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_weapons).post(create_weapon))
        .route("/catalog", get(list_catalog))
        .route(
            "/:id",
            get(get_weapon).patch(update_weapon).delete(delete_weapon),
        )
}

/// List weapons (paginated, newest first)
#[utoipa::path(
    get,
    path = "/api/weapons",
    tag = "Weapons",
    params(PaginationParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated weapon list", body = [WeaponResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_weapons(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<WeaponResponse>>> {
    let page = state.weapon_service.list_weapons(params).await?;
    Ok(Json(page))
}

/// The reference weapon catalog
#[utoipa::path(
    get,
    path = "/api/weapons/catalog",
    tag = "Weapons",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Catalog entries", body = [CatalogEntryResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_catalog(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CatalogEntryResponse>>> {
    let entries = state.base_weapon_service.list_catalog().await?;
    Ok(Json(
        entries.into_iter().map(CatalogEntryResponse::from).collect(),
    ))
}

/// Get a weapon by ID
#[utoipa::path(
    get,
    path = "/api/weapons/{id}",
    tag = "Weapons",
    params(("id" = i32, Path, description = "Weapon ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Weapon found", body = WeaponResponse),
        (status = 404, description = "Weapon not found")
    )
)]
pub async fn get_weapon(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<WeaponResponse>> {
    let weapon = state.weapon_service.get_weapon(id).await?;
    Ok(Json(weapon))
}

/// Register a weapon sale
#[utoipa::path(
    post,
    path = "/api/weapons",
    tag = "Weapons",
    request_body = CreateWeaponRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Weapon registered", body = WeaponResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee or base weapon not found")
    )
)]
pub async fn create_weapon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateWeaponRequest>,
) -> AppResult<Created<WeaponResponse>> {
    let weapon = state
        .weapon_service
        .create_weapon(
            &current_user.name,
            CreateWeapon {
                timestamp: payload.timestamp,
                user_id: payload.user_id,
                base_weapon_id: payload.base_weapon_id,
                holder: payload.holder,
                serial_number: payload.serial_number,
                price: payload.price,
                production_cost: payload.production_cost,
            },
        )
        .await?;

    Ok(Created(weapon))
}

/// Update a weapon
#[utoipa::path(
    patch,
    path = "/api/weapons/{id}",
    tag = "Weapons",
    params(("id" = i32, Path, description = "Weapon ID")),
    request_body = UpdateWeaponRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Weapon updated", body = WeaponResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Weapon not found")
    )
)]
pub async fn update_weapon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateWeaponRequest>,
) -> AppResult<Json<WeaponResponse>> {
    let weapon = state
        .weapon_service
        .update_weapon(
            &current_user.name,
            id,
            UpdateWeapon {
                timestamp: payload.timestamp,
                user_id: payload.user_id,
                base_weapon_id: payload.base_weapon_id,
                holder: payload.holder,
                serial_number: payload.serial_number,
                price: payload.price,
                production_cost: payload.production_cost,
            },
        )
        .await?;

    Ok(Json(weapon))
}

/// Remove a weapon (admin only)
#[utoipa::path(
    delete,
    path = "/api/weapons/{id}",
    tag = "Weapons",
    params(("id" = i32, Path, description = "Weapon ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Weapon removed"),
        (status = 403, description = "Missing weapon-management permission"),
        (status = 404, description = "Weapon not found")
    )
)]
pub async fn delete_weapon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    require_permission(&current_user, Permission::ManageWeapons)?;
    state.weapon_service.delete_weapon(&current_user.name, id).await?;
    Ok(NoContent)
}
