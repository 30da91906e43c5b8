//! Base-weapon model handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_permission, CurrentUser};
use crate::api::AppState;
use crate::domain::{BaseWeaponResponse, Permission};
use crate::errors::AppResult;
use crate::services::{CreateBaseWeapon, UpdateBaseWeapon};
use crate::types::{Created, NoContent};

/// Base-weapon creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBaseWeaponRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Colt 1911")]
    pub name: String,
    /// Default sale price in cents
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 55000)]
    pub default_price: i32,
    /// Default production cost in cents
    #[validate(range(min = 0, message = "Production cost cannot be negative"))]
    #[schema(example = 21000)]
    pub default_production_cost: i32,
}

/// Base-weapon update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBaseWeaponRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub default_price: Option<i32>,
    #[validate(range(min = 0, message = "Production cost cannot be negative"))]
    pub default_production_cost: Option<i32>,
}

/// Create base-weapon routes
pub fn base_weapon_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_base_weapons).post(create_base_weapon))
        .route(
            "/:id",
            get(get_base_weapon)
                .patch(update_base_weapon)
                .delete(delete_base_weapon),
        )
}

/// List base-weapon models
#[utoipa::path(
    get,
    path = "/api/base-weapons",
    tag = "Base weapons",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Base-weapon models", body = [BaseWeaponResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_base_weapons(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BaseWeaponResponse>>> {
    let models = state.base_weapon_service.list_base_weapons().await?;
    Ok(Json(
        models.into_iter().map(BaseWeaponResponse::from).collect(),
    ))
}

/// Get a base-weapon model
#[utoipa::path(
    get,
    path = "/api/base-weapons/{id}",
    tag = "Base weapons",
    params(("id" = i32, Path, description = "Base weapon ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Base weapon found", body = BaseWeaponResponse),
        (status = 404, description = "Base weapon not found")
    )
)]
pub async fn get_base_weapon(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BaseWeaponResponse>> {
    let base = state.base_weapon_service.get_base_weapon(id).await?;
    Ok(Json(BaseWeaponResponse::from(base)))
}

/// Create a base-weapon model
#[utoipa::path(
    post,
    path = "/api/base-weapons",
    tag = "Base weapons",
    request_body = CreateBaseWeaponRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Base weapon created", body = BaseWeaponResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Missing base-weapon permission"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn create_base_weapon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateBaseWeaponRequest>,
) -> AppResult<Created<BaseWeaponResponse>> {
    require_permission(&current_user, Permission::ManageBaseWeapons)?;

    let base = state
        .base_weapon_service
        .create_base_weapon(CreateBaseWeapon {
            name: payload.name,
            default_price: payload.default_price,
            default_production_cost: payload.default_production_cost,
        })
        .await?;

    Ok(Created(BaseWeaponResponse::from(base)))
}

/// Update a base-weapon model
///
/// Changed defaults only affect future weapons and orders; existing
/// price snapshots are untouched.
#[utoipa::path(
    patch,
    path = "/api/base-weapons/{id}",
    tag = "Base weapons",
    params(("id" = i32, Path, description = "Base weapon ID")),
    request_body = UpdateBaseWeaponRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Base weapon updated", body = BaseWeaponResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Missing base-weapon permission"),
        (status = 404, description = "Base weapon not found"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn update_base_weapon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateBaseWeaponRequest>,
) -> AppResult<Json<BaseWeaponResponse>> {
    require_permission(&current_user, Permission::ManageBaseWeapons)?;

    let base = state
        .base_weapon_service
        .update_base_weapon(
            id,
            UpdateBaseWeapon {
                name: payload.name,
                default_price: payload.default_price,
                default_production_cost: payload.default_production_cost,
            },
        )
        .await?;

    Ok(Json(BaseWeaponResponse::from(base)))
}

/// Delete a base-weapon model
#[utoipa::path(
    delete,
    path = "/api/base-weapons/{id}",
    tag = "Base weapons",
    params(("id" = i32, Path, description = "Base weapon ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Base weapon deleted"),
        (status = 403, description = "Missing base-weapon permission"),
        (status = 404, description = "Base weapon not found")
    )
)]
pub async fn delete_base_weapon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    require_permission(&current_user, Permission::ManageBaseWeapons)?;
    state.base_weapon_service.delete_base_weapon(id).await?;
    Ok(NoContent)
}
