//! Employee management handlers.

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
use crate::api::middleware::{require_permission, CurrentUser};
use crate::api::AppState;
use crate::domain::{Permission, Role, UserResponse};
use crate::errors::AppResult;
use crate::services::{CreateEmployee, UpdateEmployee};
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Employee creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jean Dupont")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jean@armurerie.local")]
    pub email: String,
    /// Optional in-game username
    pub username: Option<String>,
    /// Defaults to EMPLOYEE when omitted
    #[schema(example = "EMPLOYEE")]
    pub role: Option<Role>,
    /// Display color, hex notation
    #[schema(example = "#3498DB")]
    pub color: Option<String>,
    /// Commission percentage; defaults from the role when omitted
    #[validate(range(min = 0, max = 100, message = "Commission must be between 0 and 100"))]
    pub commission: Option<i32>,
    pub contract_url: Option<String>,
}

/// Employee update request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub color: Option<String>,
    pub role: Option<Role>,
    #[validate(range(min = 0, max = 100, message = "Commission must be between 0 and 100"))]
    pub commission: Option<i32>,
    pub contract_url: Option<String>,
}

/// Employee list filter. `include_deleted` is honored for admins only.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct EmployeeListQuery {
    #[serde(default)]
    pub include_deleted: bool,
}

/// Bulk weapon hand-over between two employees.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ReassignWeaponsQuery {
    /// Employee giving up their weapons
    pub from_user_id: i32,
    /// Employee receiving them
    pub to_user_id: i32,
}

/// Outcome of a bulk weapon hand-over.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ReassignWeaponsResponse {
    pub message: String,
    /// Number of weapons moved
    pub count: u64,
}

/// Options for the admin setup-link resend endpoint. The body is optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SendSetupLinkRequest {
    /// Return the link without emailing it
    #[serde(default)]
    pub generate_link_only: bool,
}

/// Response to the admin setup-link resend endpoint.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct SetupLinkResponse {
    pub message: String,
    /// The generated link, for manual delivery when email is unavailable
    pub setup_url: String,
}

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/me", get(get_current_employee))
        .route(
            "/reassign-weapons",
            axum::routing::post(reassign_weapons),
        )
        .route(
            "/:id",
            get(get_employee).patch(update_employee).delete(delete_employee),
        )
        .route("/:id/setup", axum::routing::post(send_setup_link))
}

/// List employees (paginated)
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    params(PaginationParams, EmployeeListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated employee list", body = [UserResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<EmployeeListQuery>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    let include_deleted = filter.include_deleted && current_user.is_admin();
    let page = state.user_service.list_users(params, include_deleted).await?;
    let data = page.data.into_iter().map(UserResponse::from).collect();
    Ok(Json(Paginated {
        data,
        meta: page.meta,
    }))
}

/// Get the authenticated employee's own profile
#[utoipa::path(
    get,
    path = "/api/employees/me",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current employee", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_employee(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Get an employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Employee found", body = UserResponse),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create an employee account
///
/// The account starts with a temporary password; a setup link is sent
/// to the employee's email address.
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = CreateEmployeeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Employee created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Missing user-management permission"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<Created<UserResponse>> {
    require_permission(&current_user, Permission::ManageUsers)?;

    let user = state
        .user_service
        .create_user(CreateEmployee {
            name: payload.name,
            email: payload.email,
            username: payload.username,
            role: payload.role.unwrap_or(Role::Employee),
            color: payload.color,
            commission: payload.commission,
            contract_url: payload.contract_url,
        })
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Update an employee profile
#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Employee updated", body = UserResponse),
        (status = 400, description = "Validation error or last-PATRON demotion"),
        (status = 403, description = "Missing user-management permission"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<Json<UserResponse>> {
    require_permission(&current_user, Permission::ManageUsers)?;

    let user = state
        .user_service
        .update_user(
            id,
            UpdateEmployee {
                name: payload.name,
                color: payload.color,
                role: payload.role,
                commission: payload.commission,
                contract_url: payload.contract_url,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Soft-delete an employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 400, description = "Last PATRON or weapon holder"),
        (status = 403, description = "Missing user-management permission"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    require_permission(&current_user, Permission::ManageUsers)?;
    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}

/// Move every weapon from one employee to another
///
/// Off-boarding helper: a weapon holder cannot be deleted, so their
/// inventory is handed over in one bulk update first.
#[utoipa::path(
    post,
    path = "/api/employees/reassign-weapons",
    tag = "Employees",
    params(ReassignWeaponsQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Weapons reassigned", body = ReassignWeaponsResponse),
        (status = 403, description = "Missing user-management permission"),
        (status = 404, description = "Source or target employee not found")
    )
)]
pub async fn reassign_weapons(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ReassignWeaponsQuery>,
) -> AppResult<Json<ReassignWeaponsResponse>> {
    require_permission(&current_user, Permission::ManageUsers)?;

    let count = state
        .user_service
        .reassign_weapons(query.from_user_id, query.to_user_id)
        .await?;

    Ok(Json(ReassignWeaponsResponse {
        message: format!(
            "{} weapons reassigned from user {} to {}",
            count, query.from_user_id, query.to_user_id
        ),
        count,
    }))
}

/// Re-send the account setup link
#[utoipa::path(
    post,
    path = "/api/employees/{id}/setup",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = SendSetupLinkRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Setup link generated and emailed", body = SetupLinkResponse),
        (status = 403, description = "Missing user-management permission"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn send_setup_link(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    payload: Option<Json<SendSetupLinkRequest>>,
) -> AppResult<Json<SetupLinkResponse>> {
    require_permission(&current_user, Permission::ManageUsers)?;

    let link_only = payload.map(|Json(p)| p.generate_link_only).unwrap_or(false);
    let setup_url = state.user_service.send_setup_link(id, link_only).await?;
    let message = if link_only {
        "Setup link generated".to_string()
    } else {
        "Setup link sent".to_string()
    };
    Ok(Json(SetupLinkResponse { message, setup_url }))
}
