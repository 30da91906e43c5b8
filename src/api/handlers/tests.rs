//! Handler tests driven through a mock service container.
//!
//! Stub services stand in behind `AppState` so the authorization and
//! status-code behavior of the handlers can be checked without a
//! database.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use chrono::Utc;

use super::employee_handler::{self, EmployeeListQuery, ReassignWeaponsQuery};
use super::order_handler::{self, CreateOrderRequest, OrderItemRequest};
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    BaseWeapon, CatalogEntry, FeedbackResponse, FeedbackStatus, OrderResponse, OrderStatus, Role,
    User, WeaponResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{
    AuthService, BaseWeaponService, Claims, CreateBaseWeapon, CreateEmployee, CreateFeedback,
    CreateOrderItem, CreateWeapon, FeedbackService, MockServiceContainer, OrderService,
    OrderViewer, TokenResponse, UpdateBaseWeapon, UpdateEmployee, UpdateWeapon, UserService,
    WeaponService,
};
use crate::types::{Paginated, PaginationParams};

const LAST_PATRON_ID: i32 = 7;
const MISSING_USER_ID: i32 = 404;
const MISSING_BASE_WEAPON_ID: i32 = 999;

fn sample_user(id: i32, role: Role) -> User {
    User {
        id,
        name: format!("Employee {id}"),
        email: format!("employee{id}@armurerie.local"),
        username: None,
        password_hash: "hash".to_string(),
        role,
        color: None,
        commission: 20,
        contract_url: None,
        last_login: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted: false,
        deleted_at: None,
    }
}

fn employee() -> CurrentUser {
    CurrentUser {
        id: 1,
        email: "jean@armurerie.local".to_string(),
        name: "Jean Dupont".to_string(),
        role: Role::Employee,
    }
}

fn patron() -> CurrentUser {
    CurrentUser {
        id: 2,
        email: "patron@armurerie.local".to_string(),
        name: "La Patronne".to_string(),
        role: Role::Patron,
    }
}

fn not_wired<T>() -> AppResult<T> {
    Err(AppError::internal("not wired in this test"))
}

/// Placeholder for the services a test does not exercise.
struct Unwired;

#[async_trait]
impl AuthService for Unwired {
    async fn login(&self, _email: String, _password: String) -> AppResult<TokenResponse> {
        not_wired()
    }

    fn verify_token(&self, _token: &str) -> AppResult<Claims> {
        not_wired()
    }
}

#[async_trait]
impl WeaponService for Unwired {
    async fn list_weapons(&self, _params: PaginationParams) -> AppResult<Paginated<WeaponResponse>> {
        not_wired()
    }

    async fn get_weapon(&self, _id: i32) -> AppResult<WeaponResponse> {
        not_wired()
    }

    async fn create_weapon(&self, _actor: &str, _input: CreateWeapon) -> AppResult<WeaponResponse> {
        not_wired()
    }

    async fn update_weapon(
        &self,
        _actor: &str,
        _id: i32,
        _changes: UpdateWeapon,
    ) -> AppResult<WeaponResponse> {
        not_wired()
    }

    async fn delete_weapon(&self, _actor: &str, _id: i32) -> AppResult<()> {
        not_wired()
    }
}

#[async_trait]
impl BaseWeaponService for Unwired {
    async fn list_base_weapons(&self) -> AppResult<Vec<BaseWeapon>> {
        not_wired()
    }

    async fn get_base_weapon(&self, _id: i32) -> AppResult<BaseWeapon> {
        not_wired()
    }

    async fn create_base_weapon(&self, _input: CreateBaseWeapon) -> AppResult<BaseWeapon> {
        not_wired()
    }

    async fn update_base_weapon(
        &self,
        _id: i32,
        _changes: UpdateBaseWeapon,
    ) -> AppResult<BaseWeapon> {
        not_wired()
    }

    async fn delete_base_weapon(&self, _id: i32) -> AppResult<()> {
        not_wired()
    }

    async fn list_catalog(&self) -> AppResult<Vec<CatalogEntry>> {
        not_wired()
    }
}

#[async_trait]
impl FeedbackService for Unwired {
    async fn list_feedback(&self) -> AppResult<Vec<FeedbackResponse>> {
        not_wired()
    }

    async fn create_feedback(&self, _input: CreateFeedback) -> AppResult<FeedbackResponse> {
        not_wired()
    }

    async fn update_status(
        &self,
        _id: i32,
        _status: FeedbackStatus,
    ) -> AppResult<FeedbackResponse> {
        not_wired()
    }

    async fn delete_feedback(&self, _id: i32) -> AppResult<()> {
        not_wired()
    }
}

/// User service stub with the org-chart guards baked in.
#[derive(Default)]
struct StubUserService {
    seen_include_deleted: Mutex<Option<bool>>,
}

#[async_trait]
impl UserService for StubUserService {
    async fn list_users(
        &self,
        params: PaginationParams,
        include_deleted: bool,
    ) -> AppResult<Paginated<User>> {
        *self.seen_include_deleted.lock().unwrap() = Some(include_deleted);
        Ok(Paginated::new(
            vec![sample_user(1, Role::Employee)],
            params.page,
            params.limit(),
            1,
        ))
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        if id == MISSING_USER_ID {
            return Err(AppError::NotFound);
        }
        Ok(sample_user(id, Role::Employee))
    }

    async fn create_user(&self, _input: CreateEmployee) -> AppResult<User> {
        not_wired()
    }

    async fn update_user(&self, _id: i32, _changes: UpdateEmployee) -> AppResult<User> {
        not_wired()
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        if id == MISSING_USER_ID {
            return Err(AppError::NotFound);
        }
        if id == LAST_PATRON_ID {
            return Err(AppError::bad_request(
                "Cannot delete the last PATRON of the organization",
            ));
        }
        Ok(())
    }

    async fn reassign_weapons(&self, from_user_id: i32, to_user_id: i32) -> AppResult<u64> {
        if from_user_id == MISSING_USER_ID || to_user_id == MISSING_USER_ID {
            return Err(AppError::NotFound);
        }
        Ok(3)
    }

    async fn send_setup_link(&self, _id: i32, _link_only: bool) -> AppResult<String> {
        not_wired()
    }

    async fn request_password_reset(&self, _email: String) -> AppResult<()> {
        not_wired()
    }

    async fn complete_password_reset(&self, _token: String, _new_password: String) -> AppResult<()> {
        not_wired()
    }

    async fn complete_setup(
        &self,
        _token: String,
        _password: String,
        _username: Option<String>,
    ) -> AppResult<()> {
        not_wired()
    }
}

/// Order service stub that counts how many orders it stored.
#[derive(Default)]
struct StubOrderService {
    persisted: AtomicUsize,
}

#[async_trait]
impl OrderService for StubOrderService {
    async fn create_order(
        &self,
        _user_id: i32,
        items: Vec<CreateOrderItem>,
    ) -> AppResult<OrderResponse> {
        let mut total = 0;
        for item in &items {
            match item.base_weapon_id {
                Some(MISSING_BASE_WEAPON_ID) | None => return Err(AppError::NotFound),
                Some(_) => total += 55_000 * item.quantity,
            }
        }

        self.persisted.fetch_add(1, Ordering::SeqCst);
        Ok(OrderResponse {
            id: 1,
            user: None,
            total_price: total,
            status: OrderStatus::Pending,
            items: Vec::new(),
            created_at: Utc::now(),
        })
    }

    async fn list_orders(
        &self,
        _viewer: OrderViewer,
        _params: PaginationParams,
    ) -> AppResult<Paginated<OrderResponse>> {
        not_wired()
    }

    async fn get_order(&self, _viewer: OrderViewer, _id: i32) -> AppResult<OrderResponse> {
        not_wired()
    }

    async fn update_status(
        &self,
        _actor_name: &str,
        _id: i32,
        _new_status: OrderStatus,
    ) -> AppResult<OrderResponse> {
        not_wired()
    }

    async fn delete_order(&self, _id: i32) -> AppResult<()> {
        not_wired()
    }
}

fn state_with(users: Arc<dyn UserService>, orders: Arc<dyn OrderService>) -> AppState {
    let unwired = Arc::new(Unwired);

    let mut container = MockServiceContainer::new();
    let auth: Arc<dyn AuthService> = unwired.clone();
    container.expect_auth().returning(move || auth.clone());
    let weapons: Arc<dyn WeaponService> = unwired.clone();
    container.expect_weapons().returning(move || weapons.clone());
    let base_weapons: Arc<dyn BaseWeaponService> = unwired.clone();
    container
        .expect_base_weapons()
        .returning(move || base_weapons.clone());
    let feedback: Arc<dyn FeedbackService> = unwired;
    container
        .expect_feedback()
        .returning(move || feedback.clone());
    container.expect_users().returning(move || users.clone());
    container.expect_orders().returning(move || orders.clone());

    AppState::from_container(&container, Arc::new(Database::disconnected()))
}

fn error_status(result: AppError) -> StatusCode {
    result.into_response().status()
}

fn order_request(base_weapon_id: i32, quantity: i32) -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![OrderItemRequest {
            base_weapon_id: Some(base_weapon_id),
            catalog_entry_id: None,
            quantity,
        }],
    }
}

#[tokio::test]
async fn order_for_unknown_base_weapon_is_404_and_stores_nothing() {
    let orders = Arc::new(StubOrderService::default());
    let state = state_with(Arc::new(StubUserService::default()), orders.clone());

    let result = order_handler::create_order(
        State(state),
        Extension(employee()),
        ValidatedJson(order_request(MISSING_BASE_WEAPON_ID, 1)),
    )
    .await;

    assert_eq!(error_status(result.unwrap_err()), StatusCode::NOT_FOUND);
    assert_eq!(orders.persisted.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_order_is_stored_once() {
    let orders = Arc::new(StubOrderService::default());
    let state = state_with(Arc::new(StubUserService::default()), orders.clone());

    let created = order_handler::create_order(
        State(state),
        Extension(employee()),
        ValidatedJson(order_request(1, 2)),
    )
    .await
    .unwrap();

    assert_eq!(created.0.total_price, 110_000);
    assert_eq!(created.0.status, OrderStatus::Pending);
    assert_eq!(orders.persisted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn deleting_the_last_patron_is_rejected_with_400() {
    let state = state_with(
        Arc::new(StubUserService::default()),
        Arc::new(StubOrderService::default()),
    );

    let result =
        employee_handler::delete_employee(State(state), Extension(patron()), Path(LAST_PATRON_ID))
            .await;

    assert_eq!(error_status(result.unwrap_err()), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn employee_deletion_requires_user_management_permission() {
    let state = state_with(
        Arc::new(StubUserService::default()),
        Arc::new(StubOrderService::default()),
    );

    let result =
        employee_handler::delete_employee(State(state), Extension(employee()), Path(3)).await;

    assert_eq!(error_status(result.unwrap_err()), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn employee_list_is_open_to_every_authenticated_role() {
    let users = Arc::new(StubUserService::default());
    let state = state_with(users.clone(), Arc::new(StubOrderService::default()));

    let page = employee_handler::list_employees(
        State(state),
        Extension(employee()),
        Query(PaginationParams::default()),
        Query(EmployeeListQuery {
            include_deleted: true,
        }),
    )
    .await
    .unwrap();

    assert_eq!(page.0.data.len(), 1);
    // A non-admin asking for deleted accounts is silently ignored.
    assert_eq!(*users.seen_include_deleted.lock().unwrap(), Some(false));
}

#[tokio::test]
async fn admins_can_list_deleted_employees() {
    let users = Arc::new(StubUserService::default());
    let state = state_with(users.clone(), Arc::new(StubOrderService::default()));

    employee_handler::list_employees(
        State(state),
        Extension(patron()),
        Query(PaginationParams::default()),
        Query(EmployeeListQuery {
            include_deleted: true,
        }),
    )
    .await
    .unwrap();

    assert_eq!(*users.seen_include_deleted.lock().unwrap(), Some(true));
}

#[tokio::test]
async fn weapon_reassignment_needs_both_users() {
    let state = state_with(
        Arc::new(StubUserService::default()),
        Arc::new(StubOrderService::default()),
    );

    let result = employee_handler::reassign_weapons(
        State(state),
        Extension(patron()),
        Query(ReassignWeaponsQuery {
            from_user_id: MISSING_USER_ID,
            to_user_id: 2,
        }),
    )
    .await;

    assert_eq!(error_status(result.unwrap_err()), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn weapon_reassignment_reports_the_moved_count() {
    let state = state_with(
        Arc::new(StubUserService::default()),
        Arc::new(StubOrderService::default()),
    );

    let response = employee_handler::reassign_weapons(
        State(state),
        Extension(patron()),
        Query(ReassignWeaponsQuery {
            from_user_id: 1,
            to_user_id: 2,
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.0.count, 3);
    assert!(response.0.message.contains("3 weapons"));
}

#[tokio::test]
async fn weapon_reassignment_is_admin_only() {
    let state = state_with(
        Arc::new(StubUserService::default()),
        Arc::new(StubOrderService::default()),
    );

    let result = employee_handler::reassign_weapons(
        State(state),
        Extension(employee()),
        Query(ReassignWeaponsQuery {
            from_user_id: 1,
            to_user_id: 2,
        }),
    )
    .await;

    assert_eq!(error_status(result.unwrap_err()), StatusCode::FORBIDDEN);
}
