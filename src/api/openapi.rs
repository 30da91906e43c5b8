//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, base_weapon_handler, employee_handler, feedback_handler, order_handler,
    weapon_handler,
};
use crate::domain::{
    BaseWeaponResponse, CatalogEntryResponse, FeedbackResponse, FeedbackStatus, OrderItemResponse,
    OrderResponse, OrderStatus, OrderUserInfo, Role, UserResponse, WeaponResponse,
};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Armurerie API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Armurerie API",
        version = "0.1.0",
        description = "In-game armory management: employees, weapon inventory, orders and feedback",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        auth_handler::logout,
        auth_handler::request_reset,
        auth_handler::complete_reset,
        auth_handler::complete_setup,
        // Employee endpoints
        employee_handler::list_employees,
        employee_handler::get_current_employee,
        employee_handler::get_employee,
        employee_handler::create_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        employee_handler::send_setup_link,
        employee_handler::reassign_weapons,
        // Weapon endpoints
        weapon_handler::list_weapons,
        weapon_handler::list_catalog,
        weapon_handler::get_weapon,
        weapon_handler::create_weapon,
        weapon_handler::update_weapon,
        weapon_handler::delete_weapon,
        // Base-weapon endpoints
        base_weapon_handler::list_base_weapons,
        base_weapon_handler::get_base_weapon,
        base_weapon_handler::create_base_weapon,
        base_weapon_handler::update_base_weapon,
        base_weapon_handler::delete_base_weapon,
        // Order endpoints
        order_handler::list_orders,
        order_handler::get_order,
        order_handler::create_order,
        order_handler::update_order_status,
        order_handler::delete_order,
        // Feedback endpoints
        feedback_handler::list_feedback,
        feedback_handler::create_feedback,
        feedback_handler::update_feedback_status,
        feedback_handler::delete_feedback,
    ),
    components(
        schemas(
            // Domain types
            Role,
            UserResponse,
            WeaponResponse,
            BaseWeaponResponse,
            CatalogEntryResponse,
            OrderStatus,
            OrderResponse,
            OrderItemResponse,
            OrderUserInfo,
            FeedbackStatus,
            FeedbackResponse,
            // Auth types
            auth_handler::LoginRequest,
            auth_handler::ResetRequest,
            auth_handler::CompleteResetRequest,
            auth_handler::CompleteSetupRequest,
            TokenResponse,
            MessageResponse,
            // Request types
            employee_handler::CreateEmployeeRequest,
            employee_handler::UpdateEmployeeRequest,
            employee_handler::SendSetupLinkRequest,
            employee_handler::SetupLinkResponse,
            employee_handler::ReassignWeaponsResponse,
            weapon_handler::CreateWeaponRequest,
            weapon_handler::UpdateWeaponRequest,
            base_weapon_handler::CreateBaseWeaponRequest,
            base_weapon_handler::UpdateBaseWeaponRequest,
            order_handler::CreateOrderRequest,
            order_handler::OrderItemRequest,
            order_handler::UpdateOrderStatusRequest,
            feedback_handler::CreateFeedbackRequest,
            feedback_handler::UpdateFeedbackStatusRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, setup and reset flows"),
        (name = "Employees", description = "Employee account management"),
        (name = "Weapons", description = "Weapon inventory"),
        (name = "Base weapons", description = "Base-weapon models and catalog"),
        (name = "Orders", description = "Orders with price snapshots"),
        (name = "Feedback", description = "Bug reports and suggestions")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
