//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, BaseWeaponService, FeedbackService, OrderService, ServiceContainer, Services,
    UserService, WeaponService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub weapon_service: Arc<dyn WeaponService>,
    pub base_weapon_service: Arc<dyn BaseWeaponService>,
    pub order_service: Arc<dyn OrderService>,
    pub feedback_service: Arc<dyn FeedbackService>,
    /// Database handle kept for the health check.
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from the database handle and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Build state from any service container. Tests pass a mock
    /// container to drive handlers without a database.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            weapon_service: container.weapons(),
            base_weapon_service: container.base_weapons(),
            order_service: container.orders(),
            feedback_service: container.feedback(),
            database,
        }
    }
}
