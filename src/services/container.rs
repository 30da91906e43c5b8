//! Service Container - Centralized service access.
//!
//! Wires repositories, token issuing, email and Discord glue into the
//! service implementations, and hands them out as trait objects.

use std::sync::Arc;

use super::{
    AuthService, BaseWeaponService, FeedbackService, OrderService, UserService, WeaponService,
};
use crate::config::Config;
use crate::infra::{DiscordNotifier, Mailer, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get weapon inventory service
    fn weapons(&self) -> Arc<dyn WeaponService>;

    /// Get base weapon service
    fn base_weapons(&self) -> Arc<dyn BaseWeaponService>;

    /// Get order service
    fn orders(&self) -> Arc<dyn OrderService>;

    /// Get feedback service
    fn feedback(&self) -> Arc<dyn FeedbackService>;
}

/// Concrete service container.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    weapon_service: Arc<dyn WeaponService>,
    base_weapon_service: Arc<dyn BaseWeaponService>,
    order_service: Arc<dyn OrderService>,
    feedback_service: Arc<dyn FeedbackService>,
}

impl Services {
    /// Create service container from a database connection and config.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            Authenticator, BaseWeaponManager, FeedbackManager, OrderManager, TokenService,
            UserManager, WeaponManager,
        };

        let persistence = Arc::new(Persistence::new(db));
        let tokens = Arc::new(TokenService::new(config.clone()));
        let mailer = Mailer::new();
        let discord = DiscordNotifier::new(config.discord_webhook_url.clone());

        Self {
            auth_service: Arc::new(Authenticator::new(persistence.clone(), config)),
            user_service: Arc::new(UserManager::new(
                persistence.clone(),
                tokens,
                mailer,
            )),
            weapon_service: Arc::new(WeaponManager::new(persistence.clone(), discord.clone())),
            base_weapon_service: Arc::new(BaseWeaponManager::new(persistence.clone())),
            order_service: Arc::new(OrderManager::new(persistence.clone(), discord)),
            feedback_service: Arc::new(FeedbackManager::new(persistence)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn weapons(&self) -> Arc<dyn WeaponService> {
        self.weapon_service.clone()
    }

    fn base_weapons(&self) -> Arc<dyn BaseWeaponService> {
        self.base_weapon_service.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }

    fn feedback(&self) -> Arc<dyn FeedbackService> {
        self.feedback_service.clone()
    }
}
