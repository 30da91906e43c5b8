//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_BASE_URL, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS,
    MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    /// Public base URL embedded in setup/reset links sent by email.
    pub base_url: String,
    /// Discord webhook for order/weapon notifications. None disables them.
    pub discord_webhook_url: Option<String>,
    pub default_admin_email: String,
    default_admin_password: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("base_url", &self.base_url)
            .field("discord_webhook_url", &self.discord_webhook_url.as_deref().map(|_| "[REDACTED]"))
            .field("default_admin_email", &self.default_admin_email)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set in release builds or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            base_url: env::var("APP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            discord_webhook_url: env::var("DISCORD_WEBHOOK_URL").ok(),
            default_admin_email: env::var("DEFAULT_ADMIN_EMAIL")
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
            default_admin_password: env::var("DEFAULT_ADMIN_PASSWORD").ok(),
        }
    }

    /// JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Password for the seeded default admin, if configured.
    ///
    /// When unset, the seed step generates a random one and logs it once.
    pub fn default_admin_password(&self) -> Option<&str> {
        self.default_admin_password.as_deref()
    }

    /// Test fixture with a fixed secret. Not used outside tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: "unit-test-secret-key-0123456789abcdef".to_string(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            base_url: DEFAULT_BASE_URL.to_string(),
            discord_webhook_url: None,
            default_admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            default_admin_password: None,
        }
    }
}
