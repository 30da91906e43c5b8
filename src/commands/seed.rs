//! Seed command - Idempotent initial data.
//!
//! Re-running seed never duplicates anything: the admin account is only
//! created while no PATRON or DEVELOPER exists, and the catalog is only
//! loaded into an empty table. `serve` runs this on every startup.

use sea_orm::DatabaseConnection;

use crate::config::{Config, DEFAULT_ADMIN_COLOR, DEFAULT_ADMIN_NAME};
use crate::domain::{Password, Role};
use crate::errors::AppResult;
use crate::infra::repositories::{CatalogRepository, NewCatalogEntry, NewUser, UserRepository};

/// Reference catalog loaded on first run. Prices in cents.
const CATALOG: &[NewCatalogEntry] = &[
    NewCatalogEntry { name: "Revolver Cattleman", sale_price: 50_000, production_cost: 18_000 },
    NewCatalogEntry { name: "Revolver Double-Action", sale_price: 65_000, production_cost: 24_000 },
    NewCatalogEntry { name: "Revolver Schofield", sale_price: 84_000, production_cost: 31_000 },
    NewCatalogEntry { name: "Pistolet Volcanic", sale_price: 120_000, production_cost: 45_000 },
    NewCatalogEntry { name: "Pistolet Mauser", sale_price: 175_000, production_cost: 62_000 },
    NewCatalogEntry { name: "Carabine Varmint", sale_price: 95_000, production_cost: 36_000 },
    NewCatalogEntry { name: "Fusil à répétition Lancaster", sale_price: 135_000, production_cost: 52_000 },
    NewCatalogEntry { name: "Fusil Springfield", sale_price: 150_000, production_cost: 58_000 },
    NewCatalogEntry { name: "Fusil à lunette Rolling Block", sale_price: 210_000, production_cost: 80_000 },
    NewCatalogEntry { name: "Fusil à pompe", sale_price: 185_000, production_cost: 70_000 },
    NewCatalogEntry { name: "Fusil à deux canons", sale_price: 165_000, production_cost: 60_000 },
    NewCatalogEntry { name: "Couteau de chasse", sale_price: 15_000, production_cost: 4_000 },
];

/// Execute the seed command standalone.
pub async fn execute(config: Config) -> AppResult<()> {
    let db = crate::infra::Database::connect(&config).await;
    run(db.connection(), &config).await
}

/// Seed the default admin and catalog. Safe to call on every startup.
pub async fn run(conn: &DatabaseConnection, config: &Config) -> AppResult<()> {
    seed_admin(conn, config).await?;
    seed_catalog(conn).await?;
    Ok(())
}

async fn seed_admin(conn: &DatabaseConnection, config: &Config) -> AppResult<()> {
    let users = UserRepository::new(conn);

    if users.admin_exists().await? {
        tracing::debug!("Admin account present, skipping admin seed");
        return Ok(());
    }

    // Without a configured password, generate one and log it once so
    // the first operator can log in and change it.
    let (plain, generated) = match config.default_admin_password() {
        Some(password) => (password.to_string(), false),
        None => (Password::generate_temporary(), true),
    };

    let admin = users
        .insert(NewUser {
            name: DEFAULT_ADMIN_NAME.to_string(),
            email: config.default_admin_email.clone(),
            username: None,
            password_hash: Password::new(&plain)?.into_string(),
            role: Role::Patron,
            color: Some(DEFAULT_ADMIN_COLOR.to_string()),
            commission: 50,
            contract_url: None,
        })
        .await?;

    if generated {
        tracing::warn!(
            email = %admin.email,
            password = %plain,
            "Created default admin with a generated password; change it after first login"
        );
    } else {
        tracing::info!(email = %admin.email, "Created default admin account");
    }

    Ok(())
}

async fn seed_catalog(conn: &DatabaseConnection) -> AppResult<()> {
    let catalog = CatalogRepository::new(conn);

    if catalog.count().await? > 0 {
        tracing::debug!("Catalog already loaded, skipping catalog seed");
        return Ok(());
    }

    catalog.insert_many(CATALOG).await?;
    tracing::info!(entries = CATALOG.len(), "Reference catalog loaded");
    Ok(())
}
